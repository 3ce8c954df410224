use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::parse;
use super::DocumentError;

/// Top-level metric groups of an analysis document.
///
/// Ordering follows declaration order and drives iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    WrinkleAnalysis,
    SkinQuality,
    FacialContour,
    VolumeFullness,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::WrinkleAnalysis,
        Category::SkinQuality,
        Category::FacialContour,
        Category::VolumeFullness,
    ];

    /// JSON key of this category.
    pub const fn key(self) -> &'static str {
        match self {
            Self::WrinkleAnalysis => "wrinkle_analysis",
            Self::SkinQuality => "skin_quality",
            Self::FacialContour => "facial_contour",
            Self::VolumeFullness => "volume_fullness",
        }
    }
}

/// One scored metric.
///
/// Scores are optional because external scorers routinely omit them; the
/// governance rules decide what a missing value means.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_score: Option<f64>,
    /// Signed improvement in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub improvement_pct: Option<f64>,
    #[serde(default)]
    pub description: String,
}

impl MetricEntry {
    /// Improvement, with a missing value read as no change.
    pub fn improvement_or_zero(&self) -> f64 {
        self.improvement_pct.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    /// Signed overall improvement in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_improvement: Option<f64>,
    /// 0–100; higher is more natural.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naturalness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejuvenation_effect: Option<f64>,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Metrics of one category, in the order the scorer listed them.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MetricGroup(Vec<(String, MetricEntry)>);

impl MetricGroup {
    fn get(&self, name: &str) -> Option<&MetricEntry> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, entry)| entry)
    }

    /// Replace in place, or append a new name at the end.
    fn insert(&mut self, name: &str, entry: MetricEntry) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = entry,
            None => self.0.push((name.to_string(), entry)),
        }
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &MetricEntry)> {
        self.0.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl Serialize for MetricGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

/// Borrowed view of one metric during a document scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricRef<'a> {
    pub category: Category,
    pub name: &'a str,
    pub entry: &'a MetricEntry,
}

/// Structured improvement data consumed by governance.
///
/// Read-only for the duration of an evaluation; governance derives new
/// values from it and never edits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisDocument {
    /// Whether the scorer produced a usable measurement.
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(flatten)]
    pub(crate) categories: BTreeMap<Category, MetricGroup>,
    pub overall_assessment: OverallAssessment,
    /// Unparsed provider text, kept for clinicians.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_response: Option<String>,
}

impl AnalysisDocument {
    /// Document describing a scorer failure.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Parse and validate a JSON value.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, DocumentError> {
        parse::document(value)
    }

    /// Parse and validate JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, DocumentError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DocumentError::InvalidJson(e.to_string()))?;
        Self::from_value(&value)
    }

    pub fn metric(&self, category: Category, name: &str) -> Option<&MetricEntry> {
        self.categories.get(&category)?.get(name)
    }

    /// Metrics of one category, in document order.
    pub fn category(&self, category: Category) -> impl Iterator<Item = (&str, &MetricEntry)> {
        self.categories
            .get(&category)
            .into_iter()
            .flat_map(MetricGroup::iter)
    }

    /// Every metric, in category order and then in document order.
    pub fn metrics(&self) -> impl Iterator<Item = MetricRef<'_>> {
        self.categories.iter().flat_map(|(&category, metrics)| {
            metrics.iter().map(move |(name, entry)| MetricRef {
                category,
                name,
                entry,
            })
        })
    }

    pub fn n_metrics(&self) -> usize {
        self.categories.values().map(MetricGroup::len).sum()
    }

    /// Insert or replace a metric. A replaced metric keeps its position.
    pub fn insert_metric(&mut self, category: Category, name: &str, entry: MetricEntry) {
        self.categories
            .entry(category)
            .or_default()
            .insert(name, entry);
    }
}

impl<'de> Deserialize<'de> for AnalysisDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Self::from_value(&value).map_err(serde::de::Error::custom)
    }
}
