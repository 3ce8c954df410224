//! Schema-validated parsing of analysis documents.
//!
//! `null` and missing keys both mean "absent". Entries inside a category
//! that are not metric objects are skipped. Any other value of the wrong
//! JSON type fails with the dotted path of the offending key.

use serde_json::{Map, Value};

use super::{AnalysisDocument, Category, MetricEntry, OverallAssessment};

/// A document that is not valid JSON or does not have the expected shape.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentError {
    /// The text could not be parsed as JSON.
    InvalidJson(String),
    /// A value is present with the wrong JSON type.
    WrongType {
        /// Dotted path from the document root, e.g. `$.skin_quality.pore_size`.
        path: String,
        expected: &'static str,
    },
}

impl std::fmt::Display for DocumentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson(reason) => write!(f, "invalid JSON: {}", reason),
            Self::WrongType { path, expected } => {
                write!(f, "{}: expected {}", path, expected)
            }
        }
    }
}

impl std::error::Error for DocumentError {}

const ROOT: &str = "$";

pub(super) fn document(value: &Value) -> Result<AnalysisDocument, DocumentError> {
    let root = object(value, ROOT)?;

    let mut doc = AnalysisDocument {
        success: optional(root, "success", ROOT, Value::as_bool, "boolean")?.unwrap_or(false),
        error: optional(root, "error", ROOT, as_string, "string")?,
        raw_response: optional(root, "raw_response", ROOT, as_string, "string")?,
        ..AnalysisDocument::default()
    };

    for category in Category::ALL {
        let Some(section) = present(root, category.key()) else {
            continue;
        };
        let path = child(ROOT, category.key());
        for (name, metric) in object(section, &path)? {
            if !metric.is_object() {
                tracing::warn!(path = %child(&path, name), "skipping non-object metric entry");
                continue;
            }
            let entry = metric_entry(metric, &child(&path, name))?;
            doc.insert_metric(category, name, entry);
        }
    }

    if let Some(overall) = present(root, "overall_assessment") {
        doc.overall_assessment = overall_assessment(overall, &child(ROOT, "overall_assessment"))?;
    }

    Ok(doc)
}

fn metric_entry(value: &Value, path: &str) -> Result<MetricEntry, DocumentError> {
    let map = object(value, path)?;
    Ok(MetricEntry {
        before_score: optional(map, "before_score", path, Value::as_f64, "number")?,
        after_score: optional(map, "after_score", path, Value::as_f64, "number")?,
        improvement_pct: optional(map, "improvement_pct", path, Value::as_f64, "number")?,
        description: optional(map, "description", path, as_string, "string")?.unwrap_or_default(),
    })
}

fn overall_assessment(value: &Value, path: &str) -> Result<OverallAssessment, DocumentError> {
    let map = object(value, path)?;
    let recommendations = match present(map, "recommendations") {
        None => Vec::new(),
        Some(list) => {
            let list_path = child(path, "recommendations");
            let items = list.as_array().ok_or_else(|| wrong_type(&list_path, "array"))?;
            items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    as_string(item)
                        .ok_or_else(|| wrong_type(&format!("{}[{}]", list_path, i), "string"))
                })
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok(OverallAssessment {
        overall_improvement: optional(map, "overall_improvement", path, Value::as_f64, "number")?,
        naturalness: optional(map, "naturalness", path, Value::as_f64, "number")?,
        rejuvenation_effect: optional(map, "rejuvenation_effect", path, Value::as_f64, "number")?,
        summary: optional(map, "summary", path, as_string, "string")?.unwrap_or_default(),
        recommendations,
    })
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, DocumentError> {
    value.as_object().ok_or_else(|| wrong_type(path, "object"))
}

/// Value under `key`, treating `null` as missing.
fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn optional<T>(
    map: &Map<String, Value>,
    key: &str,
    parent: &str,
    extract: impl Fn(&Value) -> Option<T>,
    expected: &'static str,
) -> Result<Option<T>, DocumentError> {
    match present(map, key) {
        None => Ok(None),
        Some(v) => extract(v)
            .map(Some)
            .ok_or_else(|| wrong_type(&child(parent, key), expected)),
    }
}

fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_owned)
}

fn child(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

fn wrong_type(path: &str, expected: &'static str) -> DocumentError {
    DocumentError::WrongType {
        path: path.to_string(),
        expected,
    }
}
