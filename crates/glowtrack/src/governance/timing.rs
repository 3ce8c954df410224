use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::TimingWindows;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingStatus {
    TooEarly,
    Acceptable,
    Optimal,
    TooLate,
}

/// How far a measurement taken at this point can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reliability {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingAssessment {
    pub status: TimingStatus,
    pub reliability: Reliability,
}

impl TimingAssessment {
    /// Patient-facing explanation of the timing status.
    pub fn message(&self, treatment: &str) -> String {
        match self.status {
            TimingStatus::TooEarly => {
                format!("{} usually takes 2-4 weeks to reach its full effect", treatment)
            }
            TimingStatus::Acceptable => "The assessment timing is acceptable".to_string(),
            TimingStatus::Optimal => "This is the optimal assessment window".to_string(),
            TimingStatus::TooLate => {
                "A long time has passed since treatment; the effect may have partly faded"
                    .to_string()
            }
        }
    }

    pub fn recommendation(&self) -> Option<&'static str> {
        match self.status {
            TimingStatus::TooEarly => {
                Some("Take new photos in 3-4 weeks for a more accurate assessment")
            }
            TimingStatus::TooLate => Some("Treat this assessment as a reference only"),
            TimingStatus::Acceptable | TimingStatus::Optimal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimingError {
    /// The photo is dated before the treatment.
    PhotoPredatesTreatment { days: i64 },
}

impl std::fmt::Display for TimingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhotoPredatesTreatment { days } => write!(
                f,
                "photo predates treatment by {} day(s)",
                days.unsigned_abs()
            ),
        }
    }
}

impl std::error::Error for TimingError {}

/// Whole days from treatment to photo capture (negative if the photo is
/// older).
pub fn days_between(treatment_date: NaiveDate, photo_date: NaiveDate) -> i64 {
    photo_date.signed_duration_since(treatment_date).num_days()
}

/// Classify elapsed days since treatment.
///
/// Checked in order: too early, too late, optimal window, otherwise
/// acceptable. Negative day counts are rejected.
pub fn classify_timing(
    days: i64,
    windows: &TimingWindows,
) -> Result<TimingAssessment, TimingError> {
    if days < 0 {
        return Err(TimingError::PhotoPredatesTreatment { days });
    }
    let (status, reliability) = if days < windows.too_early_days {
        (TimingStatus::TooEarly, Reliability::Low)
    } else if days > windows.too_late_days {
        (TimingStatus::TooLate, Reliability::Medium)
    } else if (windows.optimal_min_days..=windows.optimal_max_days).contains(&days) {
        (TimingStatus::Optimal, Reliability::High)
    } else {
        (TimingStatus::Acceptable, Reliability::Medium)
    };
    Ok(TimingAssessment {
        status,
        reliability,
    })
}
