//! The canonical analysis document.
//!
//! Every scorer, classical or external, hands governance the same nested
//! shape: category → metric name → `{before_score, after_score,
//! improvement_pct, description}` plus an `overall_assessment` section.
//! Parsing is schema-validated: absent keys are absent data, but a key that
//! is present with the wrong JSON type is rejected with its path.

mod classical;
mod document;
mod parse;
mod response;

pub use document::{AnalysisDocument, Category, MetricEntry, MetricRef, OverallAssessment};
pub use parse::DocumentError;
pub use response::extract_json_block;
