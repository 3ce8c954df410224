//! Classical before/after metrics.
//!
//! Four independent extractors (wrinkles, skin tone, texture, pores) each
//! reduce an aligned image pair to a [`MetricScore`]. `compare` fans them
//! out and folds the present scores into one overall score.

mod aggregate;
mod compare;
mod config;
mod error;
mod pores;
mod result;
mod score;
mod skin_tone;
mod texture;
mod wrinkles;

pub use aggregate::overall_score;
pub use compare::compare_images;
pub use config::{MetricsConfig, WrinkleBands};
pub use error::MetricError;
pub use pores::{analyze_pores, PoreReport};
pub use result::{ComparisonReport, Dimension, DimensionResult};
pub use score::MetricScore;
pub use skin_tone::{analyze_skin_tone, SkinToneReport};
pub use texture::{analyze_texture, TextureReport};
pub use wrinkles::{analyze_wrinkles, BandReport, FaceBand, WrinkleReport};
