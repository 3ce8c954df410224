/// Reasons a metric extractor could not measure an image pair.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricError {
    /// One of the images has zero width or height.
    EmptyImage,
    /// Before and after frames differ in size.
    DimensionMismatch {
        /// Before image `[width, height]`.
        before: [u32; 2],
        /// After image `[width, height]`.
        after: [u32; 2],
    },
    /// A reduced statistic came out NaN or infinite.
    NonFiniteStatistic {
        /// Name of the offending statistic.
        statistic: &'static str,
    },
    /// The metric configuration breaks a range or ordering rule.
    InvalidConfig(String),
}

impl std::fmt::Display for MetricError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyImage => write!(f, "empty image"),
            Self::DimensionMismatch { before, after } => write!(
                f,
                "image size mismatch: before {}x{}, after {}x{}",
                before[0], before[1], after[0], after[1]
            ),
            Self::NonFiniteStatistic { statistic } => {
                write!(f, "non-finite statistic: {}", statistic)
            }
            Self::InvalidConfig(reason) => write!(f, "invalid metrics config: {}", reason),
        }
    }
}

impl std::error::Error for MetricError {}
