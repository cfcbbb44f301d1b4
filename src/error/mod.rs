//! Error handling for the response engine.
//!
//! Only configuration problems are fatal. Data-quality conditions found in a
//! subject's assessments are reported as [`crate::models::DataQualityFlag`]
//! values on the subject's evaluation and never abort a batch.

/// Specialized error type for the response engine
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    /// The configuration failed validation
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The confirmation window bounds are inverted or negative
    #[error("Invalid confirmation window [{min_days}, {max_days}]")]
    InvalidWindow {
        /// Lower bound in days
        min_days: i32,
        /// Upper bound in days
        max_days: i32,
    },

    /// A numeric threshold for a response criteria set is out of range
    #[error("Invalid threshold for {criteria}: {name} = {value}")]
    InvalidThreshold {
        /// Criteria set the threshold belongs to
        criteria: &'static str,
        /// Threshold name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// Configuration could not be deserialized
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl ResponseError {
    /// Create a configuration error from a message
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }
}

/// Result type for response engine operations
pub type Result<T> = std::result::Result<T, ResponseError>;
