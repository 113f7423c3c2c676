//! Error types for the skyline-rs library.
//!
//! Structured error types for every analysis operation. Errors local to one
//! entity or file never abort a pass; they are recorded as binding flags and
//! surfaced through diagnostic reports. The variants here cover the failures
//! that *do* propagate: invalid input, contract violations, and strict metric
//! lookups that miss.

use std::io;

use thiserror::Error;

/// Main result type for skyline operations.
pub type Result<T> = std::result::Result<T, SkylineError>;

/// Comprehensive error type for all skyline operations.
#[derive(Error, Debug)]
pub enum SkylineError {
    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Program model construction errors
    #[error("Model error: {message}")]
    Model {
        /// Error description
        message: String,
        /// Entity (FQN) the error relates to
        entity: Option<String>,
    },

    /// Cross-reference resolution errors
    #[error("Resolution error: {message}")]
    Resolution {
        /// Error description
        message: String,
        /// Entity (FQN) the error relates to
        entity: Option<String>,
    },

    /// A strict metric lookup missed: the metric was never derived for the
    /// entity, or the entity kind does not define it.
    #[error("Metric '{metric}' is not available for {entity}")]
    MetricUnavailable {
        /// Requested metric name
        metric: String,
        /// Entity (FQN or display name) the lookup targeted
        entity: String,
    },

    /// I/O related errors
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
        /// Additional context
        context: Option<String>,
    },
}

impl SkylineError {
    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error with field context
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new model error
    pub fn model(message: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
            entity: None,
        }
    }

    /// Create a new model error naming the affected entity
    pub fn model_entity(message: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::Model {
            message: message.into(),
            entity: Some(entity.into()),
        }
    }

    /// Create a new resolution error
    pub fn resolution(message: impl Into<String>) -> Self {
        Self::Resolution {
            message: message.into(),
            entity: None,
        }
    }

    /// Create a new strict-lookup failure for a missing metric
    pub fn metric_unavailable(metric: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::MetricUnavailable {
            metric: metric.into(),
            entity: entity.into(),
        }
    }

    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: None,
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let Self::Internal { context: ctx, .. } = &mut self {
            *ctx = Some(context.into());
        }
        self
    }
}

impl From<io::Error> for SkylineError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for SkylineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}
