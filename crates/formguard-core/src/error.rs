//! Error types for the validation engine.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a form spec from code or configuration.
///
/// These are integrator mistakes: they surface when the spec is built and
/// never while values are evaluated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A length rule was declared without its numeric parameter.
    #[error("field '{field}': rule '{rule}' requires a numeric parameter")]
    MissingParameter {
        /// Field the rule belongs to.
        field: String,
        /// Rule kind as written.
        rule: String,
    },

    /// A length rule parameter is not a non-negative integer.
    #[error("field '{field}': rule '{rule}' has invalid parameter '{param}'")]
    InvalidParameter {
        /// Field the rule belongs to.
        field: String,
        /// Rule kind as written.
        rule: String,
        /// Offending parameter text.
        param: String,
    },

    /// A parameter was given to a built-in rule that takes none.
    #[error("field '{field}': rule '{rule}' does not take a parameter (got '{param}')")]
    UnexpectedParameter {
        /// Field the rule belongs to.
        field: String,
        /// Rule kind as written.
        rule: String,
        /// Offending parameter text.
        param: String,
    },

    /// An empty rule string.
    #[error("field '{field}': empty rule")]
    EmptyRule {
        /// Field the rule belongs to.
        field: String,
    },

    /// A message is keyed by a rule kind the field does not declare.
    #[error("field '{field}': message key '{key}' does not match any declared rule")]
    UnknownMessageKey {
        /// Field the message belongs to.
        field: String,
        /// The unmatched key.
        key: String,
    },

    /// Two fields share a name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// A field was declared with an empty name.
    #[error("field name must not be empty")]
    EmptyFieldName,

    /// Configuration file could not be read.
    #[error("failed to read config file '{}': {source}", path.display())]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Configuration JSON is malformed.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Engine-level errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// The form spec is malformed.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    /// A field that is not part of the form spec was queried.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

impl FormError {
    /// Returns whether this error comes from spec construction.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        Self::Configuration(ConfigError::Parse(err))
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, FormError>;
