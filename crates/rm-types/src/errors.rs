use thiserror::Error;

/// Main error type for the RationalMarkets risk engine.
///
/// Metric computations themselves never fail; these errors come from loading
/// and validating configuration or from reading input documents.
#[derive(Error, Debug)]
pub enum RmError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Environment variable {name} has unparseable value {value:?}")]
    InvalidEnv { name: String, value: String },

    #[error("Unknown beta convention: {0:?} (expected \"signed\" or \"magnitude\")")]
    UnknownBetaConvention(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for RationalMarkets operations
pub type RmResult<T> = Result<T, RmError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::errors::RmError::Validation(format!($($arg)*))
    };
}

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::errors::RmError::Config($crate::errors::ConfigError::Other(format!($($arg)*)))
    };
}
