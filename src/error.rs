//! Error types for the financial advisor service

use thiserror::Error;

/// Result type alias for advisor operations
pub type Result<T> = std::result::Result<T, AdvisorError>;

/// Rejected request input. Raised before any downstream call is made.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("question must not be empty")]
    EmptyQuestion,

    #[error("age must not be negative (got {0})")]
    NegativeAge(i64),

    #[error("age {0} is out of range")]
    AgeOutOfRange(i64),

    #[error("monthly_salary must not be negative (got {0})")]
    NegativeSalary(f64),

    #[error("monthly_salary must be a finite number")]
    NonFiniteSalary,

    #[error("invalid value for {field}: {value:?}")]
    Malformed { field: &'static str, value: String },
}

/// The downstream engine replied with nothing that can be turned into text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("could not extract answer from engine response: {0}")]
pub struct ResponseExtractionError(pub String);

#[derive(Error, Debug)]
pub enum AdvisorError {

    // =============================
    // Pipeline Errors
    // =============================

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    DownstreamEngine(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl AdvisorError {
    pub fn is_validation(&self) -> bool {
        matches!(self, AdvisorError::Validation(_))
    }
}
