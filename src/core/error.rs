//! Error types for option analytics

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptionError {
    #[error("Invalid option type: {0:?} (expected call or put)")]
    InvalidOptionType(String),

    #[error("Invalid direction: {0:?} (expected long or short)")]
    InvalidDirection(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "Target price {target} outside bracket [{low_price}, {high_price}] \
         for volatility range [{low_vol}%, {high_vol}%]"
    )]
    BracketViolation {
        target: f64,
        low_price: f64,
        high_price: f64,
        low_vol: f64,
        high_vol: f64,
    },

    #[error("Unknown strategy template: {0}")]
    UnknownTemplate(String),

    #[error("Template {name} already registered as {existing:?}, refusing {requested:?}")]
    TemplateConflict {
        name: String,
        existing: Vec<i32>,
        requested: Vec<i32>,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type OptionResult<T> = Result<T, OptionError>;

impl OptionError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_option_type(raw: impl Into<String>) -> Self {
        Self::InvalidOptionType(raw.into())
    }

    pub fn unknown_template(name: impl Into<String>) -> Self {
        Self::UnknownTemplate(name.into())
    }
}

/// Reject NaN/infinite values with a named error
pub(crate) fn ensure_finite(name: &str, value: f64) -> OptionResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(OptionError::invalid_input(format!("{name} must be finite, got {value}")))
    }
}
