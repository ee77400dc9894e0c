//! Configuration errors.
//!
//! Options are validated when they are assigned, never during a layout pass, so
//! a bad value surfaces at the call site that produced it.

use core::fmt;
use std::error::Error;

/// A rejected configuration value.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowError {
    /// A numeric option that must be non-negative received a negative value.
    NegativeValue {
        /// Name of the option as it appears in an option bag.
        option: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// A numeric option received NaN or an infinity.
    NonFinite {
        /// Name of the option as it appears in an option bag.
        option: &'static str,
    },
    /// An enumerated option received a keyword it does not know.
    UnknownKeyword {
        /// Name of the option as it appears in an option bag.
        option: &'static str,
        /// The rejected keyword.
        keyword: String,
    },
}

impl fmt::Display for FlowError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeValue { option, value } => {
                write!(formatter, "`{option}` must not be negative (got {value})")
            }
            Self::NonFinite { option } => write!(formatter, "`{option}` must be a finite number"),
            Self::UnknownKeyword { option, keyword } => {
                write!(formatter, "unknown keyword `{keyword}` for `{option}`")
            }
        }
    }
}

impl Error for FlowError {}

/// Check that `value` is finite and not negative.
///
/// # Errors
/// Returns [`FlowError::NonFinite`] or [`FlowError::NegativeValue`].
pub fn non_negative(option: &'static str, value: f32) -> Result<f32, FlowError> {
    if !value.is_finite() {
        return Err(FlowError::NonFinite { option });
    }
    if value < 0.0 {
        return Err(FlowError::NegativeValue { option, value });
    }
    Ok(value)
}

/// [`non_negative`] for options that may be absent.
///
/// # Errors
/// Returns the error of [`non_negative`] when a value is present and invalid.
pub fn optional_non_negative(
    option: &'static str,
    value: Option<f32>,
) -> Result<Option<f32>, FlowError> {
    value.map(|present| non_negative(option, present)).transpose()
}
