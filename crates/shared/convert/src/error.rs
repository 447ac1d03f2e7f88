//! Conversion errors.

use thiserror::Error;

use crate::context::ConverterKey;

/// Errors raised while resolving or running converters.
///
/// Absent input is never an error: converters return `Ok(None)` for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// No converter registered for the requested type pair
    #[error("No converter registered for {domain} -> {proto}")]
    MissingConverter {
        domain: &'static str,
        proto: &'static str,
    },

    /// A registration exists but holds a converter for other types
    #[error("Converter registered for {domain} -> {proto} has an unexpected type")]
    TypeMismatch {
        domain: &'static str,
        proto: &'static str,
    },

    /// Input could not be represented on the other side
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl ConvertError {
    pub fn missing(key: ConverterKey) -> Self {
        ConvertError::MissingConverter {
            domain: key.domain_name(),
            proto: key.proto_name(),
        }
    }

    pub fn type_mismatch(key: ConverterKey) -> Self {
        ConvertError::TypeMismatch {
            domain: key.domain_name(),
            proto: key.proto_name(),
        }
    }

    pub fn invalid_value(msg: impl Into<String>) -> Self {
        ConvertError::InvalidValue(msg.into())
    }
}

/// Result type alias for conversions
pub type ConvertResult<T> = Result<T, ConvertError>;
