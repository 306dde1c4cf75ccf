//! Validation error types

use std::fmt;

/// Shape error for table descriptors and create payloads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Identifier exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match the identifier format
    InvalidFormat { field: &'static str, value: String },

    /// Column listed twice in an ordered set
    Duplicate { field: &'static str, value: String },

    /// Payload value is an array or object
    NotScalar { column: String },

    /// Payload did not serialize to a JSON object
    NotAnObject,

    /// Payload could not be serialized at all
    Serialize { reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, value } => {
                write!(f, "{} '{}' is not a valid SQL identifier", field, value)
            }
            Self::Duplicate { field, value } => {
                write!(f, "{} '{}' is listed more than once", field, value)
            }
            Self::NotScalar { column } => {
                write!(f, "value for column '{}' must be a scalar", column)
            }
            Self::NotAnObject => write!(f, "payload must be an object of column values"),
            Self::Serialize { reason } => write!(f, "payload could not be serialized: {}", reason),
        }
    }
}

impl std::error::Error for ValidationError {}
