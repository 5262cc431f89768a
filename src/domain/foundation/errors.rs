//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur while validating caller-supplied values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at most {max} characters, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' must be at most {max}, got {actual}")]
    OutOfRange { field: String, max: u32, actual: u32 },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a too-long validation error.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, max: u32, actual: u32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            max,
            actual,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::EmptyField { .. } => ErrorCode::EmptyField,
            ValidationError::TooLong { .. } => ErrorCode::TooLong,
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
        }
    }
}

/// Error codes organized by category.
///
/// These are the stable identifiers sent to clients; messages may change,
/// codes may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    EmptyField,
    TooLong,
    OutOfRange,
    InvalidMessage,

    // Lookup errors
    NameConflict,
    SessionNotFound,
    ConnectionAlreadyJoined,

    // State errors
    InvalidStateTransition,

    // Authorization errors
    NotPermitted,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::TooLong => "TOO_LONG",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidMessage => "INVALID_MESSAGE",
            ErrorCode::NameConflict => "NAME_CONFLICT",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::ConnectionAlreadyJoined => "CONNECTION_ALREADY_JOINED",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::NotPermitted => "NOT_PERMITTED",
        };
        write!(f, "{}", s)
    }
}
