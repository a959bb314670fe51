//! Error codes surfaced by [`crate::error::AppError`].
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes render as SCREAMING_SNAKE_CASE.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request validation
    /// Generic validation failure
    ValidationError,

    // Resources
    /// Customer id has no row
    CustomerNotFound,
    /// Sequence name has no row
    SequenceNotFound,
    /// Any other missing record
    NotFound,

    // Conflicts
    /// Primary key collision
    DuplicateId,
    /// Sequence counter cannot advance further
    SequenceExhausted,
    /// Unique constraint violation not otherwise classified
    UniqueViolation,
    /// Other conflicts
    Conflict,

    // Infrastructure
    /// Database unreachable
    DbUnavailable,
    /// Database timed out
    DbTimeout,
    /// Unclassified database failure
    DbError,
    /// Bad configuration
    ConfigError,
    /// Internal error
    Internal,
}

impl ErrorCode {
    /// The canonical string for this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::CustomerNotFound => "CUSTOMER_NOT_FOUND",
            Self::SequenceNotFound => "SEQUENCE_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::DuplicateId => "DUPLICATE_ID",
            Self::SequenceExhausted => "SEQUENCE_EXHAUSTED",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DbError => "DB_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
