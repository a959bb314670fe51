use db_infra::DbInfraError;
use thiserror::Error;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;

/// Application-facing error for bootstrap, configuration and transaction plumbing.
///
/// Store and generator operations return [`DomainError`]; it converts into
/// `AppError` with `?` so callers working inside [`crate::db::txn::with_txn`]
/// can mix both.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Conflict: {detail}")]
    Conflict { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { code: ErrorCode, detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl AppError {
    /// The error code for any variant
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. }
            | AppError::NotFound { code, .. }
            | AppError::Conflict { code, .. }
            | AppError::Db { code, .. } => *code,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
            AppError::Config { .. } => ErrorCode::ConfigError,
            AppError::Internal { .. } => ErrorCode::Internal,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn conflict(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            detail: detail.into(),
        }
    }

    pub fn db(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Db {
            code,
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    /// Configuration failure with the underlying cause folded into the detail
    pub fn config(context: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::Config {
            detail: format!("{}: {source}", context.into()),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => {
                AppError::invalid(ErrorCode::ValidationError, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::Customer => ErrorCode::CustomerNotFound,
                    NotFoundKind::Sequence => ErrorCode::SequenceNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::DuplicateId => ErrorCode::DuplicateId,
                    ConflictKind::SequenceExhausted => ErrorCode::SequenceExhausted,
                    ConflictKind::Other(ref k) if k == "Unique" => ErrorCode::UniqueViolation,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::DbUnavailable => AppError::DbUnavailable,
                InfraErrorKind::Timeout => AppError::db(ErrorCode::DbTimeout, detail),
                _ => AppError::db(ErrorCode::DbError, detail),
            },
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::from(e).into()
    }
}

impl From<DbInfraError> for AppError {
    fn from(e: DbInfraError) -> Self {
        match e {
            DbInfraError::Config { message } => AppError::Config { detail: message },
            DbInfraError::Migration { message } => AppError::internal(message),
        }
    }
}
