//! SeaORM -> DomainError translation helpers.
//!
//! Adapters surface `sea_orm::DbErr`; repos and services convert it into
//! `crate::errors::domain::DomainError` here. Raw driver text only reaches the
//! logs, and always through [`Redacted`].

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let prefix = "UNIQUE constraint failed: ";
    let start = error_msg.find(prefix)? + prefix.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
        .filter(|s| !s.is_empty())
}

fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "customers.id" => Some((ConflictKind::DuplicateId, "Customer id already exists")),
        "sequences.name" => Some((ConflictKind::DuplicateId, "Sequence already exists")),
        _ => None,
    }
}

fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("customers_pkey") {
        return Some((ConflictKind::DuplicateId, "Customer id already exists"));
    }
    if error_msg.contains("sequences_pkey") {
        return Some((ConflictKind::DuplicateId, "Sequence already exists"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(what) => {
            let kind = if what.starts_with("customer") {
                NotFoundKind::Customer
            } else if what.starts_with("sequence") {
                NotFoundKind::Sequence
            } else {
                NotFoundKind::Other("Record".into())
            };
            return DomainError::not_found(kind, format!("{what} not found"));
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Type(_) | sea_orm::DbErr::TryIntoErr { .. } => {
            error!(raw_error = %Redacted(&error_msg), "Stored row failed to decode");
            return DomainError::infra(InfraErrorKind::DataCorruption, "Stored row is corrupt");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if let Some((kind, detail)) =
            extract_sqlite_table_column(&error_msg).and_then(map_sqlite_table_column_to_conflict)
        {
            return DomainError::conflict(kind, detail);
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23502") || error_msg.contains("NOT NULL constraint failed")
    {
        warn!(raw_error = %Redacted(&error_msg), "Not-null constraint violation");
        return DomainError::validation("Required field missing");
    }

    if error_msg.contains("timeout")
        || error_msg.contains("pool timed out")
        || error_msg.contains("database is locked")
    {
        warn!(raw_error = %Redacted(&error_msg), "Database timeout or lock contention");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}
