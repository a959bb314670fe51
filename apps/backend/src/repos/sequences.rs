//! Sequence repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::sequences_sea as sequences_adapter;
use crate::entities::sequences;
use crate::errors::domain::{ConflictKind, DomainError};

/// A named id counter. `current_value` is the last id issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub name: String,
    pub current_value: i64,
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<Sequence>, DomainError> {
    let row = sequences_adapter::find_by_name(conn, name).await?;
    Ok(row.map(Sequence::from))
}

pub async fn advance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    step: i64,
) -> Result<i64, DomainError> {
    sequences_adapter::next_value(conn, name, step)
        .await?
        .ok_or_else(|| {
            DomainError::conflict(
                ConflictKind::SequenceExhausted,
                format!("sequence {name} cannot advance by {step} without overflowing"),
            )
        })
}

pub async fn overwrite<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    value: i64,
) -> Result<i64, DomainError> {
    Ok(sequences_adapter::set_value(conn, name, value).await?)
}

impl From<sequences::Model> for Sequence {
    fn from(model: sequences::Model) -> Self {
        Self {
            name: model.name,
            current_value: model.current_value,
        }
    }
}
