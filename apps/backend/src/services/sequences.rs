//! Named id sequences.
//!
//! Each sequence is one row in `sequences`; `current_value` holds the last id
//! issued. Ids advance by a fixed step so that several environments can share
//! one id space without colliding.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::errors::domain::DomainError;
use crate::repos::sequences as sequences_repo;

/// Default step between consecutive ids of one sequence.
pub const OFFSET: i64 = 111;

/// Issues ids from named sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceGenerator {
    step: i64,
}

impl SequenceGenerator {
    pub fn new() -> Self {
        Self { step: OFFSET }
    }

    /// Generator with a custom step. The step must be positive.
    pub fn with_offset(step: i64) -> Result<Self, DomainError> {
        if step <= 0 {
            return Err(DomainError::validation(format!(
                "sequence step must be positive, got {step}"
            )));
        }
        Ok(Self { step })
    }

    pub fn step(&self) -> i64 {
        self.step
    }

    /// Present value of `name` without advancing it. An unknown sequence reads as 0.
    pub async fn get_current_id<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<i64, DomainError> {
        validate_name(name)?;

        let current = sequences_repo::find_by_name(conn, name)
            .await?
            .map_or(0, |seq| seq.current_value);

        debug!(sequence = name, current, "sequence read");
        Ok(current)
    }

    /// Advance `name` by the step and return the new value.
    ///
    /// The increment is a single upsert statement, so concurrent callers for
    /// the same name always receive distinct ids. An unknown sequence starts
    /// at 0 and yields the step.
    pub async fn get_next_id<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<i64, DomainError> {
        validate_name(name)?;

        let next = sequences_repo::advance(conn, name, self.step).await?;

        debug!(sequence = name, next, step = self.step, "sequence advanced");
        Ok(next)
    }

    /// Overwrite the stored value for `name` and return it.
    pub async fn set_next_id<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        name: &str,
        value: i64,
    ) -> Result<i64, DomainError> {
        validate_name(name)?;

        let stored = sequences_repo::overwrite(conn, name, value).await?;

        info!(sequence = name, value = stored, "sequence reset");
        Ok(stored)
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("sequence name must not be empty"));
    }
    Ok(())
}
