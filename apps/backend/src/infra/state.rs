use crate::config::db::{DbKind, RuntimeEnv};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::services::SequenceGenerator;
use crate::state::app_state::AppState;

/// Builder for creating AppState instances (used in both tests and binaries)
pub struct StateBuilder {
    sequences: SequenceGenerator,
    db: Option<(RuntimeEnv, DbKind)>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            sequences: SequenceGenerator::new(),
            db: None,
        }
    }

    pub fn with_db(mut self, env: RuntimeEnv, db_kind: DbKind) -> Self {
        self.db = Some((env, db_kind));
        self
    }

    pub fn with_sequences(mut self, sequences: SequenceGenerator) -> Self {
        self.sequences = sequences;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        match self.db {
            Some((env, db_kind)) => {
                // single entrypoint: build + migrate
                let conn = bootstrap_db(env, db_kind).await?;
                Ok(AppState::new(conn, self.sequences))
            }
            None => Ok(AppState::without_db(self.sequences)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
