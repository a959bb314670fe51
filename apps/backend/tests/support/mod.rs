#![allow(dead_code)]


use backend::config::db::{DbKind, RuntimeEnv};
use backend::infra::state::build_state;
use backend::state::app_state::AppState;
use backend::AppError;

/// Fresh, migrated in-memory database per call.
pub async fn build_test_state() -> Result<AppState, AppError> {
    build_state()
        .with_db(RuntimeEnv::Test, DbKind::SqliteMemory)
        .build()
        .await
}

/// Fresh database already holding the reference fixture rows.
pub async fn build_seeded_state() -> Result<AppState, AppError> {
    let state = build_test_state().await?;
    fixtures::seed(&state).await?;
    Ok(state)
}
