// Tests for rollback policy behavior

use backend::db::require_db;
use backend::db::txn::with_txn;
use backend::db::txn_policy::{current, TxnPolicy};
use backend::errors::ErrorCode;
use backend::AppError;
use tracing::debug;

use crate::support::factory::new_customer;
use crate::support::fixtures::CUSTOMER_SEQ_VALUE;
use crate::support::{build_seeded_state, build_test_state};

#[tokio::test]
async fn test_rollback_policy_discards_successful_work() -> Result<(), Box<dyn std::error::Error>>
{
    assert_eq!(current(), TxnPolicy::RollbackOnOk);

    let state = build_seeded_state().await?;
    let store = state.customers;
    let customer = new_customer("Tess", "Txn");

    let id = with_txn(&state, |txn| {
        let mut customer = customer.clone();
        Box::pin(async move {
            let id = store.create_customer(txn, &mut customer).await?;
            Ok::<_, AppError>(id)
        })
    })
    .await?;
    debug!(id, "created inside rolled-back txn");

    let db = require_db(&state)?;
    assert!(store.get_customer(db, id).await.is_err());
    // the id reservation rolled back with the row
    assert_eq!(
        state.sequences.get_current_id(db, "Customer").await?,
        CUSTOMER_SEQ_VALUE
    );

    Ok(())
}

#[tokio::test]
async fn test_rollback_on_error_returns_original_error() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_seeded_state().await?;
    let gen = state.sequences;

    let result: Result<(), AppError> = with_txn(&state, |txn| {
        Box::pin(async move {
            gen.get_next_id(txn, "Account").await?;
            Err(AppError::invalid(ErrorCode::ValidationError, "forced failure"))
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
    assert!(err.to_string().contains("forced failure"));

    let db = require_db(&state)?;
    assert_eq!(gen.get_current_id(db, "Account").await?, 13455);

    Ok(())
}

#[tokio::test]
async fn test_domain_errors_convert_inside_txn() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let store = state.customers;

    let result = with_txn(&state, |txn| {
        Box::pin(async move {
            let customer = store.get_customer(txn, -1).await?;
            Ok::<_, AppError>(customer)
        })
    })
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.code(), ErrorCode::CustomerNotFound);

    Ok(())
}

#[tokio::test]
async fn test_with_txn_without_db_is_unavailable() {
    let state = backend::build_state().build().await.unwrap();

    let result = with_txn(&state, |_txn| Box::pin(async move { Ok::<_, AppError>(()) })).await;

    assert!(matches!(result, Err(AppError::DbUnavailable)));
}
