use backend::db::require_db;
use backend::entities::sequences;
use backend::errors::domain::{ConflictKind, DomainError};
use backend::services::{SequenceGenerator, OFFSET};
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::support::fixtures::{ACCOUNT_SEQ_VALUE, CUSTOMER_SEQ_VALUE, TRANSACTION_SEQ_VALUE};
use crate::support::{build_seeded_state, build_test_state};

#[tokio::test]
async fn next_id_steps_from_seeded_values() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;
    let gen = state.sequences;

    assert_eq!(gen.get_next_id(db, "Customer").await?, 12434);
    assert_eq!(gen.get_next_id(db, "Account").await?, 13566);
    assert_eq!(gen.get_next_id(db, "Transaction").await?, 14476);

    assert_eq!(gen.get_next_id(db, "Customer").await?, 12545);
    assert_eq!(gen.get_current_id(db, "Customer").await?, 12545);

    Ok(())
}

#[tokio::test]
async fn current_id_does_not_advance() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;
    let gen = state.sequences;

    assert_eq!(gen.get_current_id(db, "Customer").await?, CUSTOMER_SEQ_VALUE);
    assert_eq!(gen.get_current_id(db, "Customer").await?, CUSTOMER_SEQ_VALUE);
    assert_eq!(gen.get_current_id(db, "Account").await?, ACCOUNT_SEQ_VALUE);
    assert_eq!(
        gen.get_current_id(db, "Transaction").await?,
        TRANSACTION_SEQ_VALUE
    );

    Ok(())
}

#[tokio::test]
async fn empty_name_is_rejected_without_touching_storage(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;
    let gen = state.sequences;

    let rows_before = sequences::Entity::find().all(db).await?;

    for name in ["", "  "] {
        assert!(matches!(
            gen.get_current_id(db, name).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            gen.get_next_id(db, name).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            gen.set_next_id(db, name, 42).await,
            Err(DomainError::Validation(_))
        ));
    }

    let rows_after = sequences::Entity::find().all(db).await?;
    assert_eq!(rows_before, rows_after);

    Ok(())
}

#[tokio::test]
async fn unknown_sequence_reads_zero_and_starts_at_step(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let gen = state.sequences;

    assert_eq!(gen.get_current_id(db, "Loan").await?, 0);
    // reading must not create the row
    assert_eq!(sequences::Entity::find().count(db).await?, 0);

    assert_eq!(gen.get_next_id(db, "Loan").await?, OFFSET);
    assert_eq!(gen.get_current_id(db, "Loan").await?, OFFSET);
    assert_eq!(gen.get_next_id(db, "Loan").await?, 2 * OFFSET);

    Ok(())
}

#[tokio::test]
async fn set_next_id_overwrites_and_returns_new_value() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;
    let gen = state.sequences;

    assert_eq!(gen.set_next_id(db, "Customer", 50_000).await?, 50_000);
    assert_eq!(gen.get_current_id(db, "Customer").await?, 50_000);
    assert_eq!(gen.get_next_id(db, "Customer").await?, 50_000 + OFFSET);

    // setting backwards is allowed
    assert_eq!(gen.set_next_id(db, "Customer", 10).await?, 10);
    assert_eq!(gen.get_next_id(db, "Customer").await?, 10 + OFFSET);

    // and creates missing sequences
    assert_eq!(gen.set_next_id(db, "Statement", 700).await?, 700);
    assert_eq!(gen.get_current_id(db, "Statement").await?, 700);

    Ok(())
}

#[tokio::test]
async fn distinct_names_are_independent() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;
    let gen = state.sequences;

    gen.get_next_id(db, "Account").await?;
    gen.get_next_id(db, "Account").await?;

    assert_eq!(gen.get_current_id(db, "Customer").await?, CUSTOMER_SEQ_VALUE);
    assert_eq!(
        gen.get_current_id(db, "Transaction").await?,
        TRANSACTION_SEQ_VALUE
    );
    assert_eq!(
        gen.get_current_id(db, "Account").await?,
        ACCOUNT_SEQ_VALUE + 2 * OFFSET
    );

    Ok(())
}

#[tokio::test]
async fn custom_step_is_honoured() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let gen = SequenceGenerator::with_offset(1)?;

    gen.set_next_id(db, "Ticket", 99).await?;
    assert_eq!(gen.get_next_id(db, "Ticket").await?, 100);
    assert_eq!(gen.get_next_id(db, "Ticket").await?, 101);

    Ok(())
}

#[tokio::test]
async fn names_are_case_sensitive() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;
    let gen = state.sequences;

    assert_eq!(gen.get_current_id(db, "customer").await?, 0);
    assert_eq!(gen.get_current_id(db, "Customer").await?, CUSTOMER_SEQ_VALUE);

    Ok(())
}

#[tokio::test]
async fn overflowing_advance_is_rejected_and_leaves_counter_intact(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;
    let gen = state.sequences;

    gen.set_next_id(db, "Big", i64::MAX - 5).await?;

    let err = gen.get_next_id(db, "Big").await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::SequenceExhausted, _)
    ));

    // still an integer, still readable, still resettable
    assert_eq!(gen.get_current_id(db, "Big").await?, i64::MAX - 5);
    assert!(gen.get_next_id(db, "Big").await.is_err());

    // the last full step up to i64::MAX is still allowed
    gen.set_next_id(db, "Big", i64::MAX - OFFSET).await?;
    assert_eq!(gen.get_next_id(db, "Big").await?, i64::MAX);
    assert_eq!(gen.get_current_id(db, "Big").await?, i64::MAX);

    gen.set_next_id(db, "Big", 0).await?;
    assert_eq!(gen.get_next_id(db, "Big").await?, OFFSET);

    Ok(())
}
