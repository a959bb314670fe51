use backend::db::require_db;
use backend::errors::domain::{ConflictKind, DomainError};
use backend::repos::customers as customers_repo;
use backend::services::{CUSTOMER_SEQUENCE, OFFSET};

use crate::support::factory::new_customer;
use crate::support::fixtures::{john_smith, CUSTOMER_SEQ_VALUE};
use crate::support::{build_seeded_state, build_test_state};

#[tokio::test]
async fn create_assigns_next_id_and_round_trips() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;

    let mut customer = new_customer("Jane", "Doe");
    let id = state.customers.create_customer(db, &mut customer).await?;

    assert_eq!(id, CUSTOMER_SEQ_VALUE + OFFSET);
    assert_eq!(customer.id, id);

    let stored = state.customers.get_customer(db, id).await?;
    assert_eq!(stored, customer);

    Ok(())
}

#[tokio::test]
async fn create_after_manual_advance_gets_following_id() -> Result<(), Box<dyn std::error::Error>>
{
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;

    let advanced = state.sequences.get_next_id(db, CUSTOMER_SEQUENCE).await?;
    assert_eq!(advanced, CUSTOMER_SEQ_VALUE + OFFSET);

    let mut customer = new_customer("Ann", "Lee");
    let id = state.customers.create_customer(db, &mut customer).await?;
    assert_eq!(id, CUSTOMER_SEQ_VALUE + 2 * OFFSET);

    Ok(())
}

#[tokio::test]
async fn consecutive_creates_get_distinct_ids() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let mut first = new_customer("Amy", "Ng");
    let mut second = new_customer("Bob", "Ng");
    let first_id = state.customers.create_customer(db, &mut first).await?;
    let second_id = state.customers.create_customer(db, &mut second).await?;

    // empty database: the sequence starts at 0
    assert_eq!(first_id, OFFSET);
    assert_eq!(second_id, 2 * OFFSET);
    assert_eq!(state.customers.get_customer(db, first_id).await?, first);
    assert_eq!(state.customers.get_customer(db, second_id).await?, second);

    Ok(())
}

#[tokio::test]
async fn create_ignores_caller_supplied_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;

    let mut customer = new_customer("Zed", "Ray");
    customer.id = 5;
    let id = state.customers.create_customer(db, &mut customer).await?;

    assert_ne!(id, 5);
    assert!(state.customers.get_customer(db, 5).await.is_err());

    Ok(())
}

#[tokio::test]
async fn id_clash_surfaces_as_conflict() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;

    // rewind so the next minted id is the fixture customer's
    state
        .sequences
        .set_next_id(db, CUSTOMER_SEQUENCE, john_smith().id - OFFSET)
        .await?;

    let mut customer = new_customer("Dup", "Licate");
    let err = state
        .customers
        .create_customer(db, &mut customer)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DuplicateId, _)
    ));

    // the fixture row is untouched
    let stored = customers_repo::find_by_id(db, john_smith().id).await?;
    assert_eq!(stored, Some(john_smith()));

    Ok(())
}
