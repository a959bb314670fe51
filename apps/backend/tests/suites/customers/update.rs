use backend::db::require_db;
use backend::errors::domain::{DomainError, NotFoundKind};
use backend::repos::customers::Address;

use crate::support::build_seeded_state;
use crate::support::factory::new_customer;
use crate::support::fixtures::{john_smith, JOHN_SMITH_ID};

#[tokio::test]
async fn update_changes_every_mutable_field() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;
    let store = state.customers;

    let mut bystander = new_customer("Bea", "Stander");
    store.create_customer(db, &mut bystander).await?;

    let mut customer = new_customer("Old", "Name");
    let id = store.create_customer(db, &mut customer).await?;

    customer.first_name = "New".into();
    customer.last_name = "Surname".into();
    customer.address = Address::new("9 Ocean Ave", "Santa Monica", "CA", "90401");
    customer.phone_number = "310-555-0199".into();
    customer.ssn = "111-22-3333".into();
    customer.username = "new_login".into();
    customer.password = "rotated".into();
    store.update_customer(db, &customer).await?;

    let stored = store.get_customer(db, id).await?;
    assert_eq!(stored, customer);
    assert_eq!(stored.id, id);

    // unrelated rows are untouched
    assert_eq!(store.get_customer(db, bystander.id).await?, bystander);
    assert_eq!(store.get_customer(db, JOHN_SMITH_ID).await?, john_smith());

    // alternate keys follow the update
    assert_eq!(
        store.get_customer_by_ssn(db, Some("111-22-3333")).await?,
        Some(customer.clone())
    );
    assert_eq!(
        store
            .get_customer_by_credentials(db, Some("new_login"), Some("rotated"))
            .await?,
        Some(customer)
    );

    Ok(())
}

#[tokio::test]
async fn update_of_fixture_customer_keeps_id() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;
    let store = state.customers;

    let mut john = store.get_customer(db, JOHN_SMITH_ID).await?;
    john.address.street = "1 Infinite Loop".into();
    store.update_customer(db, &john).await?;

    let stored = store.get_customer(db, JOHN_SMITH_ID).await?;
    assert_eq!(stored.address.street, "1 Infinite Loop");
    assert_eq!(stored.first_name, "John");
    assert_eq!(stored.id, JOHN_SMITH_ID);

    Ok(())
}

#[tokio::test]
async fn update_of_missing_customer_is_not_found() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_seeded_state().await?;
    let db = require_db(&state)?;

    let mut ghost = new_customer("Gus", "Ghost");
    ghost.id = 424_242;

    let err = state.customers.update_customer(db, &ghost).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Customer, _)
    ));
    assert!(state.customers.get_customer(db, 424_242).await.is_err());

    Ok(())
}
