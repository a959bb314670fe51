//! Customer repository functions for domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::customers_sea::{self as customers_adapter, CustomerCreate, CustomerUpdate};
use crate::entities::customers;
use crate::errors::domain::DomainError;

/// Postal address owned by a customer. Stored inline on the customer row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip_code: zip_code.into(),
        }
    }
}

/// Customer domain model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub address: Address,
    pub phone_number: String,
    pub ssn: String,
    pub username: String,
    pub password: String,
}

pub async fn insert_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer: &Customer,
) -> Result<Customer, DomainError> {
    let row = customers_adapter::insert_customer(conn, CustomerCreate::from(customer)).await?;
    Ok(Customer::from(row))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
) -> Result<Option<Customer>, DomainError> {
    let row = customers_adapter::find_by_id(conn, customer_id).await?;
    Ok(row.map(Customer::from))
}

pub async fn find_by_ssn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ssn: &str,
) -> Result<Option<Customer>, DomainError> {
    let row = customers_adapter::find_by_ssn(conn, ssn).await?;
    Ok(row.map(Customer::from))
}

pub async fn find_by_credentials<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    password: &str,
) -> Result<Option<Customer>, DomainError> {
    let row = customers_adapter::find_by_credentials(conn, username, password).await?;
    Ok(row.map(Customer::from))
}

pub async fn update_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer: &Customer,
) -> Result<(), DomainError> {
    customers_adapter::update_customer(conn, CustomerUpdate::from(customer)).await?;
    Ok(())
}

// Conversions between SeaORM models and domain models

impl From<customers::Model> for Customer {
    fn from(model: customers::Model) -> Self {
        Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            address: Address {
                street: model.street,
                city: model.city,
                state: model.state,
                zip_code: model.zip_code,
            },
            phone_number: model.phone_number,
            ssn: model.ssn,
            username: model.username,
            password: model.password,
        }
    }
}

impl From<&Customer> for CustomerCreate {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            street: c.address.street.clone(),
            city: c.address.city.clone(),
            state: c.address.state.clone(),
            zip_code: c.address.zip_code.clone(),
            phone_number: c.phone_number.clone(),
            ssn: c.ssn.clone(),
            username: c.username.clone(),
            password: c.password.clone(),
        }
    }
}

impl From<&Customer> for CustomerUpdate {
    fn from(c: &Customer) -> Self {
        Self {
            id: c.id,
            first_name: c.first_name.clone(),
            last_name: c.last_name.clone(),
            street: c.address.street.clone(),
            city: c.address.city.clone(),
            state: c.address.state.clone(),
            zip_code: c.address.zip_code.clone(),
            phone_number: c.phone_number.clone(),
            ssn: c.ssn.clone(),
            username: c.username.clone(),
            password: c.password.clone(),
        }
    }
}
