//! Customer records: create, lookup by id or alternate key, update.
//!
//! Lookup by id fails when nothing matches. Lookups by SSN or by
//! username/password return `None` instead; callers rely on that difference.

use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::errors::domain::{DomainError, NotFoundKind};
use crate::logging::{pii::Redacted, security};
use crate::repos::customers::{self as customers_repo, Customer};
use crate::services::sequences::SequenceGenerator;

/// Sequence that customer ids are drawn from.
pub const CUSTOMER_SEQUENCE: &str = "Customer";

/// Customer data access, minting ids from [`CUSTOMER_SEQUENCE`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerStore {
    sequences: SequenceGenerator,
}

impl CustomerStore {
    pub fn new(sequences: SequenceGenerator) -> Self {
        Self { sequences }
    }

    /// Assign the next customer id to `customer`, insert it, and return the id.
    ///
    /// Run inside a transaction to keep a failed insert from consuming an id.
    pub async fn create_customer<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        customer: &mut Customer,
    ) -> Result<i64, DomainError> {
        let id = self
            .sequences
            .get_next_id(conn, CUSTOMER_SEQUENCE)
            .await?;
        customer.id = id;

        customers_repo::insert_customer(conn, customer).await?;

        info!(customer_id = id, "customer created");
        Ok(id)
    }

    pub async fn get_customer<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        customer_id: i64,
    ) -> Result<Customer, DomainError> {
        debug!(customer_id, "customer lookup");

        customers_repo::find_by_id(conn, customer_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Customer,
                    format!("Customer {customer_id} not found"),
                )
            })
    }

    pub async fn get_customer_by_ssn<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        ssn: Option<&str>,
    ) -> Result<Option<Customer>, DomainError> {
        let Some(ssn) = ssn else {
            return Ok(None);
        };

        let found = customers_repo::find_by_ssn(conn, ssn).await?;
        security::ssn_lookup(ssn, found.is_some());
        Ok(found)
    }

    /// Exact, case-sensitive match on both fields. Any missing argument yields `None`.
    pub async fn get_customer_by_credentials<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Option<Customer>, DomainError> {
        let (Some(username), Some(password)) = (username, password) else {
            return Ok(None);
        };

        let found = customers_repo::find_by_credentials(conn, username, password).await?;
        if found.is_none() {
            security::credentials_rejected(username);
        }
        Ok(found)
    }

    /// Overwrite every mutable field of the customer with `customer.id`.
    pub async fn update_customer<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        customer: &Customer,
    ) -> Result<(), DomainError> {
        customers_repo::update_customer(conn, customer).await?;

        info!(
            customer_id = customer.id,
            ssn = %Redacted(&customer.ssn),
            "customer updated"
        );
        Ok(())
    }
}
