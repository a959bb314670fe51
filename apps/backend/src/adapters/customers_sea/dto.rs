//! DTOs for customers_sea adapter.

/// Full row for a new customer. The id is minted before insert.
#[derive(Debug, Clone)]
pub struct CustomerCreate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub ssn: String,
    pub username: String,
    pub password: String,
}

/// Every mutable column, keyed by the immutable id.
#[derive(Debug, Clone)]
pub struct CustomerUpdate {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub ssn: String,
    pub username: String,
    pub password: String,
}
