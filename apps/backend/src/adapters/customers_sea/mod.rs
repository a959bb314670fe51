//! SeaORM adapter for the customers table.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entities::customers;

pub mod dto;

pub use dto::{CustomerCreate, CustomerUpdate};

// Adapter functions return DbErr; repos layer maps to DomainError via From<DbErr>.

pub async fn insert_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CustomerCreate,
) -> Result<customers::Model, sea_orm::DbErr> {
    let active = customers::ActiveModel {
        id: Set(dto.id),
        first_name: Set(dto.first_name),
        last_name: Set(dto.last_name),
        street: Set(dto.street),
        city: Set(dto.city),
        state: Set(dto.state),
        zip_code: Set(dto.zip_code),
        phone_number: Set(dto.phone_number),
        ssn: Set(dto.ssn),
        username: Set(dto.username),
        password: Set(dto.password),
    };

    active.insert(conn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    customer_id: i64,
) -> Result<Option<customers::Model>, sea_orm::DbErr> {
    customers::Entity::find_by_id(customer_id).one(conn).await
}

/// SSN is not unique in the schema; the lowest id wins.
pub async fn find_by_ssn<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ssn: &str,
) -> Result<Option<customers::Model>, sea_orm::DbErr> {
    customers::Entity::find()
        .filter(customers::Column::Ssn.eq(ssn))
        .order_by_asc(customers::Column::Id)
        .one(conn)
        .await
}

pub async fn find_by_credentials<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    password: &str,
) -> Result<Option<customers::Model>, sea_orm::DbErr> {
    customers::Entity::find()
        .filter(customers::Column::Username.eq(username))
        .filter(customers::Column::Password.eq(password))
        .order_by_asc(customers::Column::Id)
        .one(conn)
        .await
}

/// Overwrite every mutable column. Fails with `RecordNotFound` when no row has `dto.id`.
pub async fn update_customer<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CustomerUpdate,
) -> Result<(), sea_orm::DbErr> {
    let customer_id = dto.id;
    let result = customers::Entity::update_many()
        .col_expr(customers::Column::FirstName, Expr::value(dto.first_name))
        .col_expr(customers::Column::LastName, Expr::value(dto.last_name))
        .col_expr(customers::Column::Street, Expr::value(dto.street))
        .col_expr(customers::Column::City, Expr::value(dto.city))
        .col_expr(customers::Column::State, Expr::value(dto.state))
        .col_expr(customers::Column::ZipCode, Expr::value(dto.zip_code))
        .col_expr(customers::Column::PhoneNumber, Expr::value(dto.phone_number))
        .col_expr(customers::Column::Ssn, Expr::value(dto.ssn))
        .col_expr(customers::Column::Username, Expr::value(dto.username))
        .col_expr(customers::Column::Password, Expr::value(dto.password))
        .filter(customers::Column::Id.eq(customer_id))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return Err(sea_orm::DbErr::RecordNotFound(format!(
            "customer {customer_id}"
        )));
    }

    Ok(())
}
