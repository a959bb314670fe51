//! SeaORM adapter for the sequences table.
//!
//! `next_value` and `set_value` are single upsert statements with
//! `RETURNING`, so the database serialises concurrent writers on the row.

use sea_orm::sea_query::{Expr, OnConflict, Query};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};

use crate::entities::sequences;

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<sequences::Model>, DbErr> {
    sequences::Entity::find_by_id(name.to_owned()).one(conn).await
}

/// Advance `name` by `step` and return the stored value.
///
/// A missing row is created holding `step`. Returns `None`, leaving the row
/// untouched, when the increment would overflow `i64`.
pub async fn next_value<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    step: i64,
) -> Result<Option<i64>, DbErr> {
    let current = Expr::col((sequences::Entity, sequences::Column::CurrentValue));
    let on_conflict = OnConflict::column(sequences::Column::Name)
        .value(sequences::Column::CurrentValue, current.clone().add(step))
        .action_and_where(current.lte(i64::MAX - step))
        .to_owned();

    upsert_returning(conn, name, step, on_conflict).await
}

/// Overwrite the stored value for `name`, creating the row if needed.
pub async fn set_value<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    value: i64,
) -> Result<i64, DbErr> {
    let on_conflict = OnConflict::column(sequences::Column::Name)
        .update_column(sequences::Column::CurrentValue)
        .to_owned();

    upsert_returning(conn, name, value, on_conflict)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("sequence {name}")))
}

async fn upsert_returning<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    insert_value: i64,
    on_conflict: OnConflict,
) -> Result<Option<i64>, DbErr> {
    let mut insert = Query::insert();
    insert
        .into_table(sequences::Entity)
        .columns([sequences::Column::Name, sequences::Column::CurrentValue]);
    insert
        .values([name.into(), insert_value.into()])
        .map_err(|e| DbErr::Custom(format!("sequence upsert: {e}")))?;
    insert
        .on_conflict(on_conflict)
        .returning_col(sequences::Column::CurrentValue);

    let stmt = conn.get_database_backend().build(&insert);
    // no row back means the DO UPDATE guard rejected the conflicting row
    match conn.query_one(stmt).await? {
        Some(row) => row.try_get::<i64>("", "current_value").map(Some),
        None => Ok(None),
    }
}
