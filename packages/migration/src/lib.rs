pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection};
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};

mod m20260901_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260901_000001_init::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl std::str::FromStr for MigrationCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "fresh" => Ok(Self::Fresh),
            "reset" => Ok(Self::Reset),
            "refresh" => Ok(Self::Refresh),
            "status" => Ok(Self::Status),
            other => Err(format!("unknown migration command: {other}")),
        }
    }
}

/// Run `command` against an open connection.
///
/// Shared by the CLI (through `db_infra`) and by backend bootstrap.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = snapshot(db).await?;
    tracing::info!(
        ?command,
        backend = %before.backend,
        database = %before.database,
        defined = before.defined,
        applied = before.applied,
        "migrate=begin"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    if let Err(e) = result {
        tracing::error!(?command, error = %e, "migrate=failed");
        return Err(e);
    }

    if command != MigrationCommand::Status {
        let after = snapshot(db).await?;
        tracing::info!(?command, applied = after.applied, "migrate=end");
    }
    Ok(())
}

struct MigrationSnapshot {
    backend: String,
    database: String,
    applied: usize,
    defined: usize,
}

async fn snapshot(db: &DatabaseConnection) -> Result<MigrationSnapshot, DbErr> {
    let backend = db.get_database_backend();

    let sql = match backend {
        DatabaseBackend::Postgres => Some("SELECT current_database() AS name"),
        DatabaseBackend::Sqlite => {
            Some("SELECT file AS name FROM pragma_database_list WHERE name = 'main'")
        }
        _ => None,
    };
    let database = match sql {
        Some(sql) => db
            .query_one(Statement::from_string(backend, sql))
            .await?
            .and_then(|row| row.try_get::<String>("", "name").ok())
            .map(|name| if name.is_empty() { ":memory:".to_string() } else { name })
            .unwrap_or_else(|| "<unknown>".to_string()),
        None => "<unsupported>".to_string(),
    };

    Ok(MigrationSnapshot {
        backend: format!("{backend:?}"),
        database,
        applied: count_applied_migrations(db).await?,
        defined: Migrator::migrations().len(),
    })
}

/// Number of applied migrations; 0 when the migration table does not exist yet.
pub async fn count_applied_migrations(db: &DatabaseConnection) -> Result<usize, DbErr> {
    match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => Ok(migrations.len()),
        Err(DbErr::Exec(_)) => Ok(0),
        Err(e) => Err(e),
    }
}
