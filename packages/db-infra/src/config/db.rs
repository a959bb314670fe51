use std::env;

use crate::error::DbInfraError;

/// Runtime environment the process is operating in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    /// Production runtime
    Prod,
    /// Test runtime - enforces safety rules on database names
    Test,
}

/// Storage engine and mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// Engine-specific per-connection session settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbSettings {
    Postgres {
        app_name: String,
        statement_timeout: String,
        idle_in_transaction_timeout: String,
        lock_timeout: Option<String>,
    },
    Sqlite {
        busy_timeout_ms: u64,
    },
}

/// Pool sizing plus the session settings applied to every new connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionSettings {
    pub pool_min: u32,
    pub pool_max: u32,
    pub acquire_timeout_ms: u64,
    pub db_settings: DbSettings,
}

/// Reject environment/engine combinations that are never valid.
pub fn validate_db_config(env: RuntimeEnv, db_kind: DbKind) -> Result<(), DbInfraError> {
    if env == RuntimeEnv::Prod && db_kind == DbKind::SqliteMemory {
        return Err(DbInfraError::config(
            "SQLite in-memory databases are not allowed in the Prod environment",
        ));
    }
    Ok(())
}

/// Builds the connection string for the given environment, engine and owner.
pub fn make_conn_spec(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<String, DbInfraError> {
    match db_kind {
        DbKind::Postgres => {
            let host = host();
            let port = port();
            let db_name = db_name(env)?;
            let (username, password) = credentials(owner)?;
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let file = sqlite_file_spec(db_kind, env)?;
            Ok(format!("sqlite://{file}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Path of the SQLite database file for the environment.
///
/// `PARABANK_SQLITE_FILE` overrides the per-environment default.
pub fn sqlite_file_spec(db_kind: DbKind, env: RuntimeEnv) -> Result<String, DbInfraError> {
    if db_kind != DbKind::SqliteFile {
        return Err(DbInfraError::config(format!(
            "sqlite_file_spec only applies to SqliteFile, got {db_kind:?}"
        )));
    }
    if let Ok(file) = env::var("PARABANK_SQLITE_FILE") {
        if !file.trim().is_empty() {
            return Ok(file);
        }
    }
    Ok(match env {
        RuntimeEnv::Prod => "parabank.db".to_string(),
        RuntimeEnv::Test => "parabank_test.db".to_string(),
    })
}

/// Pool and session settings, with env overrides.
pub fn build_connection_settings(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<ConnectionSettings, DbInfraError> {
    let (default_min, default_max) = match (env, db_kind) {
        // every connection to :memory: is a distinct database
        (_, DbKind::SqliteMemory) => (1, 1),
        (RuntimeEnv::Test, _) => (1, 4),
        (RuntimeEnv::Prod, _) => (2, 16),
    };

    let mut pool_min = env_u32("PARABANK_DB_POOL_MIN")?.unwrap_or(default_min);
    let mut pool_max = env_u32("PARABANK_DB_POOL_MAX")?.unwrap_or(default_max);
    if db_kind == DbKind::SqliteMemory {
        pool_min = 1;
        pool_max = 1;
    }
    if pool_max == 0 || pool_min > pool_max {
        return Err(DbInfraError::config(format!(
            "invalid pool bounds: min={pool_min} max={pool_max}"
        )));
    }

    let acquire_timeout_ms = env_u64("PARABANK_DB_ACQUIRE_TIMEOUT_MS")?.unwrap_or(5_000);

    let db_settings = match db_kind {
        DbKind::Postgres => DbSettings::Postgres {
            app_name: "parabank".to_string(),
            statement_timeout: "15s".to_string(),
            idle_in_transaction_timeout: "30s".to_string(),
            lock_timeout: Some("5s".to_string()),
        },
        DbKind::SqliteFile | DbKind::SqliteMemory => DbSettings::Sqlite {
            busy_timeout_ms: env_u64("PARABANK_SQLITE_BUSY_TIMEOUT_MS")?.unwrap_or(5_000),
        },
    };

    Ok(ConnectionSettings {
        pool_min,
        pool_max,
        acquire_timeout_ms,
        db_settings,
    })
}

/// Build ordered session-level SQL statements for the given database kind and settings.
pub fn build_session_statements(db_kind: DbKind, settings: &DbSettings) -> Vec<String> {
    match (db_kind, settings) {
        (DbKind::SqliteFile | DbKind::SqliteMemory, DbSettings::Sqlite { busy_timeout_ms }) => {
            vec![
                "PRAGMA foreign_keys = ON;".to_string(),
                format!("PRAGMA busy_timeout = {busy_timeout_ms};"),
            ]
        }
        (
            DbKind::Postgres,
            DbSettings::Postgres {
                app_name,
                statement_timeout,
                idle_in_transaction_timeout,
                lock_timeout,
            },
        ) => {
            let mut stmts = vec![
                // application_name is safe to single-quote; minimal escaping
                format!("SET application_name = '{}';", app_name.replace('\'', "''")),
                "SET timezone = 'UTC';".to_string(),
                format!("SET statement_timeout = '{statement_timeout}';"),
                format!("SET idle_in_transaction_session_timeout = '{idle_in_transaction_timeout}';"),
            ];
            if let Some(lock_timeout) = lock_timeout {
                stmts.push(format!("SET lock_timeout = '{lock_timeout}';"));
            }
            stmts
        }
        _ => Vec::new(),
    }
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> String {
    env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string())
}

/// Get database name based on environment
fn db_name(env: RuntimeEnv) -> Result<String, DbInfraError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            // Enforce safety: test DB must end with "_test"
            if !db_name.ends_with("_test") {
                return Err(DbInfraError::config(format!(
                    "Test environment requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

/// Get database credentials based on owner
fn credentials(owner: DbOwner) -> Result<(String, String), DbInfraError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("PARABANK_OWNER_USER")?,
            must_var("PARABANK_OWNER_PASSWORD")?,
        )),
    }
}

/// Get required environment variable or return error
fn must_var(name: &str) -> Result<String, DbInfraError> {
    env::var(name).map_err(|_| {
        DbInfraError::config(format!("Required environment variable '{name}' is not set"))
    })
}

fn env_u64(name: &str) -> Result<Option<u64>, DbInfraError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| DbInfraError::config(format!("'{name}' must be an unsigned integer, got '{raw}'"))),
        Err(_) => Ok(None),
    }
}

fn env_u32(name: &str) -> Result<Option<u32>, DbInfraError> {
    env_u64(name)?
        .map(|v| {
            u32::try_from(v)
                .map_err(|_| DbInfraError::config(format!("'{name}' is out of range, got {v}")))
        })
        .transpose()
}
