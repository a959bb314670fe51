use std::process;
use std::str::FromStr;
use std::time::Duration;

use db_infra::config::db::{
    build_connection_settings, build_session_statements, make_conn_spec, validate_db_config,
    ConnectionSettings, DbSettings,
};
use db_infra::{build_admin_pool, orchestrate_migration_internal, sanitize_db_url};
use migration::MigrationCommand;
use sea_orm::{DatabaseConnection, SqlxPostgresConnector, SqlxSqliteConnector};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{info, trace};

use super::{DbKind, DbOwner, RuntimeEnv};
use crate::error::AppError;

fn get_db_engine(db_kind: DbKind) -> &'static str {
    match db_kind {
        DbKind::Postgres => "postgresql",
        DbKind::SqliteFile | DbKind::SqliteMemory => "sqlite",
    }
}

async fn apply_sqlite_config(
    conn: &mut sqlx::SqliteConnection,
    settings: &DbSettings,
) -> Result<(), sqlx::Error> {
    for stmt in build_session_statements(DbKind::SqliteMemory, settings) {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

async fn apply_postgres_config(
    conn: &mut sqlx::PgConnection,
    settings: &DbSettings,
) -> Result<(), sqlx::Error> {
    for stmt in build_session_statements(DbKind::Postgres, settings) {
        sqlx::query(&stmt).execute(&mut *conn).await?;
    }
    Ok(())
}

/// Build the app pool *and* guarantee the schema is current.
///
/// - SqliteMemory: create the shared pool, migrate on it, return it. Every
///   `:memory:` connection is its own database, so the pool holding the
///   schema must be the one handed out.
/// - SqliteFile / Postgres: migrate on a one-connection admin pool, drop it,
///   then open the shared pool.
pub async fn bootstrap_db(
    env: RuntimeEnv,
    db_kind: DbKind,
) -> Result<DatabaseConnection, AppError> {
    validate_db_config(env, db_kind)?;

    info!(
        "bootstrap=start env={:?} db_kind={:?} engine={} pid={}",
        env,
        db_kind,
        get_db_engine(db_kind),
        process::id()
    );

    let settings = build_connection_settings(env, db_kind)?;

    let shared_pool = match db_kind {
        DbKind::SqliteMemory => {
            let pool = build_pool(env, db_kind, &settings).await?;
            orchestrate_migration_internal(&pool, env, db_kind, MigrationCommand::Up).await?;
            pool
        }
        _ => {
            let admin_pool = build_admin_pool(env, db_kind).await?;
            orchestrate_migration_internal(&admin_pool, env, db_kind, MigrationCommand::Up)
                .await?;
            admin_pool
                .close()
                .await
                .map_err(|e| AppError::config("failed to close admin pool", e))?;
            build_pool(env, db_kind, &settings).await?
        }
    };

    info!("bootstrap=ready");
    Ok(shared_pool)
}

/// Open the application pool with per-connection session settings applied.
pub async fn build_pool(
    env: RuntimeEnv,
    db_kind: DbKind,
    pool_cfg: &ConnectionSettings,
) -> Result<DatabaseConnection, AppError> {
    let url = make_conn_spec(env, db_kind, DbOwner::App)?;

    match db_kind {
        // ---------- SQLite (file and in-memory) ----------
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let connect_opts = SqliteConnectOptions::from_str(&url)
                .map_err(|e| AppError::config("invalid SQLite connection options", e))?
                .create_if_missing(true);

            let mut pool_opts = SqlitePoolOptions::new()
                .min_connections(pool_cfg.pool_min)
                .max_connections(pool_cfg.pool_max)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms));
            if db_kind == DbKind::SqliteMemory {
                // the database dies with its only connection
                pool_opts = pool_opts.idle_timeout(None).max_lifetime(None);
            }

            let db_settings = pool_cfg.db_settings.clone();
            let pool: SqlitePool = pool_opts
                .after_connect(move |conn, _meta| {
                    let settings = db_settings.clone();
                    Box::pin(async move {
                        apply_sqlite_config(conn, &settings).await?;
                        trace!("db=sqlite hook=after_connect ok");
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect_with(connect_opts)
                .await
                .map_err(|e| AppError::config("failed to create SQLite connection pool", e))?;

            // warm-up to ensure hook ran on initial connection(s)
            if pool_cfg.pool_min > 0 {
                let mut conn = pool.acquire().await.map_err(|e| {
                    AppError::config("connection acquisition failed during warmup", e)
                })?;
                sqlx::query("SELECT 1;")
                    .execute(&mut *conn)
                    .await
                    .map_err(|e| AppError::config("warmup query failed", e))?;
            }

            info!(
                "pool=create engine=sqlite path={} min={} max={} acquire_timeout_ms={}",
                url, pool_cfg.pool_min, pool_cfg.pool_max, pool_cfg.acquire_timeout_ms
            );
            Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        }

        // ---------- Postgres (Prod/Test) ----------
        DbKind::Postgres => {
            // admin pool already waited for the server, so no retry here
            let db_settings = pool_cfg.db_settings.clone();
            let sqlx_pool = PgPoolOptions::new()
                .min_connections(pool_cfg.pool_min)
                .max_connections(pool_cfg.pool_max)
                .acquire_timeout(Duration::from_millis(pool_cfg.acquire_timeout_ms))
                .idle_timeout(Duration::from_secs(30))
                .after_connect(move |conn, _meta| {
                    let settings = db_settings.clone();
                    Box::pin(async move {
                        apply_postgres_config(conn, &settings).await?;
                        Ok::<_, sqlx::Error>(())
                    })
                })
                .connect(&url)
                .await
                .map_err(|e| AppError::config("failed to connect to Postgres", e))?;

            info!(
                "pool=create engine=postgres url={} min={} max={} acquire_timeout_ms={}",
                sanitize_db_url(&url),
                pool_cfg.pool_min,
                pool_cfg.pool_max,
                pool_cfg.acquire_timeout_ms
            );
            Ok(SqlxPostgresConnector::from_sqlx_postgres_pool(sqlx_pool))
        }
    }
}
