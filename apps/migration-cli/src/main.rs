use clap::{Parser, ValueEnum};
use db_infra::config::db::{DbKind, RuntimeEnv};
use db_infra::orchestrate_migration;
use migration::MigrationCommand;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, ValueEnum)]
enum Env {
    Prod,
    Test,
}

#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

impl From<Env> for RuntimeEnv {
    fn from(env: Env) -> Self {
        match env {
            Env::Prod => RuntimeEnv::Prod,
            Env::Test => RuntimeEnv::Test,
        }
    }
}

impl From<Db> for DbKind {
    fn from(db: Db) -> Self {
        match db {
            Db::Postgres => DbKind::Postgres,
            Db::SqliteFile => DbKind::SqliteFile,
        }
    }
}

#[derive(Parser)]
#[command(name = "migration")]
#[command(about = "ParaBank database migration tool")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    #[arg(value_parser = parse_command)]
    command: MigrationCommand,

    /// Runtime environment
    #[arg(short, long, value_enum, default_value = "test")]
    env: Env,

    /// Database type. In-memory SQLite is not offered: it would vanish when the command exits.
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

fn parse_command(s: &str) -> Result<MigrationCommand, String> {
    s.parse()
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("migration=info,db_infra=info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter(filter)
        .init();

    let args = Args::parse();
    let env = RuntimeEnv::from(args.env);
    let db_kind = DbKind::from(args.db);

    info!(command = ?args.command, ?env, ?db_kind, "migration requested");

    if let Err(e) = orchestrate_migration(env, db_kind, args.command).await {
        eprintln!("Migration failed: {e}");
        std::process::exit(1);
    }
}
