//! Configuration. Database settings live in `db_infra` so the migration CLI
//! reads exactly the same environment.

pub use db_infra::config::db;
