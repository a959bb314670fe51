//! Database infrastructure - pool construction and bootstrap.

pub mod core;

pub use self::core::{bootstrap_db, build_pool};

pub use crate::config::db::{DbKind, DbOwner, RuntimeEnv};
