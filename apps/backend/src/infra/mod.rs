//! Infrastructure layer - database bootstrap, state construction, and error mapping.

pub mod db;
pub mod db_errors;
pub mod state;
