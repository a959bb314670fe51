//! Domain-facing repository functions over the SeaORM adapters.

pub mod customers;
pub mod sequences;
