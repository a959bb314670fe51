//! SeaORM adapters. Functions here return `DbErr`; repos map it.

pub mod customers_sea;
pub mod sequences_sea;
