//! Backend test support utilities
//!
//! Unified test logging initialization and unique test-data generation,
//! shared by unit and integration tests.

pub mod logging;
pub mod unique_helpers;
