use sea_orm::DatabaseConnection;

use crate::services::{CustomerStore, SequenceGenerator};

/// Application state containing shared resources
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent for state built without a database)
    db: Option<DatabaseConnection>,
    pub sequences: SequenceGenerator,
    pub customers: CustomerStore,
}

impl AppState {
    /// State with the given pool and generator; the customer store shares the generator.
    pub fn new(db: DatabaseConnection, sequences: SequenceGenerator) -> Self {
        Self {
            db: Some(db),
            sequences,
            customers: CustomerStore::new(sequences),
        }
    }

    pub fn without_db(sequences: SequenceGenerator) -> Self {
        Self {
            db: None,
            sequences,
            customers: CustomerStore::new(sequences),
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
