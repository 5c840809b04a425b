use crate::cli::Args;
use crate::date_provider::{OverrideDateProvider, SystemDateProvider};
use crate::store::Store;
use chrono::NaiveDate;
use rusqlite::Result;
use std::sync::Arc;

const DEFAULT_STORE_PATH: &str = "studykit.db";

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Whether to use an in-memory store
    pub is_test_mode: bool,
    /// Custom store file path (ignored if in test mode)
    pub custom_path: Option<String>,
    /// Optional fixed date replacing the system clock's date
    pub override_date: Option<NaiveDate>,
}

impl StoreConfig {
    /// Gets the effective store path
    pub fn get_path(&self) -> &str {
        if self.is_test_mode {
            ":memory:"
        } else {
            self.custom_path.as_deref().unwrap_or(DEFAULT_STORE_PATH)
        }
    }
}

/// Factory for creating Store instances
pub struct StoreFactory;

impl StoreFactory {
    /// Creates a store with the specified configuration
    pub fn create(config: StoreConfig) -> Result<Store> {
        let path = config.get_path();
        match config.override_date {
            Some(date) => {
                Store::with_date_provider(path, Arc::new(OverrideDateProvider::new(date)))
            }
            None => Store::with_date_provider(path, Arc::new(SystemDateProvider)),
        }
    }

    /// Builds the configuration from validated command-line arguments
    pub fn config_from_args(args: &Args, override_date: Option<NaiveDate>) -> StoreConfig {
        StoreConfig {
            is_test_mode: args.test,
            custom_path: args
                .db_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            override_date,
        }
    }
}
