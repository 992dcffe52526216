//! Application state shared by every handler

use std::sync::Arc;

use crate::cache::CacheStore;
use crate::config::Config;
use crate::db::OrderStore;
use crate::orders::OrderAccess;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside access to orders
    pub orders: OrderAccess,
}

impl AppState {
    /// Wire the adapters into the access layer with the configured timeouts
    pub fn new(config: &Config, store: Arc<dyn OrderStore>, cache: Arc<dyn CacheStore>) -> Self {
        Self {
            orders: OrderAccess::new(store, cache)
                .with_timeouts(config.store_timeout, config.cache_timeout),
        }
    }
}
