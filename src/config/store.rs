//! Process-wide page configuration store.
//!
//! Holds the single source of truth for one page instance. Replacement is
//! atomic: readers either see the previous configuration or the new one,
//! never a partial state. A failed update leaves the previous configuration
//! active.

use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::config::loader::{parse_page_config, ConfigError};
use crate::config::schema::PageConfig;
use crate::config::validation::audit;
use crate::observability::metrics;

/// Shared handle to the current page configuration.
#[derive(Clone, Default)]
pub struct ConfigStore {
    current: Arc<ArcSwapOption<PageConfig>>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deserialize `raw` and make it the current configuration.
    pub fn set(&self, raw: &str) -> Result<Arc<PageConfig>, ConfigError> {
        let config = match parse_page_config(raw) {
            Ok(config) => config,
            Err(e) => {
                metrics::record_config_update(false);
                tracing::error!(error = %e, "Rejected page configuration, keeping current one");
                return Err(e);
            }
        };
        Ok(self.replace(config))
    }

    /// Make an already deserialized configuration current.
    pub fn replace(&self, config: PageConfig) -> Arc<PageConfig> {
        for warning in audit(&config) {
            tracing::warn!(page = %config.page, %warning, "Page configuration warning");
        }

        let config = Arc::new(config);
        self.current.store(Some(config.clone()));
        metrics::record_config_update(true);
        tracing::info!(
            page = %config.page,
            fragments = config.fragments.len(),
            assets = config.assets.len(),
            dependencies = config.dependencies.len(),
            "Page configuration loaded"
        );
        config
    }

    /// Current configuration, if one has been set.
    pub fn get(&self) -> Option<Arc<PageConfig>> {
        self.current.load_full()
    }

    /// Drop the current configuration.
    pub fn reset(&self) {
        self.current.store(None);
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("page", &self.get().map(|c| c.page.clone()))
            .finish()
    }
}
