//! Resource loading executor boundary.
//!
//! The runtime decides what to load and in which order; fetching and
//! executing each resource belongs to a [`ResourceLoader`]. Loaders are
//! expected to run entries strictly in queue order and honour each JS
//! entry's `defer` flag. Retries, if any, are the loader's business.

use std::future::Future;

use thiserror::Error;
use url::Url;

use crate::queue::QueueEntry;

/// Failure reported by a resource loader.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Invalid link '{link}' for '{name}': {source}")]
    InvalidLink {
        name: String,
        link: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to load '{name}': {reason}")]
    Failed { name: String, reason: String },
}

/// Executes a load queue.
pub trait ResourceLoader {
    /// Load every entry of `queue`, in order.
    fn load_series(&self, queue: Vec<QueueEntry>) -> impl Future<Output = Result<(), LoadError>>;
}

/// Loader that only reports what it would load, resolving links against an
/// optional base URL.
#[derive(Debug, Clone, Default)]
pub struct TracingLoader {
    base_url: Option<Url>,
}

impl TracingLoader {
    pub fn new(base_url: Option<Url>) -> Self {
        Self { base_url }
    }

    /// Absolute location of `entry`, or its raw link without a base URL.
    pub fn resolve(&self, entry: &QueueEntry) -> Result<String, LoadError> {
        match &self.base_url {
            None => Ok(entry.link().to_string()),
            Some(base) => base
                .join(entry.link())
                .map(String::from)
                .map_err(|source| LoadError::InvalidLink {
                    name: entry.name().to_string(),
                    link: entry.link().to_string(),
                    source,
                }),
        }
    }
}

impl ResourceLoader for TracingLoader {
    async fn load_series(&self, queue: Vec<QueueEntry>) -> Result<(), LoadError> {
        for (position, entry) in queue.iter().enumerate() {
            let location = self.resolve(entry)?;
            tracing::info!(
                position,
                name = %entry.name(),
                kind = entry.kind_label(),
                defer = entry.is_deferred(),
                %location,
                "Loading resource"
            );
        }
        Ok(())
    }
}
