//! Page lifecycle orchestration.
//!
//! # Responsibilities
//! - Apply page configurations to the store
//! - On page ready, build the eager queue and hand it to the loader
//! - Then build the conditional queue for gated fragments whose condition
//!   holds, sharing the eager pass's dependency state
//! - Notify registered listeners at each step
//!
//! # Design Decisions
//! - Configuration is passed in explicitly through a [`ConfigStore`] handle
//! - Each page-ready pass starts from the declared preload state
//! - Loader failures are reported, never retried here

use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, ConfigStore, PageConfig};
use crate::lifecycle::conditions::ConditionEvaluator;
use crate::lifecycle::listeners::{
    LifecycleEvent, LifecycleEventKind, ListenerId, ListenerRegistry,
};
use crate::lifecycle::loader::{LoadError, ResourceLoader};
use crate::queue::{LoadQueueBuilder, QueueEntry};

/// Errors surfaced by the lifecycle controller.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("No page configuration loaded")]
    Unconfigured,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Resource loading failed: {0}")]
    Load(#[from] LoadError),
}

/// Queues computed for one page-ready pass.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadPlan {
    pub eager: Vec<QueueEntry>,
    pub conditional: Vec<QueueEntry>,
}

impl LoadPlan {
    /// Compute both queues for `config` in a single resolution pass.
    pub fn compute<C>(config: &PageConfig, conditions: &C) -> Self
    where
        C: ConditionEvaluator + ?Sized,
    {
        let mut builder = LoadQueueBuilder::new(config);
        let eager = builder.build(&config.assets);
        let conditional = builder.build_conditional(&config.assets, conditions);
        Self { eager, conditional }
    }
}

/// Outcome of a page-ready pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLoadReport {
    pub page: String,
    pub eager: usize,
    pub conditional: usize,
}

/// Drives resource loading across the page lifecycle.
pub struct PageLifecycle<L, C> {
    store: ConfigStore,
    loader: L,
    conditions: C,
    listeners: ListenerRegistry,
}

impl<L, C> PageLifecycle<L, C>
where
    L: ResourceLoader,
    C: ConditionEvaluator,
{
    pub fn new(store: ConfigStore, loader: L, conditions: C) -> Self {
        Self {
            store,
            loader,
            conditions,
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Subscribe to every `kind` event.
    pub fn register_listener<F>(&mut self, kind: LifecycleEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&LifecycleEvent) + 'static,
    {
        self.listeners.register(kind, callback)
    }

    /// Subscribe to the next `kind` event only.
    pub fn register_listener_once<F>(&mut self, kind: LifecycleEventKind, callback: F) -> ListenerId
    where
        F: FnMut(&LifecycleEvent) + 'static,
    {
        self.listeners.register_once(kind, callback)
    }

    /// Drop one listener registration. Returns false if it was already gone.
    pub fn unregister_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.unregister(id)
    }

    /// Drop every listener registration.
    pub fn clear_listeners(&mut self) {
        self.listeners.clear();
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Make `raw` the current page configuration.
    pub fn configure(&mut self, raw: &str) -> Result<Arc<PageConfig>, LifecycleError> {
        let config = self.store.set(raw)?;
        self.listeners.emit(&LifecycleEvent::Configured {
            page: config.page.clone(),
        });
        Ok(config)
    }

    /// Queues the next page-ready pass would dispatch.
    pub fn plan(&self) -> Result<LoadPlan, LifecycleError> {
        let config = self.store.get().ok_or(LifecycleError::Unconfigured)?;
        Ok(LoadPlan::compute(&config, &self.conditions))
    }

    /// Handle the page-ready signal.
    pub async fn page_ready(&mut self) -> Result<PageLoadReport, LifecycleError> {
        let config = self.store.get().ok_or(LifecycleError::Unconfigured)?;
        self.listeners.emit(&LifecycleEvent::PageReady {
            page: config.page.clone(),
        });

        let plan = LoadPlan::compute(&config, &self.conditions);
        let report = PageLoadReport {
            page: config.page.clone(),
            eager: plan.eager.len(),
            conditional: plan.conditional.len(),
        };

        tracing::info!(page = %config.page, entries = report.eager, "Dispatching eager load queue");
        self.dispatch(plan.eager).await?;
        self.listeners.emit(&LifecycleEvent::EagerQueueDispatched {
            entries: report.eager,
        });

        if report.conditional > 0 {
            tracing::info!(
                page = %config.page,
                entries = report.conditional,
                "Dispatching conditional load queue"
            );
            self.dispatch(plan.conditional).await?;
        }
        self.listeners.emit(&LifecycleEvent::ConditionalQueueDispatched {
            entries: report.conditional,
        });

        Ok(report)
    }

    async fn dispatch(&self, queue: Vec<QueueEntry>) -> Result<(), LifecycleError> {
        if let Err(e) = self.loader.load_series(queue).await {
            tracing::error!(error = %e, "Resource loader failed");
            return Err(e.into());
        }
        Ok(())
    }
}

impl<L, C> std::fmt::Debug for PageLifecycle<L, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageLifecycle")
            .field("store", &self.store)
            .field("listeners", &self.listeners)
            .finish()
    }
}
