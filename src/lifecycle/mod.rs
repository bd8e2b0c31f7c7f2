//! Page lifecycle subsystem.
//!
//! # Data Flow
//! ```text
//! configure(raw):
//!     ConfigStore::set → Configured listeners
//!
//! page_ready():
//!     PageReady listeners
//!     → LoadPlan (eager + conditional queues, one resolution pass)
//!     → ResourceLoader::load_series(eager)
//!     → ResourceLoader::load_series(conditional)
//! ```
//!
//! # Design Decisions
//! - Single-threaded: listeners are plain `FnMut` callbacks, no locking
//! - Loader and condition evaluation are injected capabilities

pub mod conditions;
pub mod controller;
pub mod listeners;
pub mod loader;

pub use conditions::{ConditionEvaluator, FlagConditions};
pub use controller::{LifecycleError, LoadPlan, PageLifecycle, PageLoadReport};
pub use listeners::{LifecycleEvent, LifecycleEventKind, ListenerId, ListenerRegistry};
pub use loader::{LoadError, ResourceLoader, TracingLoader};
