//! Fragment Runtime Library
//!
//! Assembles a page out of independently built fragments: resolves which
//! assets and shared dependencies to load, in which order, and hands the
//! result to a resource loader.

pub mod config;
pub mod dom;
pub mod lifecycle;
pub mod observability;
pub mod queue;
pub mod scope;

pub use config::schema::PageConfig;
pub use config::ConfigStore;
pub use lifecycle::PageLifecycle;
pub use queue::{build_queue, LoadQueueBuilder, QueueEntry};
