//! Load queue subsystem.
//!
//! # Data Flow
//! ```text
//! PageConfig (fragments, dependencies)
//!     → builder.rs (gating + dependency resolution)
//!     → Vec<QueueEntry> (load order)
//!     → lifecycle controller → resource loader
//! ```

pub mod builder;
pub mod entry;

pub use builder::{build_queue, FragmentGate, LoadQueueBuilder};
pub use entry::{QueueEntry, QueuedAsset};
