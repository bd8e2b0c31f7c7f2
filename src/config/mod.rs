//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! page configuration (JSON)
//!     → loader.rs (deserialize)
//!     → validation.rs (advisory audit)
//!     → store.rs (atomic swap of Arc<PageConfig>)
//!     → queue builder / lifecycle controller
//!
//! On file change (watch mode):
//!     watcher.rs detects change
//!     → store.rs re-parses, keeps current config on error
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes replace it whole
//! - Optional wire fields have defaults
//! - Audit warnings never reject a configuration
//! - Binary settings (TOML) are separate from page configuration (JSON)

pub mod loader;
pub mod schema;
pub mod settings;
pub mod store;
pub mod validation;
pub mod watcher;

pub use loader::ConfigError;
pub use schema::{
    Asset, Dependency, FragmentAttributes, FragmentConfig, LoadMethod, PageConfig, ResourceKind,
};
pub use settings::RuntimeSettings;
pub use store::ConfigStore;
