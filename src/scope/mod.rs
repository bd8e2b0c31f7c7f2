//! Global scope shared with the hosting document.
//!
//! Fragments publish their computed data models here under names of their
//! choosing. Names are not namespaced per fragment: the last write wins.

pub mod broadcaster;

use std::sync::Arc;

use dashmap::DashMap;
use serde_json::Value;

pub use broadcaster::VariableBroadcaster;

/// A value published into the global scope, with the fragment that wrote it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopeBinding {
    pub owner: String,
    pub value: Value,
}

/// Key-value namespace readable by anything on the page.
pub trait GlobalScope {
    /// Bind `name`, returning the binding it replaced.
    fn assign(&self, name: &str, binding: ScopeBinding) -> Option<ScopeBinding>;

    /// Current value under `name`.
    fn lookup(&self, name: &str) -> Option<Value>;
}

/// In-process global scope.
#[derive(Debug, Clone, Default)]
pub struct SharedScope {
    inner: Arc<DashMap<String, ScopeBinding>>,
}

impl SharedScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fragment that last wrote `name`.
    pub fn owner_of(&self, name: &str) -> Option<String> {
        self.inner.get(name).map(|r| r.value().owner.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl GlobalScope for SharedScope {
    fn assign(&self, name: &str, binding: ScopeBinding) -> Option<ScopeBinding> {
        self.inner.insert(name.to_string(), binding)
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        self.inner.get(name).map(|r| r.value().value.clone())
    }
}
