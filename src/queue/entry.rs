//! Load queue entries.

use serde::Serialize;

use crate::config::schema::{Asset, Dependency, ResourceKind};

/// One resource in a load queue. Queue order is load order.
///
/// Serializes untagged: a dependency entry is the dependency record itself,
/// an asset entry is the asset record plus its derived `defer` flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueueEntry {
    Dependency(Dependency),
    Asset(QueuedAsset),
}

/// An asset placed in a load queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueuedAsset {
    #[serde(flatten)]
    pub asset: Asset,

    /// Execute after document parsing completes. Derived: true for every JS asset.
    #[serde(skip_serializing_if = "is_false")]
    pub defer: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl QueuedAsset {
    /// Queue `asset`, marking it loaded and deriving its loading strategy.
    pub fn new(mut asset: Asset) -> Self {
        asset.pre_loaded = true;
        let defer = asset.kind == ResourceKind::Js;
        Self { asset, defer }
    }
}

impl QueueEntry {
    pub fn name(&self) -> &str {
        match self {
            QueueEntry::Dependency(d) => &d.name,
            QueueEntry::Asset(a) => &a.asset.name,
        }
    }

    pub fn link(&self) -> &str {
        match self {
            QueueEntry::Dependency(d) => &d.link,
            QueueEntry::Asset(a) => &a.asset.link,
        }
    }

    /// Dependencies carry no loading strategy of their own.
    pub fn is_deferred(&self) -> bool {
        matches!(self, QueueEntry::Asset(a) if a.defer)
    }

    pub fn is_dependency(&self) -> bool {
        matches!(self, QueueEntry::Dependency(_))
    }

    /// Short label used in logs and metrics.
    pub fn kind_label(&self) -> &'static str {
        match self {
            QueueEntry::Dependency(_) => "dependency",
            QueueEntry::Asset(a) => match a.asset.kind {
                ResourceKind::Js => "js",
                ResourceKind::Css => "css",
            },
        }
    }
}
