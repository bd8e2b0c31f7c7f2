//! Shared fixtures for integration tests.

use std::cell::RefCell;

use fragment_runtime::lifecycle::{LoadError, ResourceLoader};
use fragment_runtime::QueueEntry;
use serde_json::{json, Value};

/// Single-asset page: `bundle1` (JS, needs `vendor1`) in fragment `test`.
///
/// `fragment` replaces the default `{"name": "test"}` descriptor.
#[allow(dead_code)]
pub fn single_bundle_page(fragment: Value) -> Value {
    json!({
        "page": "page",
        "fragments": [fragment],
        "assets": [{
            "name": "bundle1",
            "dependent": ["vendor1"],
            "preLoaded": false,
            "link": "bundle1.js",
            "fragment": "test",
            "loadMethod": 2,
            "type": 1
        }],
        "dependencies": [{
            "name": "vendor1",
            "link": "vendor1.js",
            "preLoaded": false
        }]
    })
}

/// Page with shared dependencies, CSS, and every kind of gated fragment.
#[allow(dead_code)]
pub fn storefront_page() -> Value {
    json!({
        "page": "storefront",
        "fragments": [
            {"name": "header"},
            {"name": "listing"},
            {"name": "chat", "clientAsync": true},
            {"name": "campaign", "attributes": {"if": "campaign.active"}}
        ],
        "assets": [
            {"name": "header.css", "link": "header.css", "fragment": "header", "loadMethod": 2, "type": 0},
            {"name": "header.js", "link": "header.js", "fragment": "header", "dependent": ["react", "react-dom"], "loadMethod": 2, "type": 1},
            {"name": "listing.js", "link": "listing.js", "fragment": "listing", "dependent": ["react", "react-dom", "lodash"], "loadMethod": 2, "type": 1},
            {"name": "chat.js", "link": "chat.js", "fragment": "chat", "dependent": ["socket"], "loadMethod": 2, "type": 1},
            {"name": "campaign.js", "link": "campaign.js", "fragment": "campaign", "dependent": ["react", "slider"], "loadMethod": 2, "type": 1}
        ],
        "dependencies": [
            {"name": "react", "link": "react.js"},
            {"name": "react-dom", "link": "react-dom.js"},
            {"name": "lodash", "link": "lodash.js"},
            {"name": "socket", "link": "socket.js"},
            {"name": "slider", "link": "slider.js"}
        ]
    })
}

/// Loader that records every queue it receives.
#[derive(Default)]
#[allow(dead_code)]
pub struct RecordingLoader {
    pub batches: RefCell<Vec<Vec<QueueEntry>>>,
}

#[allow(dead_code)]
impl RecordingLoader {
    pub fn names(&self) -> Vec<Vec<String>> {
        self.batches
            .borrow()
            .iter()
            .map(|batch| batch.iter().map(|e| e.name().to_string()).collect())
            .collect()
    }
}

impl ResourceLoader for RecordingLoader {
    async fn load_series(&self, queue: Vec<QueueEntry>) -> Result<(), LoadError> {
        self.batches.borrow_mut().push(queue);
        Ok(())
    }
}

/// Loader that fails on the first entry of every queue.
#[allow(dead_code)]
pub struct FailingLoader;

impl ResourceLoader for FailingLoader {
    async fn load_series(&self, queue: Vec<QueueEntry>) -> Result<(), LoadError> {
        match queue.first() {
            Some(entry) => Err(LoadError::Failed {
                name: entry.name().to_string(),
                reason: "connection reset".into(),
            }),
            None => Ok(()),
        }
    }
}
