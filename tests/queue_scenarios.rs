//! Load queue resolution scenarios.

use fragment_runtime::config::{ConfigStore, ResourceKind};
use fragment_runtime::lifecycle::FlagConditions;
use fragment_runtime::queue::{build_queue, LoadQueueBuilder, QueueEntry};
use serde_json::json;

mod common;

fn names(queue: &[QueueEntry]) -> Vec<&str> {
    queue.iter().map(|e| e.name()).collect()
}

#[test]
fn test_js_asset_with_dependency() {
    let store = ConfigStore::new();
    let config = store
        .set(&common::single_bundle_page(json!({"name": "test"})).to_string())
        .unwrap();

    let queue = build_queue(&config, &config.assets);

    assert_eq!(
        serde_json::to_value(&queue).unwrap(),
        json!([
            {"name": "vendor1", "link": "vendor1.js", "preLoaded": true},
            {
                "name": "bundle1",
                "dependent": ["vendor1"],
                "preLoaded": true,
                "fragment": "test",
                "link": "bundle1.js",
                "loadMethod": 2,
                "type": 1,
                "defer": true
            }
        ])
    );
}

#[test]
fn test_client_async_fragment_excluded() {
    let store = ConfigStore::new();
    let page = common::single_bundle_page(json!({"name": "test", "clientAsync": true}));
    let config = store.set(&page.to_string()).unwrap();

    assert!(build_queue(&config, &config.assets).is_empty());
}

#[test]
fn test_conditional_fragment_excluded() {
    let store = ConfigStore::new();
    let page = common::single_bundle_page(json!({"name": "test", "attributes": {"if": "true"}}));
    let config = store.set(&page.to_string()).unwrap();

    let queue = build_queue(&config, &config.assets);
    assert!(queue.iter().all(|e| e.name() != "bundle1" && e.name() != "vendor1"));
    assert!(queue.is_empty());
}

#[test]
fn test_shared_dependencies_queued_once_before_first_use() {
    let store = ConfigStore::new();
    let config = store.set(&common::storefront_page().to_string()).unwrap();

    let queue = build_queue(&config, &config.assets);
    assert_eq!(
        names(&queue),
        vec!["header.css", "react", "react-dom", "header.js", "lodash", "listing.js"]
    );

    for shared in ["react", "react-dom"] {
        assert_eq!(queue.iter().filter(|e| e.name() == shared).count(), 1);
    }
}

#[test]
fn test_excluded_fragments_bring_no_dependencies() {
    let store = ConfigStore::new();
    let config = store.set(&common::storefront_page().to_string()).unwrap();

    let queue = build_queue(&config, &config.assets);
    for absent in ["chat.js", "socket", "campaign.js", "slider"] {
        assert!(queue.iter().all(|e| e.name() != absent), "{} should be excluded", absent);
    }
}

#[test]
fn test_only_js_assets_deferred() {
    let store = ConfigStore::new();
    let config = store.set(&common::storefront_page().to_string()).unwrap();

    for entry in build_queue(&config, &config.assets) {
        let expected = match &entry {
            QueueEntry::Asset(a) => a.asset.kind == ResourceKind::Js,
            QueueEntry::Dependency(_) => false,
        };
        assert_eq!(entry.is_deferred(), expected, "{}", entry.name());
    }
}

#[test]
fn test_fresh_passes_are_identical() {
    let store = ConfigStore::new();
    let config = store.set(&common::storefront_page().to_string()).unwrap();

    let first = build_queue(&config, &config.assets);
    let second = build_queue(&config, &config.assets);
    assert_eq!(first, second);
}

#[test]
fn test_same_pass_does_not_repeat_dependencies() {
    let store = ConfigStore::new();
    let config = store.set(&common::storefront_page().to_string()).unwrap();

    let mut builder = LoadQueueBuilder::new(&config);
    builder.build(&config.assets);
    let again = builder.build(&config.assets);

    // Dependencies are already loaded; only the assets themselves remain.
    assert_eq!(names(&again), vec!["header.css", "header.js", "listing.js"]);
}

#[test]
fn test_conditional_queue_for_true_condition() {
    let store = ConfigStore::new();
    let config = store.set(&common::storefront_page().to_string()).unwrap();

    let mut builder = LoadQueueBuilder::new(&config);
    builder.build(&config.assets);

    let off = builder.clone().build_conditional(&config.assets, &FlagConditions::default());
    assert!(off.is_empty());

    let on = builder.build_conditional(&config.assets, &FlagConditions::new(["campaign.active"]));
    assert_eq!(names(&on), vec!["slider", "campaign.js"]);
}

#[test]
fn test_unfamiliar_load_method_still_queued() {
    let store = ConfigStore::new();
    let config = store
        .set(
            &json!({
                "page": "page",
                "fragments": [{"name": "test"}],
                "assets": [
                    {"name": "a", "link": "a.js", "fragment": "test", "loadMethod": 2, "type": 1},
                    {"name": "b", "link": "b.js", "fragment": "test", "loadMethod": 4, "type": 1}
                ],
                "dependencies": []
            })
            .to_string(),
        )
        .unwrap();

    let queue = build_queue(&config, &config.assets);
    assert_eq!(names(&queue), vec!["a", "b"]);
    assert_eq!(serde_json::to_value(&queue).unwrap()[1]["loadMethod"], json!(4));
}

#[test]
fn test_positional_configuration_rejected() {
    let store = ConfigStore::new();
    assert!(store.set(r#"["p", [], [], []]"#).is_err());
    assert!(store.get().is_none());
}
