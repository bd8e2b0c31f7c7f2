//! Page lifecycle integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use fragment_runtime::config::ConfigStore;
use fragment_runtime::lifecycle::{
    FlagConditions, LifecycleError, LifecycleEvent, LifecycleEventKind, PageLifecycle,
};
use serde_json::json;

mod common;

use common::{FailingLoader, RecordingLoader};

#[tokio::test]
async fn test_conditional_fragment_not_loaded_eagerly() {
    let mut lifecycle = PageLifecycle::new(
        ConfigStore::new(),
        RecordingLoader::default(),
        |_: &str, _: &str| false,
    );
    let page = common::single_bundle_page(json!({"name": "test", "attributes": {"if": "true"}}));
    lifecycle.configure(&page.to_string()).unwrap();

    let report = lifecycle.page_ready().await.unwrap();

    assert_eq!(report.eager, 0);
    assert_eq!(report.conditional, 0);
    assert_eq!(lifecycle.loader().names(), vec![Vec::<String>::new()]);
}

#[tokio::test]
async fn test_conditional_fragment_loaded_when_condition_holds() {
    let mut lifecycle = PageLifecycle::new(
        ConfigStore::new(),
        RecordingLoader::default(),
        FlagConditions::default(),
    );
    let page = common::single_bundle_page(json!({"name": "test", "attributes": {"if": "true"}}));
    lifecycle.configure(&page.to_string()).unwrap();

    lifecycle.page_ready().await.unwrap();

    assert_eq!(
        lifecycle.loader().names(),
        vec![vec![], vec!["vendor1".to_string(), "bundle1".to_string()]]
    );
}

#[tokio::test]
async fn test_storefront_page_ready() {
    let mut lifecycle = PageLifecycle::new(
        ConfigStore::new(),
        RecordingLoader::default(),
        FlagConditions::new(["campaign.active"]),
    );
    lifecycle.configure(&common::storefront_page().to_string()).unwrap();

    let report = lifecycle.page_ready().await.unwrap();
    assert_eq!(report.page, "storefront");
    assert_eq!(report.eager, 6);
    assert_eq!(report.conditional, 2);

    let batches = lifecycle.loader().names();
    assert_eq!(batches[1], vec!["slider".to_string(), "campaign.js".to_string()]);
    assert!(batches.iter().flatten().all(|name| name != "chat.js"));
}

#[tokio::test]
async fn test_loader_failure_surfaces() {
    let mut lifecycle =
        PageLifecycle::new(ConfigStore::new(), FailingLoader, FlagConditions::default());
    lifecycle.configure(&common::storefront_page().to_string()).unwrap();

    let err = lifecycle.page_ready().await.unwrap_err();
    assert!(matches!(err, LifecycleError::Load(_)));
    assert!(err.to_string().contains("header.css"));
}

#[tokio::test]
async fn test_bad_configuration_keeps_previous() {
    let store = ConfigStore::new();
    let mut lifecycle =
        PageLifecycle::new(store.clone(), RecordingLoader::default(), FlagConditions::default());
    lifecycle.configure(&common::storefront_page().to_string()).unwrap();

    let err = lifecycle.configure(r#"{"page": "broken"}"#).unwrap_err();
    assert!(matches!(err, LifecycleError::Config(_)));
    assert_eq!(store.get().unwrap().page, "storefront");

    let report = lifecycle.page_ready().await.unwrap();
    assert_eq!(report.page, "storefront");
}

#[tokio::test]
async fn test_cleared_listeners_not_invoked() {
    let hits = Rc::new(RefCell::new(Vec::new()));
    let mut lifecycle = PageLifecycle::new(
        ConfigStore::new(),
        RecordingLoader::default(),
        FlagConditions::default(),
    );

    let h = hits.clone();
    lifecycle.register_listener_once(LifecycleEventKind::PageReady, move |e| {
        h.borrow_mut().push(e.clone())
    });
    lifecycle.configure(&common::storefront_page().to_string()).unwrap();

    lifecycle.page_ready().await.unwrap();
    lifecycle.page_ready().await.unwrap();
    assert_eq!(
        *hits.borrow(),
        vec![LifecycleEvent::PageReady { page: "storefront".into() }]
    );

    let h = hits.clone();
    lifecycle.register_listener(LifecycleEventKind::EagerQueueDispatched, move |e| {
        h.borrow_mut().push(e.clone())
    });
    lifecycle.clear_listeners();
    assert_eq!(lifecycle.listener_count(), 0);

    lifecycle.page_ready().await.unwrap();
    assert_eq!(hits.borrow().len(), 1);
}
