//! End-to-end flow: create a link, visit it, read the aggregates back.

mod common;

use publink::domain::click_event::{NOT_SET, VisitMeta};
use publink::error::CoreError;
use publink::utils::short_id;

#[tokio::test]
async fn test_create_then_visit_roundtrip() {
    let store = common::create_store();
    let links = common::create_link_service(store.clone());
    let visits = common::create_visit_service(store);

    let created = links.create_link("https://example.com").await.unwrap();
    assert!(short_id::is_valid(&created.short_id));
    assert_eq!(created.target_url, "https://example.com/");
    assert_eq!(created.analytics.clicks, 0);

    let target = visits
        .record_visit_and_redirect_target(&created.short_id, &VisitMeta::default())
        .await
        .unwrap();
    assert_eq!(target, "https://example.com/");

    let after = links.get_link(&created.short_id).await.unwrap();
    assert_eq!(after.analytics.clicks, 1);
    assert_eq!(after.target_url, created.target_url);
}

#[tokio::test]
async fn test_visits_aggregate_all_dimensions() {
    let store = common::create_store();
    let links = common::create_link_service(store.clone());
    let visits = common::create_visit_service(store);

    let created = links.create_link("https://example.com/page").await.unwrap();

    let chrome_windows =
        "Mozilla/5.0 (Windows NT 10.0) AppleWebKit/537.36 Chrome/120 Safari/537.36";
    for referer in [Some("https://a.example/"), Some("https://a.example/"), None] {
        visits
            .record_visit_and_redirect_target(
                &created.short_id,
                &common::visit_meta(referer, Some(chrome_windows)),
            )
            .await
            .unwrap();
    }

    let after = links.get_link(&created.short_id).await.unwrap();
    assert_eq!(after.analytics.clicks, 3);

    let referrers = after.analytics.referrer_table();
    assert_eq!(referrers.count("https://a.example/"), 2);
    assert_eq!(referrers.count(NOT_SET), 1);

    assert_eq!(after.analytics.language_table().count("en-us"), 3);
    assert_eq!(after.analytics.browser_table().count("Chrome"), 3);
    assert_eq!(after.analytics.os_table().count("Windows"), 3);
}

#[tokio::test]
async fn test_visit_unknown_id_creates_nothing() {
    let store = common::create_store();
    let visits = common::create_visit_service(store.clone());

    let result = visits
        .record_visit_and_redirect_target("nope", &VisitMeta::default())
        .await;
    assert!(matches!(result, Err(CoreError::NotFound { .. })));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_created_ids_are_distinct() {
    let store = common::create_store();
    let links = common::create_link_service(store);

    let mut seen = std::collections::HashSet::new();
    for i in 0..50 {
        let record = links
            .create_link(&format!("https://example.com/{i}"))
            .await
            .unwrap();
        assert!(seen.insert(record.short_id.clone()), "duplicate short id");
    }
}
