//! Search flow integration tests.
//!
//! Exercises the full path a CLI command takes: raw index response ->
//! normalization -> caching -> page rendering -> selection resolution.

use serde_json::{json, Value};

use nyaa_core::{normalize, MockIndex, ResultPager, SearchParams, TorrentIndex};

/// Raw search response with `count` records in the shape the live API emits.
fn raw_search_response(count: usize) -> Value {
    let data: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "title": format!("Release {i}"),
                "torrent": format!("https://nyaa.si/download/{i}.torrent"),
                "size": "350 MiB",
                "seeders": i.to_string(),
                "leechers": "2",
                "completed": 100 + i,
                "category": "Anime - English-translated",
                "date": "2024-06-15T10:30:00Z"
            })
        })
        .collect();
    json!({ "data": data })
}

#[tokio::test]
async fn test_search_normalize_paginate_select() {
    let index = MockIndex::new();
    index.set_response(raw_search_response(25));

    let raw = index.search(&SearchParams::new("naruto")).await.unwrap();
    let results = normalize(&raw);
    assert_eq!(results.len(), 25);

    let mut pager = ResultPager::new();
    pager.cache_results("naruto", results.clone());
    pager.reset_pagination();

    // Page 1: records 1-10.
    let window = pager.render_page(&results, 10);
    assert_eq!(window.len(), 10);
    assert_eq!(window[0].title, "Release 1");
    assert_eq!(window[9].title, "Release 10");
    assert_eq!(ResultPager::page_count(results.len(), 10), 3);

    // Page 2: records 11-20, selection 1 resolves to record 11.
    pager.next_page();
    let window = pager.render_page(&results, 10);
    assert_eq!(window[0].title, "Release 11");

    let (title, link) = pager.resolve_selection(1).unwrap();
    assert_eq!(title, "Release 11");
    assert_eq!(link, "https://nyaa.si/download/11.torrent");

    // The cached set is still retrievable for a later command.
    assert_eq!(pager.lookup_cached("naruto").unwrap().len(), 25);
}

#[tokio::test]
async fn test_user_search_uses_own_label() {
    let index = MockIndex::new();
    index.set_response(raw_search_response(3));

    let raw = index
        .by_user("SubsPlease", &Default::default())
        .await
        .unwrap();
    let results = normalize(&raw);

    let mut pager = ResultPager::new();
    pager.cache_results("user:SubsPlease", results);
    pager.reset_pagination();

    assert!(pager.lookup_cached("SubsPlease").is_none());
    assert_eq!(pager.lookup_cached("user:SubsPlease").unwrap().len(), 3);
}

#[tokio::test]
async fn test_detail_lookup_single_record() {
    let index = MockIndex::new();
    index.set_response(json!({
        "data": {
            "title": "Single Release",
            "torrent": "https://nyaa.si/download/9.torrent",
            "seeders": 5,
            "time": "2023-01-05 08:00:00"
        }
    }));

    let raw = index.by_id("1931737").await.unwrap();
    let results = normalize(&raw);

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title, "Single Release");
    assert_eq!(results[0].seeders, 5);
    assert_eq!(results[0].date, "2023-01-05 08:00");
}

#[tokio::test]
async fn test_empty_response_renders_empty_page() {
    let index = MockIndex::new();

    let raw = index.search(&SearchParams::new("nope")).await.unwrap();
    let results = normalize(&raw);
    assert!(results.is_empty());

    let mut pager = ResultPager::new();
    pager.cache_results("nope", results.clone());
    pager.reset_pagination();

    assert!(pager.render_page(&results, 10).is_empty());
    assert_eq!(ResultPager::page_count(results.len(), 10), 0);
    assert!(pager.resolve_selection(1).is_none());
}

#[tokio::test]
async fn test_fresh_search_replaces_cached_set() {
    let index = MockIndex::new();
    let mut pager = ResultPager::new();

    index.set_response(raw_search_response(25));
    let raw = index.search(&SearchParams::new("naruto")).await.unwrap();
    pager.cache_results("naruto", normalize(&raw));
    pager.reset_pagination();
    pager.next_page();

    // Repeating the search overwrites the set; pagination is reset by the
    // caller, not by caching.
    index.set_response(raw_search_response(4));
    let raw = index.search(&SearchParams::new("naruto")).await.unwrap();
    pager.cache_results("naruto", normalize(&raw));
    assert_eq!(pager.current_page(), 2);
    assert_eq!(pager.lookup_cached("naruto").unwrap().len(), 4);

    pager.reset_pagination();
    assert_eq!(pager.current_page(), 1);
}
