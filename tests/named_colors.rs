mod common;

use axum::http::StatusCode;
use common::{FakeEndpoint, NAMES_JSON};
use pencil::models::Rgb8;
use pencil::services::named_colors::{NamedColorTable, TableSource};

async fn load(url: &str) -> NamedColorTable {
    NamedColorTable::load(&reqwest::Client::new(), url).await
}

fn assert_built_in(table: &NamedColorTable) {
    assert_eq!(table.source(), TableSource::BuiltIn);
    assert_eq!(table.lookup("Red"), Some(Rgb8(255, 0, 0)));
    assert_eq!(table.lookup("rebecca purple"), Some(Rgb8(102, 51, 153)));
}

#[tokio::test]
async fn test_remote_table_is_used() {
    let names = FakeEndpoint::json(NAMES_JSON).await;
    let table = load(&names.url).await;

    assert_eq!(names.calls(), 1);
    assert_eq!(table.source(), TableSource::Remote);
    assert_eq!(table.len(), 3);
    assert_eq!(table.lookup("BIG STONE"), Some(Rgb8(22, 42, 64)));
    assert_eq!(table.lookup("cornflowerblue"), Some(Rgb8(100, 149, 237)));
    assert_eq!(table.lookup("RebeccaPurple"), None);
}

#[tokio::test]
async fn test_error_status_falls_back() {
    let names = FakeEndpoint::start(StatusCode::INTERNAL_SERVER_ERROR, "text/plain", "boom").await;
    assert_built_in(&load(&names.url).await);
}

#[tokio::test]
async fn test_malformed_payload_falls_back() {
    let names = FakeEndpoint::json("{\"colors\": [{\"name\": \"Red\"").await;
    assert_built_in(&load(&names.url).await);
}

#[tokio::test]
async fn test_missing_colors_key_falls_back() {
    let names = FakeEndpoint::json(r#"{"names": []}"#).await;
    assert_built_in(&load(&names.url).await);
}

#[tokio::test]
async fn test_empty_table_falls_back() {
    let names = FakeEndpoint::json(r#"{"colors": []}"#).await;
    assert_built_in(&load(&names.url).await);
}

#[tokio::test]
async fn test_blank_names_only_falls_back() {
    let names = FakeEndpoint::json(r#"{"colors": [{"name": "  ", "r": 1, "g": 2, "b": 3}]}"#).await;
    let table = load(&names.url).await;
    assert_built_in(&table);
    assert!(!table.contains(""));
}

#[tokio::test]
async fn test_out_of_range_channel_falls_back() {
    let names = FakeEndpoint::json(r#"{"colors": [{"name": "Red", "r": 300, "g": 0, "b": 0}]}"#).await;
    assert_built_in(&load(&names.url).await);
}

#[tokio::test]
async fn test_unreachable_host_falls_back() {
    let url = common::unreachable_url().await;
    assert_built_in(&load(&url).await);
}

#[tokio::test]
async fn test_table_is_never_refetched() {
    let names = FakeEndpoint::json(NAMES_JSON).await;
    let api = FakeEndpoint::json(common::RED_JSON).await;
    let renderer = FakeEndpoint::png().await;
    let state = common::state(&names, &api, &renderer).await;

    for input in ["Red", "Big Stone", "Cornflower Blue"] {
        pencil::commands::color::color(&state, &Default::default(), input, None).await;
    }
    assert_eq!(names.calls(), 1);
    assert_eq!(api.calls(), 3);
}
