mod common;

use axum::http::StatusCode;
use common::{FakeEndpoint, NAMES_JSON, NEAR_MISS_JSON, RED_JSON};
use pencil::commands::color::{color, FETCH_FAILED, INVALID_COLOR};
use pencil::commands::Context;
use pencil::services::color_api::{ColorInfoClient, FetchError};
use pencil::services::named_colors::NamedColorTable;
use pencil::services::notation::{classify, Notation};
use pencil::services::query::normalize;
use pencil::AppState;

struct Fixture {
    api: FakeEndpoint,
    state: AppState,
}

async fn fixture(api: FakeEndpoint) -> Fixture {
    let names = FakeEndpoint::json(NAMES_JSON).await;
    let renderer = FakeEndpoint::png().await;
    let state = common::state(&names, &api, &renderer).await;
    Fixture { api, state }
}

fn pair(key: &str, value: &str) -> (String, String) {
    (key.to_string(), value.to_string())
}

#[tokio::test]
async fn test_hex_lookup() {
    let f = fixture(FakeEndpoint::json(RED_JSON).await).await;
    let reply = color(&f.state, &Context::default(), "#ff0000", None).await;

    assert_eq!(f.api.calls(), 1);
    assert_eq!(f.api.last_query(), [pair("format", "json"), pair("hex", "ff0000")]);

    assert!(!reply.ephemeral);
    let embed = &reply.embeds[0];
    assert_eq!(embed.title.as_deref(), Some("Red"));
    assert_eq!(embed.field_value("Hex"), Some("#FF0000"));
    assert_eq!(embed.field_value("RGB"), Some("rgb(255, 0, 0)"));
    assert_eq!(embed.field_value("HSL"), Some("hsl(0, 100%, 50%)"));
    assert_eq!(embed.field_value("CMYK"), Some("cmyk(0, 100, 100, 0)"));
    assert_eq!(embed.field_value("Named"), Some("Red"));
    assert_eq!(embed.field_value("Closest Named Color"), None);
}

#[tokio::test]
async fn test_functional_notation_is_sent_verbatim() {
    let f = fixture(FakeEndpoint::json(RED_JSON).await).await;
    color(&f.state, &Context::default(), "hsl(0, 100%, 50%)", None).await;
    assert_eq!(
        f.api.last_query(),
        [pair("format", "json"), pair("hsl", "hsl(0, 100%, 50%)")]
    );

    color(&f.state, &Context::default(), "cmyk(0,100,100,0)", None).await;
    assert_eq!(
        f.api.last_query(),
        [pair("format", "json"), pair("cmyk", "cmyk(0,100,100,0)")]
    );
}

#[tokio::test]
async fn test_named_color_is_sent_as_hex() {
    let f = fixture(FakeEndpoint::json(NEAR_MISS_JSON).await).await;
    color(&f.state, &Context::default(), "big stone", None).await;
    assert_eq!(f.api.last_query(), [pair("format", "json"), pair("hex", "162A40")]);
}

#[tokio::test]
async fn test_closest_named_color() {
    let f = fixture(FakeEndpoint::json(NEAR_MISS_JSON).await).await;
    let reply = color(&f.state, &Context::default(), "1A2B3C", None).await;

    let embed = &reply.embeds[0];
    assert_eq!(embed.field_value("Named"), None);
    assert_eq!(embed.field_value("Closest Named Color"), Some("Big Stone"));
    assert_eq!(embed.field_value("Closest Named Hex"), Some("#162A40"));
    assert_eq!(embed.color, Some(0x1A2B3C));
}

#[tokio::test]
async fn test_invalid_color_makes_no_request() {
    let f = fixture(FakeEndpoint::json(RED_JSON).await).await;
    for input in ["ABCD", "rgb(1000,0,0)", "hsl(120,50,50)", "not a color"] {
        let reply = color(&f.state, &Context::default(), input, None).await;
        assert_eq!(reply.content.as_deref(), Some(INVALID_COLOR), "{input}");
        assert!(reply.ephemeral);
        assert!(reply.embeds.is_empty());
    }
    assert_eq!(f.api.calls(), 0);
}

#[tokio::test]
async fn test_network_failure_is_not_retried() {
    let api = FakeEndpoint::start(StatusCode::SERVICE_UNAVAILABLE, "text/plain", "down").await;
    let f = fixture(api).await;

    let reply = color(&f.state, &Context::default(), "#ABC", Some("42")).await;
    assert_eq!(reply.content.as_deref(), Some(FETCH_FAILED));
    assert!(reply.embeds.is_empty());
    assert!(reply.mentions.is_empty());
    assert_eq!(f.api.calls(), 1);
}

#[tokio::test]
async fn test_malformed_response() {
    let f = fixture(FakeEndpoint::json("<html>oops</html>").await).await;
    let reply = color(&f.state, &Context::default(), "#ABC", None).await;
    assert_eq!(reply.content.as_deref(), Some(FETCH_FAILED));
    assert_eq!(f.api.calls(), 1);
}

#[tokio::test]
async fn test_inconsistent_name_match_is_rejected() {
    let body = RED_JSON.replace(r#""exact_match_name": true"#, r#""exact_match_name": false"#);
    let f = fixture(FakeEndpoint::json(&body).await).await;
    let reply = color(&f.state, &Context::default(), "#ABC", None).await;
    assert_eq!(reply.content.as_deref(), Some(FETCH_FAILED));
}

#[tokio::test]
async fn test_mention() {
    let f = fixture(FakeEndpoint::json(RED_JSON).await).await;
    let reply = color(&f.state, &Context::default(), "red", Some("1234")).await;
    assert_eq!(reply.content.as_deref(), Some("<@1234>"));
    assert_eq!(reply.mentions, ["1234"]);
    assert_eq!(reply.embeds.len(), 1);
}

#[tokio::test]
async fn test_client_errors() {
    let table = NamedColorTable::built_in();
    let query = normalize("#ABC", classify("#ABC", &table), &table).unwrap();

    let client = ColorInfoClient::new(reqwest::Client::new(), common::unreachable_url().await);
    assert!(matches!(client.fetch(&query).await, Err(FetchError::Network(_))));

    let api = FakeEndpoint::json("[]").await;
    let client = ColorInfoClient::new(reqwest::Client::new(), api.url.clone());
    assert!(matches!(client.fetch(&query).await, Err(FetchError::Decode(_))));
}

#[tokio::test]
async fn test_exact_match_iff_zero_distance() {
    for body in [RED_JSON, NEAR_MISS_JSON] {
        let api = FakeEndpoint::json(body).await;
        let client = ColorInfoClient::new(reqwest::Client::new(), api.url.clone());
        let table = NamedColorTable::built_in();
        let query = normalize("#ABC", Notation::Hex, &table).unwrap();

        let info = client.fetch(&query).await.unwrap();
        assert_eq!(info.name.distance == 0, info.name.exact_match_name);
    }
}
