//! Shared fixtures: in-process HTTP servers standing in for the remote
//! color API, the color name table and the TeX renderer.

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use std::time::Duration;

use axum::{
    extract::RawQuery,
    http::{header, StatusCode},
    routing::get,
    Router,
};
use pencil::{AppState, Config};
use tokio::net::TcpListener;

pub const RED_JSON: &str = r##"{
    "hex": {"value": "#FF0000", "clean": "FF0000"},
    "rgb": {"fraction": {"r": 1, "g": 0, "b": 0}, "r": 255, "g": 0, "b": 0, "value": "rgb(255, 0, 0)"},
    "hsl": {"fraction": {"h": 0, "s": 1, "l": 0.5}, "h": 0, "s": 100, "l": 50, "value": "hsl(0, 100%, 50%)"},
    "hsv": {"fraction": {"h": 0, "s": 1, "v": 1}, "value": "hsv(0, 100%, 100%)", "h": 0, "s": 100, "v": 100},
    "name": {"value": "Red", "closest_named_hex": "#FF0000", "exact_match_name": true, "distance": 0},
    "cmyk": {"fraction": {"c": 0, "m": 1, "y": 1, "k": 0}, "value": "cmyk(0, 100, 100, 0)", "c": 0, "m": 100, "y": 100, "k": 0},
    "XYZ": {"fraction": {"X": 0.4124, "Y": 0.2126, "Z": 0.0193}, "value": "XYZ(41, 21, 2)", "X": 41, "Y": 21, "Z": 2},
    "image": {"bare": "https://www.thecolorapi.com/id?format=svg&named=false&hex=FF0000", "named": "https://www.thecolorapi.com/id?format=svg&hex=FF0000"},
    "contrast": {"value": "#000000"},
    "_links": {"self": {"href": "/id?hex=FF0000"}},
    "_embedded": {}
}"##;

/// A near-miss: #1A2B3C is not a named color
pub const NEAR_MISS_JSON: &str = r##"{
    "hex": {"value": "#1A2B3C", "clean": "1A2B3C"},
    "rgb": {"fraction": {"r": 0.1, "g": 0.17, "b": 0.24}, "r": 26, "g": 43, "b": 60, "value": "rgb(26, 43, 60)"},
    "hsl": {"fraction": {"h": 0.58, "s": 0.4, "l": 0.17}, "h": 210, "s": 40, "l": 17, "value": "hsl(210, 40%, 17%)"},
    "hsv": {"fraction": {"h": 0.58, "s": 0.57, "v": 0.24}, "value": "hsv(210, 57%, 24%)", "h": 210, "s": 57, "v": 24},
    "name": {"value": "Big Stone", "closest_named_hex": "#162A40", "exact_match_name": false, "distance": 420},
    "cmyk": {"fraction": {"c": 0.57, "m": 0.28, "y": 0, "k": 0.76}, "value": "cmyk(57, 28, 0, 76)", "c": 57, "m": 28, "y": 0, "k": 76},
    "XYZ": {"fraction": {"X": 0.02, "Y": 0.02, "Z": 0.05}, "value": "XYZ(2, 2, 5)", "X": 2, "Y": 2, "Z": 5},
    "image": {"bare": "", "named": ""},
    "contrast": {"value": "#ffffff"},
    "_links": {"self": {"href": "/id?hex=1A2B3C"}},
    "_embedded": {}
}"##;

pub const NAMES_JSON: &str = r#"{"colors": [
    {"name": "Red", "r": 255, "g": 0, "b": 0},
    {"name": "Big Stone", "r": 22, "g": 42, "b": 64},
    {"name": "Cornflower Blue", "r": 100, "g": 149, "b": 237}
]}"#;

pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

/// A single-route server answering every GET with a canned response
#[derive(Clone)]
pub struct FakeEndpoint {
    pub url: String,
    calls: Arc<AtomicUsize>,
    queries: Arc<Mutex<Vec<String>>>,
}

impl FakeEndpoint {
    pub async fn start(status: StatusCode, content_type: &'static str, body: impl Into<Vec<u8>>) -> Self {
        let calls = Arc::new(AtomicUsize::new(0));
        let queries = Arc::new(Mutex::new(Vec::new()));
        let body: Vec<u8> = body.into();

        let route = {
            let calls = calls.clone();
            let queries = queries.clone();
            get(move |RawQuery(raw): RawQuery| {
                let calls = calls.clone();
                let queries = queries.clone();
                let body = body.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    queries.lock().unwrap().push(raw.unwrap_or_default());
                    (status, [(header::CONTENT_TYPE, content_type)], body)
                }
            })
        };

        let base = spawn(Router::new().route("/endpoint", route)).await;
        Self {
            url: format!("{base}/endpoint"),
            calls,
            queries,
        }
    }

    pub async fn json(body: &str) -> Self {
        Self::start(StatusCode::OK, "application/json", body).await
    }

    pub async fn png() -> Self {
        Self::start(StatusCode::OK, "image/png", PNG).await
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_raw_query(&self) -> Option<String> {
        self.queries.lock().unwrap().last().cloned()
    }

    /// Decoded `key=value` pairs of the most recent request
    pub fn last_query(&self) -> Vec<(String, String)> {
        let raw = self.last_raw_query().unwrap_or_default();
        reqwest::Url::parse(&format!("http://fake/?{raw}"))
            .unwrap()
            .query_pairs()
            .into_owned()
            .collect()
    }
}

pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// URL of a port nobody listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/endpoint")
}

pub fn config(names_url: &str, api_url: &str, renderer_url: &str) -> Config {
    Config {
        color_names_url: names_url.into(),
        color_api_url: api_url.into(),
        tex_renderer_url: renderer_url.into(),
        tex_preamble: String::new(),
        http_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

pub async fn state(names: &FakeEndpoint, api: &FakeEndpoint, renderer: &FakeEndpoint) -> AppState {
    AppState::initialize(&config(&names.url, &api.url, &renderer.url))
        .await
        .unwrap()
}
