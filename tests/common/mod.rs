//! In-process stand-in for the universities directory and the logo service

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub type SearchLog = Arc<Mutex<Vec<String>>>;

pub struct MockServer {
    pub base_url: String,
    pub searches: SearchLog,
}

impl MockServer {
    pub fn searches(&self) -> Vec<String> {
        self.searches.lock().unwrap().clone()
    }
}

/// Domains the fake logo service has an image for
const LOGO_DOMAINS: [&str; 2] = ["mit.edu", "harvard.edu"];

fn directory() -> Vec<Value> {
    vec![
        json!({
            "name": "Massachusetts Institute of Technology",
            "domains": ["mit.edu"],
            "web_pages": ["http://web.mit.edu/"],
            "alpha_two_code": "US",
            "state-province": null,
            "country": "United States"
        }),
        json!({
            "name": "Harvard University",
            "domains": ["harvard.edu", "hbs.edu"],
            "web_pages": ["http://www.harvard.edu/"],
            "alpha_two_code": "US",
            "state-province": null,
            "country": "United States"
        }),
        json!({
            "name": "Nowhere Institute",
            "domains": ["nologo.example"],
            "country": "Nowhere"
        }),
        json!({
            "name": "Texas A&M University",
            "domains": ["tamu.edu"],
            "country": "United States"
        }),
    ]
}

async fn search(
    State(searches): State<SearchLog>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let name = params.get("name").cloned().unwrap_or_default();
    searches.lock().unwrap().push(name.clone());

    if name.contains("boom") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "directory unavailable").into_response();
    }

    let needle = name.to_lowercase();
    let matches: Vec<Value> = directory()
        .into_iter()
        .filter(|entry| {
            entry["name"]
                .as_str()
                .is_some_and(|n| n.to_lowercase().contains(&needle))
                || (needle == "mit" && entry["domains"][0] == "mit.edu")
        })
        .collect();
    Json(matches).into_response()
}

async fn logo(Path(domain): Path<String>) -> Response {
    if LOGO_DOMAINS.contains(&domain.as_str()) {
        ([(header::CONTENT_TYPE, "image/png")], vec![0x89u8, b'P', b'N', b'G']).into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Start the fake services on an ephemeral port. Must be called from
/// within a tokio runtime that outlives the test.
pub async fn spawn_mock_server() -> MockServer {
    let searches: SearchLog = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/search", get(search))
        .route("/:domain", get(logo))
        .with_state(searches.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockServer {
        base_url: format!("http://{}", addr),
        searches,
    }
}
