//! Shared test harness for integration tests.
//!
//! [`TestHarness`] starts one wiremock server per provider kind and builds a
//! full [`AppContext`] pointing at them. [`TestHarness::with_server`] also
//! runs Axum on a random port for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::body::Body;
use axum::Router;
use http_body_util::BodyExt;
use requestarr::config::{Config, ProviderConfig};
use requestarr::server::{create_router, AppContext};
use requestarr_core::MediaKind;
use serde_json::Value;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";

/// Fake Sonarr, Radarr and Lidarr plus an app context wired to them.
pub struct TestHarness {
    pub ctx: AppContext,
    pub sonarr: MockServer,
    pub radarr: MockServer,
    pub lidarr: MockServer,
}

impl TestHarness {
    /// All three providers configured.
    pub async fn new() -> Self {
        Self::with_kinds(&MediaKind::ALL).await
    }

    /// Only the given kinds configured; the other mock servers still run.
    pub async fn with_kinds(kinds: &[MediaKind]) -> Self {
        let sonarr = MockServer::start().await;
        let radarr = MockServer::start().await;
        let lidarr = MockServer::start().await;

        let mut config = Config::default();
        config.server.request_timeout_secs = 2;
        for kind in kinds {
            let uri = match kind {
                MediaKind::Tv => sonarr.uri(),
                MediaKind::Movie => radarr.uri(),
                MediaKind::Music => lidarr.uri(),
            };
            *config.providers.slot_mut(*kind) = Some(ProviderConfig::new(uri, API_KEY));
        }

        Self {
            ctx: AppContext::from_config(config),
            sonarr,
            radarr,
            lidarr,
        }
    }

    pub fn mock(&self, kind: MediaKind) -> &MockServer {
        match kind {
            MediaKind::Tv => &self.sonarr,
            MediaKind::Movie => &self.radarr,
            MediaKind::Music => &self.lidarr,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone(), None)
    }

    /// Start an Axum server on a random port, serving the UI from
    /// `static_dir` when given.
    pub async fn with_server(&self, static_dir: Option<PathBuf>) -> SocketAddr {
        let app = create_router(self.ctx.clone(), static_dir);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }

    /// Mount a lookup response for `kind`, matching the term and API key.
    pub async fn mock_lookup(&self, kind: MediaKind, term: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(lookup_path(kind)))
            .and(query_param("term", term))
            .and(header("X-Api-Key", API_KEY))
            .respond_with(response)
            .mount(self.mock(kind))
            .await;
    }

    /// Mount a root folder listing for `kind`.
    pub async fn mock_root_folders(&self, kind: MediaKind, folders: Value) {
        Mock::given(method("GET"))
            .and(path(format!("{}/rootfolder", api_prefix(kind))))
            .respond_with(ResponseTemplate::new(200).set_body_json(folders))
            .mount(self.mock(kind))
            .await;
    }

    /// Mount an add endpoint for `kind`, expecting exactly one call.
    pub async fn mock_add(&self, kind: MediaKind, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(add_path(kind)))
            .and(header("X-Api-Key", API_KEY))
            .respond_with(response)
            .expect(1)
            .mount(self.mock(kind))
            .await;
    }

    /// JSON bodies of every request the `kind` mock received on `path`.
    pub async fn received_json(&self, kind: MediaKind, on_path: &str) -> Vec<Value> {
        self.mock(kind)
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.url.path() == on_path)
            .map(|r| serde_json::from_slice(&r.body).expect("request body is JSON"))
            .collect()
    }
}

pub fn api_prefix(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Music => "/api/v1",
        _ => "/api/v3",
    }
}

pub fn lookup_path(kind: MediaKind) -> String {
    let resource = match kind {
        MediaKind::Tv => "series",
        MediaKind::Movie => "movie",
        MediaKind::Music => "artist",
    };
    format!("{}/{}/lookup", api_prefix(kind), resource)
}

pub fn add_path(kind: MediaKind) -> String {
    let resource = match kind {
        MediaKind::Tv => "series",
        MediaKind::Movie => "movie",
        MediaKind::Music => "artist",
    };
    format!("{}/{}", api_prefix(kind), resource)
}

/// `count` lookup entries for `kind` with distinct ids and titles.
pub fn lookup_results(kind: MediaKind, count: usize) -> Value {
    let items: Vec<Value> = (1..=count)
        .map(|i| match kind {
            MediaKind::Tv => serde_json::json!({
                "title": format!("Show {}", i),
                "tvdbId": 1000 + i,
                "year": 2000 + i,
                "statistics": {"seasonCount": i}
            }),
            MediaKind::Movie => serde_json::json!({
                "title": format!("Movie {}", i),
                "tmdbId": 2000 + i,
                "year": 1990 + i
            }),
            MediaKind::Music => serde_json::json!({
                "artistName": format!("Artist {}", i),
                "foreignArtistId": format!("mbid-{}", i)
            }),
        })
        .collect();
    Value::Array(items)
}

/// Helper to get response body as JSON
pub async fn body_json(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Unroutable address so provider calls fail fast.
pub fn dead_provider() -> ProviderConfig {
    ProviderConfig::new("http://127.0.0.1:1", API_KEY)
}
