use crate::server::AppContext;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use requestarr_core::MediaKind;
use serde::Serialize;

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/health", get(health))
        .route("/providers", get(get_providers))
        .route("/providers/:kind/test", post(test_provider))
}

async fn health(State(ctx): State<AppContext>) -> impl IntoResponse {
    let providers: Vec<MediaKind> = ctx.providers.kinds();
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "providers": providers,
    }))
}

#[derive(Serialize)]
struct ProviderStatus {
    kind: MediaKind,
    name: &'static str,
    url: String,
    enabled: bool,
}

async fn get_providers(State(ctx): State<AppContext>) -> impl IntoResponse {
    let providers: Vec<ProviderStatus> = ctx
        .config
        .providers
        .iter()
        .map(|(kind, provider)| ProviderStatus {
            kind,
            name: kind.provider_name(),
            url: provider.url.clone(),
            enabled: provider.enabled,
        })
        .collect();
    Json(providers)
}

#[derive(Serialize)]
struct TestResult {
    success: bool,
    error: Option<String>,
}

async fn test_provider(
    State(ctx): State<AppContext>,
    Path(kind): Path<String>,
) -> Result<Json<TestResult>, StatusCode> {
    let kind: MediaKind = kind.parse().map_err(|_| StatusCode::NOT_FOUND)?;

    match ctx.config.providers.get(kind) {
        Some(provider) => {
            if !provider.enabled {
                return Ok(Json(TestResult {
                    success: false,
                    error: Some(format!("{} is disabled", kind.provider_name())),
                }));
            }

            let client = ctx.providers.get(kind).map_err(|_| StatusCode::NOT_FOUND)?;
            match client.test_connection().await {
                Ok(true) => Ok(Json(TestResult {
                    success: true,
                    error: None,
                })),
                Ok(false) => Ok(Json(TestResult {
                    success: false,
                    error: Some("Connection failed: API returned non-success status".to_string()),
                })),
                Err(e) => Ok(Json(TestResult {
                    success: false,
                    error: Some(format!("Connection failed: {}", e)),
                })),
            }
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}
