mod analyze;
mod image_proxy;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use prodlens_core::{AppConfig, IMAGE_PROXY_PATH};
use prodlens_extract::Extractor;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::mcp::ProdlensMcp;
use crate::middleware::{request_id, REQUEST_ID_HEADER};

pub use image_proxy::build_image_client;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub extractor: Arc<Extractor>,
    /// Used only for fetching proxied CDN images.
    pub image_client: reqwest::Client,
}

impl AppState {
    /// # Errors
    ///
    /// Fails if either upstream client cannot be constructed.
    pub fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let extractor = Arc::new(Extractor::from_config(&config)?);
        let image_client = build_image_client(Duration::from_secs(config.upstream_timeout_secs))?;
        Ok(Self {
            config,
            extractor,
            image_client,
        })
    }
}

/// JSON error response: `{"error": "..."}` with the given status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), error = %self.message, "request failed");
        }
        (
            self.status,
            Json(ErrorBody {
                error: &self.message,
            }),
        )
            .into_response()
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderName::from_static("mcp-session-id"),
        ])
        .expose_headers([
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderName::from_static("mcp-session-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    let mcp_extractor = Arc::clone(&state.extractor);
    let mcp_base_url = state.config.server_base_url.clone();
    let mcp = StreamableHttpService::new(
        move || {
            Ok(ProdlensMcp::new(
                Arc::clone(&mcp_extractor),
                mcp_base_url.clone(),
            ))
        },
        LocalSessionManager::default().into(),
        StreamableHttpServerConfig::default(),
    );

    Router::new()
        .route("/api/health", get(health))
        .route(IMAGE_PROXY_PATH, get(image_proxy::proxy_image))
        .route(
            "/api/analyze-amazon-product",
            get(analyze::analyze_product),
        )
        .with_state(state)
        .nest_service("/mcp", mcp)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
