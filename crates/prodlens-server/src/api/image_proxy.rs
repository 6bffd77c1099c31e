//! `GET /api/image-proxy?url=...` streams an Amazon CDN image back from this
//! origin so widget iframes can display it.

use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use prodlens_core::image_proxy::is_amazon_image_host;
use serde::Deserialize;

use super::{ApiError, AppState};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const IMAGE_ACCEPT: &str = "image/webp,image/apng,image/*,*/*;q=0.8";
const AMAZON_REFERER: &str = "https://www.amazon.com/";
const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";
const CACHE_CONTROL_DAY: &str = "public, max-age=86400";

#[derive(Debug, Deserialize)]
pub(super) struct ImageProxyQuery {
    url: Option<String>,
}

/// Builds the client used for CDN fetches.
///
/// # Errors
///
/// Returns the `reqwest` error if the client cannot be constructed.
pub fn build_image_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .user_agent(BROWSER_USER_AGENT)
        .build()
}

pub(super) async fn proxy_image(
    State(state): State<AppState>,
    Query(query): Query<ImageProxyQuery>,
) -> Result<Response, ApiError> {
    let Some(raw) = query.url.filter(|u| !u.is_empty()) else {
        return Err(ApiError::bad_request("URL parameter is required"));
    };

    let parsed = reqwest::Url::parse(&raw)
        .ok()
        .filter(|url| url.host_str().is_some_and(is_amazon_image_host));
    let Some(parsed) = parsed else {
        tracing::warn!(image_url = %raw, "rejected non-amazon image url");
        return Err(ApiError::new(
            StatusCode::FORBIDDEN,
            "Only Amazon image URLs are allowed",
        ));
    };

    fetch_image(&state.image_client, parsed).await
}

/// Fetches an image with browser-like headers and rewraps it with caching
/// and open CORS headers.
async fn fetch_image(client: &reqwest::Client, url: reqwest::Url) -> Result<Response, ApiError> {
    let upstream = client
        .get(url.clone())
        .header(header::ACCEPT, IMAGE_ACCEPT)
        .header(header::REFERER, AMAZON_REFERER)
        .send()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to proxy image: {e}")))?;

    if !upstream.status().is_success() {
        tracing::warn!(image_url = %url, status = upstream.status().as_u16(), "image upstream returned error");
        return Err(ApiError::new(StatusCode::BAD_GATEWAY, "Failed to fetch image"));
    }

    let content_type = content_type_or_default(upstream.headers().get(header::CONTENT_TYPE));
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| ApiError::internal(format!("Failed to proxy image: {e}")))?;

    tracing::debug!(image_url = %url, bytes = bytes.len(), "proxied image");

    Ok((
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_DAY)),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
        ],
        Body::from(bytes),
    )
        .into_response())
}

fn content_type_or_default(value: Option<&HeaderValue>) -> HeaderValue {
    value
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CONTENT_TYPE))
}
