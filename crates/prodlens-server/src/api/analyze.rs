use axum::{
    extract::{Query, State},
    Json,
};
use prodlens_core::{AnalyzeRequest, ProductAnalysisData};
use serde::Deserialize;

use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct AnalyzeQuery {
    url: Option<String>,
    zipcode: Option<String>,
}

/// `GET /api/analyze-amazon-product?url=...&zipcode=...`
pub(super) async fn analyze_product(
    State(state): State<AppState>,
    Query(query): Query<AnalyzeQuery>,
) -> Result<Json<ProductAnalysisData>, ApiError> {
    let Some(url) = query.url.filter(|u| !u.is_empty()) else {
        return Err(ApiError::bad_request("URL parameter is required"));
    };

    let request = AnalyzeRequest {
        url,
        zipcode: query.zipcode.filter(|z| !z.is_empty()),
    };

    state
        .extractor
        .analyze(&request)
        .await
        .map(Json)
        .map_err(|e| ApiError::internal(format!("Failed to analyze product: {e}")))
}
