//! Route handlers. Each one validates its input, calls into `estimate_core`,
//! and maps failures through [`ApiError`].

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use estimate_core::estimator::{estimate_request, Estimate};
use estimate_core::model::{BoxModel, OBJ_CONTENT_TYPE};
use estimate_core::pdf::render_estimate_pdf;
use estimate_core::request::{coerce_positive_integer, parse_design_style, RawEstimateRequest};
use estimate_core::{DesignStyle, EstimateError, StyleCatalog};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::error::ApiError;

/// Content type of rendered reports
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<StyleCatalog>,
}

impl AppState {
    pub fn new(catalog: StyleCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

/// Body of `POST /estimate/report`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportRequest {
    #[serde(flatten)]
    pub estimate: RawEstimateRequest,
    /// Client or project name printed on the report
    #[serde(default)]
    pub prepared_for: Option<String>,
}

/// Body of `POST /generate-model`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateModelRequest {
    #[serde(default)]
    pub size: Option<Value>,
    #[serde(default)]
    pub design_style: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateModelResponse {
    pub model_url: String,
}

/// `POST /estimate`
pub async fn estimate(
    State(state): State<AppState>,
    payload: Result<Json<RawEstimateRequest>, JsonRejection>,
) -> Result<Json<Estimate>, ApiError> {
    let Json(raw) = payload?;
    let request = raw.validate()?;

    let result = estimate_request(&state.catalog, &request)?;
    debug!(
        "Estimated {} m² {}: total {:.2}",
        request.size, request.design_style, result.total_cost
    );
    Ok(Json(result))
}

/// `POST /estimate/report`
pub async fn estimate_report(
    State(state): State<AppState>,
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let request = body.estimate.validate()?;
    let result = estimate_request(&state.catalog, &request)?;

    let prepared_for = body
        .prepared_for
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| "Client".to_string());

    info!(
        "Rendering report for {} m² {} ({})",
        request.size, request.design_style, prepared_for
    );
    // Typst compilation is CPU-bound
    let pdf = tokio::task::spawn_blocking(move || {
        render_estimate_pdf(&request, &result, &prepared_for)
    })
    .await??;

    Ok((
        [
            (header::CONTENT_TYPE, PDF_CONTENT_TYPE),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"estimate.pdf\"",
            ),
        ],
        pdf,
    ))
}

/// `POST /generate-model`
pub async fn generate_model(
    payload: Result<Json<GenerateModelRequest>, JsonRejection>,
) -> Result<Json<GenerateModelResponse>, ApiError> {
    let Json(body) = payload?;

    if body.size.as_ref().map_or(true, Value::is_null) {
        return Err(EstimateError::missing_field("size").into());
    }
    let style = parse_design_style(body.design_style.as_ref())?;
    let size = coerce_positive_integer("size", body.size.as_ref())?;

    Ok(Json(GenerateModelResponse {
        model_url: model_url(style, size),
    }))
}

/// `GET /models/:style/:file`
pub async fn get_model(
    Path((style, file)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let style: DesignStyle = style.parse()?;
    let size = file
        .strip_suffix(".obj")
        .ok_or_else(|| ApiError::BadRequest(format!("Unknown model file '{}'", file)))?;
    let size = coerce_positive_integer("size", Some(&Value::String(size.to_string())))?;

    let obj = BoxModel::placeholder(size, style)?.to_obj();
    Ok(([(header::CONTENT_TYPE, OBJ_CONTENT_TYPE)], obj))
}

/// `GET /catalog`
pub async fn catalog(State(state): State<AppState>) -> Json<StyleCatalog> {
    Json(state.catalog.as_ref().clone())
}

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// URL under which `get_model` serves a generated model
pub fn model_url(style: DesignStyle, size: u64) -> String {
    format!("/models/{}/{}", style.name(), BoxModel::file_name(size))
}
