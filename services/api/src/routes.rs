use crate::error::AppError;
use crate::infra::AppState;
use crate::upload::{parse_envelope, read_file_part};
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use probe_model::probe::{Diagnostics, ProbeEvaluator, ProbeResult};
use serde_json::json;
use std::sync::Arc;

/// Router exposing the upload and JSON evaluation endpoints.
pub(crate) fn probe_router<D>(evaluator: Arc<ProbeEvaluator<D>>) -> Router
where
    D: Diagnostics + 'static,
{
    Router::new()
        .route("/upload", post(upload_endpoint::<D>))
        .route("/api/v1/probe/evaluate", post(evaluate_endpoint::<D>))
        .with_state(evaluator)
}

pub(crate) fn with_probe_routes<D>(evaluator: Arc<ProbeEvaluator<D>>) -> Router
where
    D: Diagnostics + 'static,
{
    probe_router(evaluator)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn upload_endpoint<D>(
    State(evaluator): State<Arc<ProbeEvaluator<D>>>,
    mut multipart: Multipart,
) -> Result<Json<ProbeResult>, AppError>
where
    D: Diagnostics + 'static,
{
    let payload = read_file_part(&mut multipart).await?;
    let document = parse_envelope(&payload)?;
    Ok(Json(evaluator.evaluate(&document)))
}

pub(crate) async fn evaluate_endpoint<D>(
    State(evaluator): State<Arc<ProbeEvaluator<D>>>,
    body: Bytes,
) -> Result<Json<ProbeResult>, AppError>
where
    D: Diagnostics + 'static,
{
    let document = parse_envelope(&body)?;
    Ok(Json(evaluator.evaluate(&document)))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
