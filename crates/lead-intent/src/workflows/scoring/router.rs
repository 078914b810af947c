use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;

use crate::error::AppError;

use super::domain::Offer;
use super::repository::SessionStore;
use super::service::{LeadScoringService, ScoringServiceError};

const UPLOAD_FIELD: &str = "file";

/// Largest accepted lead upload. axum's 2 MiB default is too small for real exports.
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

/// Router builder exposing offer, lead upload, scoring and result endpoints.
pub fn scoring_router<S>(service: Arc<LeadScoringService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/", get(root_handler))
        .route("/offer", post(offer_handler::<S>))
        .route(
            "/leads/upload",
            post(upload_handler::<S>).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/score", post(score_handler::<S>))
        .route("/results", get(results_handler::<S>))
        .route("/results/csv", get(export_handler::<S>))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let payload = json!({ "error": message.into() });
    (status, Json(payload)).into_response()
}

fn service_error_response(error: ScoringServiceError) -> Response {
    AppError::from(error).into_response()
}

pub(crate) async fn root_handler() -> Json<serde_json::Value> {
    Json(json!({ "message": "Lead Scoring API." }))
}

pub(crate) async fn offer_handler<S>(
    State(service): State<Arc<LeadScoringService<S>>>,
    payload: Result<Json<Offer>, JsonRejection>,
) -> Response
where
    S: SessionStore + 'static,
{
    let Json(offer) = match payload {
        Ok(offer) => offer,
        Err(rejection) => return error_response(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match service.set_offer(offer) {
        Ok(offer) => {
            let payload = json!({
                "message": "Product offer uploaded successfully",
                "offer": offer,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn upload_handler<S>(
    State(service): State<Arc<LeadScoringService<S>>>,
    mut multipart: Multipart,
) -> Response
where
    S: SessionStore + 'static,
{
    let mut upload = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some(UPLOAD_FIELD) {
                    continue;
                }
                let file_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => {
                        upload = Some((file_name, bytes));
                        break;
                    }
                    Err(err) => {
                        return error_response(
                            StatusCode::BAD_REQUEST,
                            format!("Failed to read upload: {err}"),
                        )
                    }
                }
            }
            Ok(None) => break,
            Err(err) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Invalid multipart payload: {err}"),
                )
            }
        }
    }

    let Some((file_name, bytes)) = upload else {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Missing '{UPLOAD_FIELD}' upload field"),
        );
    };

    if !file_name.to_ascii_lowercase().ends_with(".csv") {
        return error_response(StatusCode::BAD_REQUEST, "Only CSV files are supported");
    }

    match service.upload_leads(bytes.as_ref()) {
        Ok(count) => {
            let payload = json!({ "message": format!("Uploaded {count} leads.") });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn score_handler<S>(
    State(service): State<Arc<LeadScoringService<S>>>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.score_uploaded().await {
        Ok(summary) => {
            let payload = json!({
                "message": format!("Scoring complete for {} leads.", summary.total_scored),
                "total_scored": summary.total_scored,
                "degraded": summary.degraded,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn results_handler<S>(
    State(service): State<Arc<LeadScoringService<S>>>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.results() {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn export_handler<S>(
    State(service): State<Arc<LeadScoringService<S>>>,
) -> Response
where
    S: SessionStore + 'static,
{
    match service.export_csv() {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.as_ref()),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"scored_leads.csv\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(error) => service_error_response(error),
    }
}
