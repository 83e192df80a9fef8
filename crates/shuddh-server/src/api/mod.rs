mod actions;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shuddh_advisory::{ActionErrorKind, ActionResponse, AdvisoryService};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{
    enforce_rate_limit, request_id, RateLimitState, RequestId, REQUEST_ID_HEADER,
};

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AdvisoryService>,
}

/// Envelope for every JSON response: exactly one of `data` or `error` is set.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<String>,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    sources: Vec<SourceStatus>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct SourceStatus {
    name: &'static str,
    configured: bool,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

fn status_for(kind: Option<ActionErrorKind>) -> StatusCode {
    match kind {
        None => StatusCode::OK,
        Some(ActionErrorKind::Validation) => StatusCode::BAD_REQUEST,
        Some(ActionErrorKind::NotFound) => StatusCode::NOT_FOUND,
        Some(ActionErrorKind::Upstream) => StatusCode::BAD_GATEWAY,
    }
}

/// Wraps an action result in the envelope with its HTTP status.
pub(super) fn respond<T: Serialize>(req_id: RequestId, action: ActionResponse<T>) -> Response {
    let status = status_for(action.kind);
    if !action.is_ok() {
        tracing::info!(
            request_id = %req_id.0,
            status = status.as_u16(),
            error = action.error.as_deref().unwrap_or_default(),
            "action returned an error"
        );
    }
    (
        status,
        Json(ApiResponse {
            data: action.data,
            error: action.error,
            meta: ResponseMeta::new(req_id.0),
        }),
    )
        .into_response()
}

/// Unwraps a JSON body or renders the 400 envelope for it.
pub(super) fn parse_body<T>(
    req_id: &RequestId,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match body {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(request_id = %req_id.0, error = %rejection, "rejected request body");
            let message = format!("Invalid request body: {}", rejection.body_text());
            Err(respond::<()>(
                req_id.clone(),
                ActionResponse::fail(ActionErrorKind::Validation, message),
            ))
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
        .expose_headers([HeaderName::from_static(REQUEST_ID_HEADER)])
}

fn action_router(rate_limit: RateLimitState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/advisory", post(actions::health_advisory))
        .route("/api/v1/chat", post(actions::chat))
        .route("/api/v1/tips", post(actions::pollution_tips))
        .route("/api/v1/news", post(actions::news))
        .route("/api/v1/reverse-geocode", post(actions::reverse_geocode))
        .route("/api/v1/health-report", post(actions::health_report))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app(state: AppState, rate_limit: RateLimitState) -> Router {
    let public_routes = Router::new().route("/api/v1/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(action_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let sources = state
        .service
        .configured_sources()
        .into_iter()
        .map(|(name, configured)| SourceStatus { name, configured })
        .collect();

    Json(ApiResponse {
        data: Some(HealthData {
            status: "ok",
            sources,
        }),
        error: None,
        meta: ResponseMeta::new(req_id.0),
    })
}
