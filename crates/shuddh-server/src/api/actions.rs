use axum::{
    extract::{rejection::JsonRejection, State},
    response::Response,
    Extension, Json,
};
use shuddh_advisory::{
    ChatRequest, HealthForm, HealthReportRequest, NewsRequest, ReverseGeocodeRequest, TipsRequest,
};

use super::{parse_body, respond, AppState};
use crate::middleware::RequestId;

pub(super) async fn health_advisory(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<HealthForm>, JsonRejection>,
) -> Response {
    let form = match parse_body(&req_id, body) {
        Ok(form) => form,
        Err(response) => return response,
    };
    respond(req_id, state.service.get_health_advisory(form).await)
}

pub(super) async fn chat(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(&req_id, body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    respond(req_id, state.service.chat(request).await)
}

pub(super) async fn pollution_tips(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<TipsRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(&req_id, body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    respond(
        req_id,
        state.service.get_pollution_reduction_tips(request).await,
    )
}

pub(super) async fn news(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<NewsRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(&req_id, body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    respond(req_id, state.service.get_news(request).await)
}

pub(super) async fn reverse_geocode(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<ReverseGeocodeRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(&req_id, body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    respond(req_id, state.service.reverse_geocode(request).await)
}

pub(super) async fn health_report(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<HealthReportRequest>, JsonRejection>,
) -> Response {
    let request = match parse_body(&req_id, body) {
        Ok(request) => request,
        Err(response) => return response,
    };
    respond(req_id, state.service.extract_health_report(request).await)
}
