/// HTTP request handlers
use crate::domain::Health;
use crate::errors::ApiResult;
use crate::services::ApodService;
use crate::view::{render_html, select_view, ViewInstruction};
use axum::{
    extract::State,
    response::{Html, Redirect},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub apod_service: Arc<ApodService>,
}

/// Successful response wrapper
#[derive(Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub ok: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { ok: true, data }
    }
}

#[derive(Serialize)]
pub struct ViewResponse {
    pub version: u64,
    pub updated_at: DateTime<Utc>,
    pub view: ViewInstruction,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

/// Render the APOD screen for the current outcome
pub async fn screen(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.apod_service.store().current();
    Html(render_html(&select_view(&snapshot.outcome)))
}

/// Current view instruction as JSON
pub async fn get_view(State(state): State<AppState>) -> Json<SuccessResponse<ViewResponse>> {
    let snapshot = state.apod_service.store().current();
    Json(SuccessResponse::new(ViewResponse {
        version: snapshot.version,
        updated_at: snapshot.updated_at,
        view: select_view(&snapshot.outcome),
    }))
}

/// Retry after a failed fetch, then send the user back to the screen
pub async fn retry(State(state): State<AppState>) -> ApiResult<Redirect> {
    // the fetch finishes in the background
    drop(state.apod_service.retry()?);
    info!("Retry accepted");
    Ok(Redirect::to("/"))
}
