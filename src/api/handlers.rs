//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::{
    dispatch::submit,
    error::PrayerError,
    state::{AppState, Page, View},
};
use super::{
    bindings::{ClickPayload, UiAction},
    responses::{ApiResponse, HealthResponse, StatusResponse},
};

/// Handle POST /ui/:element_id - Run the action bound to a page element
pub async fn click_handler(
    State(state): State<Arc<AppState>>,
    Path(element_id): Path<String>,
    payload: Option<Json<ClickPayload>>,
) -> Response {
    let Some(action) = UiAction::from_element_id(&element_id) else {
        warn!("No binding for element '{}'", element_id);
        return StatusCode::NOT_FOUND.into_response();
    };
    let value = payload.and_then(|Json(payload)| payload.value);

    let result = match action {
        UiAction::StartPrayer => state
            .show_page(Page::Prayer)
            .map(|view| ApiResponse::ok("Prayer page opened", view)),
        UiAction::BeginTimer => state
            .begin(value.as_deref().unwrap_or_default())
            .map(|view| ApiResponse::ok("Prayer timer started", view)),
        UiAction::PauseTimer => state.toggle_pause().map(|view| {
            let message = format!("Prayer timer {}", view.phase);
            ApiResponse::ok(message, view)
        }),
        UiAction::ResetTimer => state
            .reset()
            .map(|view| ApiResponse::ok("Prayer timer reset", view)),
        UiAction::EditReflection => state
            .set_draft(value.as_deref().unwrap_or_default())
            .map(|view| ApiResponse::ok("Reflection saved", view)),
        UiAction::SendReflection => submit(&state, value.as_deref()).and_then(|submission| {
            let view = state.view()?;
            Ok(ApiResponse::ok("Reflection sent", view).with_submission(submission))
        }),
        UiAction::CopyInvite => state
            .copy_invite()
            .await
            .map(|view| ApiResponse::ok("Link Copied!", view)),
    };

    match result {
        Ok(response) => {
            info!("{} handled: {}", action.element_id(), response.message);
            Json(response).into_response()
        }
        Err(e) => error_response(&state, e),
    }
}

/// Map an error to its status code and a notice carrying the current view
fn error_response(state: &AppState, err: PrayerError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("Request failed: {}", err);
    } else {
        warn!("Request rejected: {}", err);
    }

    match state.view() {
        Ok(view) => (status, Json(ApiResponse::notice(err.to_string(), view))).into_response(),
        Err(_) => status.into_response(),
    }
}

pub fn status_for(err: &PrayerError) -> StatusCode {
    match err {
        PrayerError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PrayerError::InvalidTransition { .. } => StatusCode::CONFLICT,
        PrayerError::Clipboard(_) => StatusCode::BAD_GATEWAY,
        PrayerError::StateLock(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle GET /view - Return the page as it currently stands
pub async fn view_handler(State(state): State<Arc<AppState>>) -> Result<Json<View>, StatusCode> {
    state.view().map(Json).map_err(|e| {
        error!("Failed to render view: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })
}

/// Handle GET /status - Return current view plus server information
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let view = match state.view() {
        Ok(v) => v,
        Err(e) => {
            error!("Failed to render view: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let timer_state = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        view,
        configured_minutes: timer_state.configured_minutes,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
