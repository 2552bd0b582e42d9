//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tracing::{error, info, warn};

use crate::state::{AppState, CountdownView, Field, IntentResult, StateError};
use super::responses::{FieldInput, HealthResponse, IntentResponse, StatusResponse};

fn respond(
    intent: &str,
    result: Result<IntentResult, StateError>,
) -> Result<Json<IntentResponse>, StatusCode> {
    match result {
        Ok(result) => {
            if result.applied {
                info!("{} endpoint called - state now {:?}", intent, result.view.state);
            }
            Ok(Json(IntentResponse::from_result(intent, result)))
        }
        Err(e) => {
            error!("Failed to apply {}: {}", intent, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle POST /play - Start or resume the countdown
pub async fn play_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IntentResponse>, StatusCode> {
    respond("play", state.play())
}

/// Handle POST /pause - Pause a running countdown
pub async fn pause_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IntentResponse>, StatusCode> {
    respond("pause", state.pause())
}

/// Handle POST /stop - Stop and reset the countdown
pub async fn stop_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IntentResponse>, StatusCode> {
    respond("stop", state.stop())
}

/// Handle POST /fields/:field/focus - Clear a field for editing
pub async fn field_focus_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<Field>,
) -> Result<Json<IntentResponse>, StatusCode> {
    respond(&format!("focus {}", field), state.focus_field(field))
}

/// Handle PUT /fields/:field - Replace a field with normalized input
pub async fn field_change_handler(
    State(state): State<Arc<AppState>>,
    Path(field): Path<Field>,
    Json(input): Json<FieldInput>,
) -> Result<Json<IntentResponse>, StatusCode> {
    respond(&format!("change {}", field), state.change_field(field, &input.raw))
}

/// Handle POST /edit-done - Reformat fields after editing
pub async fn edit_done_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IntentResponse>, StatusCode> {
    respond("edit-done", state.edit_done())
}

/// Handle GET /status - Return the current view and server metadata
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, StatusCode> {
    let view = match state.get_view() {
        Ok(view) => view,
        Err(e) => {
            error!("Failed to get countdown view: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        view,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

fn view_event(view: &CountdownView) -> Event {
    match Event::default().event("view").json_data(view) {
        Ok(event) => event,
        Err(e) => {
            warn!("Failed to encode countdown view: {}", e);
            Event::default().event("error").data(e.to_string())
        }
    }
}

/// Handle GET /events - Stream every view change, starting with the current one
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let views = state.subscribe_views();

    let stream = stream::unfold((views, true), |(mut views, first)| async move {
        if !first && views.changed().await.is_err() {
            return None;
        }
        let event = view_event(&views.borrow_and_update());
        Some((Ok(event), (views, false)))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
