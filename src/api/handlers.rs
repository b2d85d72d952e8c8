//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Html, Json,
    },
};
use futures::stream::{Stream, StreamExt};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, error, info};

use crate::{
    error::TimerError,
    state::{ActionOutcome, AppState},
};
use super::{
    input::DurationRequest,
    responses::{ApiResponse, HealthResponse, StatusResponse},
};

const CONTROL_PAGE: &str = include_str!("page.html");

fn respond(action: &str, result: Result<ActionOutcome, TimerError>) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(outcome) => Ok(Json(ApiResponse::from_outcome(action, outcome))),
        Err(e) => {
            error!("Failed to {}: {}", action, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// Handle GET / - Serve the control page
pub async fn index_handler() -> Html<&'static str> {
    Html(CONTROL_PAGE)
}

/// Handle POST /duration - Confirm a new duration
///
/// Malformed bodies are treated like an empty field and ignored.
pub async fn duration_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<DurationRequest>, JsonRejection>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let seconds = match body {
        Ok(Json(request)) => request.seconds(),
        Err(rejection) => {
            debug!("Unreadable duration body: {}", rejection);
            None
        }
    };

    info!("Duration endpoint called with {:?}", seconds);
    respond("set-duration", state.set_duration(seconds))
}

/// Handle POST /start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Start endpoint called");
    respond("start", state.start())
}

/// Handle POST /pause - Pause a running countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Pause endpoint called");
    respond("pause", state.pause())
}

/// Handle POST /reset - Reload the confirmed duration
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    info!("Reset endpoint called");
    respond("reset", state.reset())
}

/// Handle GET /status - Return current timer and server status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = match state.get_timer_state() {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to get timer state: {}", e);
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /events - Stream timer snapshots as server-sent events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    debug!("Events subscriber connected");

    let stream = WatchStream::new(state.subscribe()).map(|timer| {
        match Event::default().event("timer").json_data(&timer) {
            Ok(event) => Ok::<_, Infallible>(event),
            Err(e) => {
                error!("Failed to encode timer event: {}", e);
                Ok(Event::default().event("timer").data(timer.display))
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
