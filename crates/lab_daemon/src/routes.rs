use crate::control;
use crate::state::{AppState, BusyGuard};
use axum::{
    extract::{Path, Query, State},
    http::{HeaderValue, Method, StatusCode},
    response::{
        sse::{Event, Sse},
        Json,
    },
    routing::{get, patch, post},
    Router,
};
use lab_core::readouts::{readouts, Readouts};
use lab_core::{Sample, SimulationState, WorksheetAnswers, WorksheetField};
use serde::Deserialize;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

type JsonReply = (StatusCode, Json<serde_json::Value>);

#[cfg(test)]
pub fn make_router(state: AppState) -> Router {
    make_router_with_cors(state, HeaderValue::from_static("http://localhost:5173"))
}

pub fn make_router_with_cors(state: AppState, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH])
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/meta", get(meta_handler))
        .route("/api/v1/state", get(state_handler))
        .route("/api/v1/series", get(series_handler))
        .route("/api/v1/readouts", get(readouts_handler))
        .route("/api/v1/stream", get(stream_handler))
        .route("/api/v1/toggle", post(toggle_handler))
        .route("/api/v1/start", post(start_handler))
        .route("/api/v1/pause", post(pause_handler))
        .route("/api/v1/reset", post(reset_handler))
        .route(
            "/api/v1/worksheet",
            get(worksheet_handler).put(replace_worksheet_handler),
        )
        .route("/api/v1/worksheet/check", post(check_handler))
        .route("/api/v1/worksheet/:field", patch(answer_handler))
        .route("/api/v1/tutor", post(tutor_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn error_reply(status: StatusCode, message: &str) -> JsonReply {
    (status, Json(serde_json::json!({ "error": message })))
}

// ---------------------------------------------------------------------------
// Simulation
// ---------------------------------------------------------------------------

pub async fn meta_handler(State(app_state): State<AppState>) -> Json<serde_json::Value> {
    let session = app_state.lab.lock();
    let config = session.engine.config();
    Json(serde_json::json!({
        "config": config,
        "phase": session.engine.phase(),
        "playback_speed": config.playback_speed(),
        "assistant_model": app_state.assistant.model(),
    }))
}

pub async fn state_handler(State(app_state): State<AppState>) -> Json<SimulationState> {
    Json(app_state.lab.lock().engine.state())
}

#[derive(Deserialize)]
pub struct SeriesQuery {
    since: Option<u32>,
}

pub async fn series_handler(
    State(app_state): State<AppState>,
    Query(query): Query<SeriesQuery>,
) -> Json<Vec<Sample>> {
    let session = app_state.lab.lock();
    let series = session.engine.series();
    let samples = match query.since {
        Some(since) => series.since(since).to_vec(),
        None => series.samples().to_vec(),
    };
    Json(samples)
}

pub async fn readouts_handler(State(app_state): State<AppState>) -> Json<Readouts> {
    let session = app_state.lab.lock();
    let engine = &session.engine;
    Json(readouts(&engine.state(), engine.config(), engine.series()))
}

pub async fn toggle_handler(State(app_state): State<AppState>) -> Json<SimulationState> {
    Json(control::toggle(&app_state))
}

pub async fn start_handler(State(app_state): State<AppState>) -> Json<SimulationState> {
    Json(control::start(&app_state))
}

pub async fn pause_handler(State(app_state): State<AppState>) -> Json<SimulationState> {
    Json(control::pause(&app_state))
}

pub async fn reset_handler(State(app_state): State<AppState>) -> Json<SimulationState> {
    Json(control::reset(&app_state))
}

pub async fn stream_handler(
    State(app_state): State<AppState>,
) -> Sse<impl futures_core::Stream<Item = Result<Event, Infallible>>> {
    let mut rx = app_state.event_tx.subscribe();
    let lab = app_state.lab.clone();

    let stream = async_stream::stream! {
        let mut heartbeat = tokio::time::interval(Duration::from_secs(1));
        heartbeat.tick().await; // discard the immediate first tick
        loop {
            tokio::select! {
                result = rx.recv() => {
                    match result {
                        Ok(event) => {
                            let data = serde_json::to_string(&event).unwrap_or_default();
                            yield Ok(Event::default().data(data));
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            tracing::warn!(skipped, "stream subscriber lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    }
                }
                _ = heartbeat.tick() => {
                    let state = lab.lock().engine.state();
                    let hb = serde_json::json!({"heartbeat": true, "state": state});
                    yield Ok(Event::default().data(hb.to_string()));
                }
            }
        }
    };

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(30))
            .text("ping"),
    )
}

// ---------------------------------------------------------------------------
// Worksheet
// ---------------------------------------------------------------------------

pub async fn worksheet_handler(State(app_state): State<AppState>) -> Json<WorksheetAnswers> {
    Json(app_state.lab.lock().answers.clone())
}

pub async fn replace_worksheet_handler(
    State(app_state): State<AppState>,
    Json(answers): Json<WorksheetAnswers>,
) -> Json<WorksheetAnswers> {
    app_state.lab.lock().answers = answers.clone();
    Json(answers)
}

#[derive(Deserialize)]
pub struct AnswerUpdate {
    value: String,
}

pub async fn answer_handler(
    State(app_state): State<AppState>,
    Path(field_id): Path<String>,
    Json(update): Json<AnswerUpdate>,
) -> JsonReply {
    let Some(field) = WorksheetField::from_id(&field_id) else {
        return error_reply(
            StatusCode::NOT_FOUND,
            &format!("unknown worksheet field '{field_id}'"),
        );
    };
    app_state.lab.lock().answers.set(field, update.value.clone());
    (
        StatusCode::OK,
        Json(serde_json::json!({ "field": field, "value": update.value })),
    )
}

// ---------------------------------------------------------------------------
// Assistant
// ---------------------------------------------------------------------------

pub async fn check_handler(State(app_state): State<AppState>) -> JsonReply {
    let Some(_busy) = BusyGuard::try_acquire(&app_state.grading_busy) else {
        return error_reply(StatusCode::CONFLICT, "answers are already being checked");
    };
    let answers = app_state.lab.lock().answers.clone();
    let feedback = app_state.assistant.check_answers(&answers).await;
    (
        StatusCode::OK,
        Json(serde_json::json!({ "feedback": feedback })),
    )
}

#[derive(Deserialize)]
pub struct TutorRequest {
    question: String,
}

pub async fn tutor_handler(
    State(app_state): State<AppState>,
    Json(request): Json<TutorRequest>,
) -> JsonReply {
    if request.question.trim().is_empty() {
        return error_reply(StatusCode::BAD_REQUEST, "question must not be empty");
    }
    let Some(_busy) = BusyGuard::try_acquire(&app_state.tutor_busy) else {
        return error_reply(StatusCode::CONFLICT, "the tutor is still answering");
    };
    let state = app_state.lab.lock().engine.state();
    let answer = app_state.assistant.ask_tutor(&request.question, &state).await;
    (StatusCode::OK, Json(serde_json::json!({ "answer": answer })))
}
