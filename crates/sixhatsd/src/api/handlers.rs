use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use sixhats_core::{start_analysis, SessionId, SessionStatus, METRICS};

use super::error::ApiError;
use super::schema::{
    AnalyzeResponse, CreateSessionRequest, DebugResponse, HealthResponse, ProgressResponse,
    ResultsResponse, SessionStatusResponse,
};
use super::AppState;

type ApiResult<T> = Result<Json<T>, ApiError>;

/// POST /api/sessions
pub(super) async fn create_session(
    State(state): State<AppState>,
    body: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> ApiResult<SessionStatusResponse> {
    let Json(req) = body.map_err(|e| ApiError::Unprocessable(e.body_text()))?;
    req.validate().map_err(ApiError::Unprocessable)?;

    let id = state
        .store
        .create(req.problem_statement, req.background_context)?;
    let ctx = state.store.get(&id).ok_or_else(ApiError::session_not_found)?;
    tracing::info!(session_id = %id, "session created");
    Ok(Json(SessionStatusResponse::from(&ctx)))
}

/// POST /api/sessions/{id}/analyze
pub(super) async fn analyze(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<AnalyzeResponse> {
    let id = SessionId(session_id);
    // The task runs detached; its handle is not needed.
    start_analysis(state.orchestrator.clone(), state.store.clone(), &id)?;

    Ok(Json(AnalyzeResponse {
        session_id: id.to_string(),
        status: "initiated",
        message: "Analysis started. Poll the progress endpoint for updates.".to_string(),
    }))
}

/// GET /api/sessions/{id}/progress
pub(super) async fn progress(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<ProgressResponse> {
    let ctx = state.lookup(session_id)?;
    Ok(Json(ProgressResponse::from(&ctx)))
}

/// GET /api/sessions/{id}/results
pub(super) async fn results(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<ResultsResponse> {
    let ctx = state.lookup(session_id)?;
    if ctx.status() != SessionStatus::Completed {
        return Err(ApiError::BadRequest(format!(
            "Analysis not completed. Current status: {}",
            ctx.status()
        )));
    }
    Ok(Json(ResultsResponse::from(&ctx)))
}

/// GET /api/sessions/{id}/debug
pub(super) async fn debug_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<DebugResponse> {
    let ctx = state.lookup(session_id)?;
    Ok(Json(DebugResponse::from(&ctx)))
}

/// DELETE /api/sessions/{id}
pub(super) async fn delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete(&SessionId(session_id)) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::session_not_found())
    }
}

/// GET /api/health
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let config = state.orchestrator.config();
    Json(HealthResponse {
        status: "healthy",
        version: sixhats_core::VERSION,
        sessions: state.store.len(),
        backend: state.orchestrator.backend_name(),
        include_solution: config.include_solution,
        max_concurrent_agents: config.max_concurrent_agents,
        metrics: METRICS.snapshot(),
    })
}
