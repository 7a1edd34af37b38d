use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::domain::services::join::JoinRequest;
use crate::domain::services::resolver::IdentifierKind;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Runs a join attempt end-to-end. The response carries the resolved event
/// and the freshly built guest session; the client persists the session blob
/// itself.
pub async fn join_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<JoinRequest>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state.join.join(payload).await?;
    Ok(Json(outcome))
}

/// Booth-mode detection: resolves a code against email-only events only.
/// Standard events with the same code are not a match here.
pub async fn detect_booth(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.resolver.resolve(&code, IdentifierKind::BoothCode).await?;
    info!("Booth detection matched event {}", event.id);
    Ok(Json(event))
}
