use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::domain::services::analytics::aggregate;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Pulls the event's wines and joined rating rows, then hands them to the
/// pure aggregator. Deleted events stay viewable so organizers can inspect
/// analytics during the recovery window.
pub async fn get_event_analytics(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    let wines = state.wine_repo.list_by_event(&event.id).await?;
    let wine_ids: Vec<String> = wines.iter().map(|w| w.id.clone()).collect();
    let rows = state.rating_repo.list_rows_for_wines(&wine_ids).await?;

    info!("Aggregating {} ratings across {} wines for event {}", rows.len(), wines.len(), event.id);
    Ok(Json(aggregate(&rows, &wines)))
}
