use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateLocationRequest, UpdateLocationRequest};
use crate::domain::models::location::Location;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_location(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateLocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Location name is required".into()));
    }

    let display_order = match payload.display_order {
        Some(order) => order,
        None => state.location_repo.list_by_event(&event.id).await?.len() as i32 + 1,
    };

    let location = Location::new(event.id, payload.name, payload.address, display_order);
    let created = state.location_repo.create(&location).await?;
    info!("Added location {} to event {}", created.id, event_id);
    Ok(Json(created))
}

pub async fn list_locations(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let locations = state.location_repo.list_by_event(&event_id).await?;
    Ok(Json(locations))
}

pub async fn update_location(
    State(state): State<Arc<AppState>>,
    Path((event_id, location_id)): Path<(String, String)>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut location = state.location_repo.list_by_event(&event_id).await?
        .into_iter()
        .find(|l| l.id == location_id)
        .ok_or(AppError::NotFound("Location not found".into()))?;

    if let Some(val) = payload.name { location.name = val; }
    if let Some(val) = payload.address { location.address = Some(val); }
    if let Some(val) = payload.display_order { location.display_order = val; }

    let updated = state.location_repo.update(&location).await?;
    info!("Updated location: {}", location_id);
    Ok(Json(updated))
}

pub async fn delete_location(
    State(state): State<Arc<AppState>>,
    Path((event_id, location_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.location_repo.delete(&event_id, &location_id).await?;
    info!("Deleted location: {}", location_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
