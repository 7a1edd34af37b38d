use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateEventRequest, DeleteEventParams, ListEventsParams, UpdateEventRequest};
use crate::domain::models::event::{AccessMode, Event, NewEventParams};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_event(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Event name is required".into()));
    }

    let access_mode = AccessMode::parse(&payload.access_mode)
        .ok_or(AppError::Validation("Invalid access_mode".into()))?;

    let booth_config_json = match payload.booth_config {
        Some(config) => serde_json::to_string(&config)
            .map_err(|_| AppError::Validation("Invalid booth config".into()))?,
        None => "{}".to_string(),
    };

    let event = Event::new(NewEventParams {
        name: payload.name,
        event_date: payload.event_date,
        location: payload.location.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        access_mode,
        booth_config_json,
    });

    let created = state.event_repo.create(&event).await?;
    info!("Created event {} with access code {}", created.id, created.access_code);

    Ok(Json(created))
}

pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListEventsParams>,
) -> Result<impl IntoResponse, AppError> {
    let events = state.event_repo.list(params.include_deleted.unwrap_or(false)).await?;
    Ok(Json(events))
}

pub async fn get_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;
    Ok(Json(event))
}

pub async fn update_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<UpdateEventRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if let Some(val) = payload.name { event.name = val; }
    if let Some(val) = payload.event_date { event.event_date = val; }
    if let Some(val) = payload.location { event.location = val; }
    if let Some(val) = payload.description { event.description = val; }
    if let Some(val) = payload.active { event.active = val; }
    if let Some(val) = payload.access_mode {
        let mode = AccessMode::parse(&val)
            .ok_or(AppError::Validation("Invalid access_mode".into()))?;
        event.access_mode = mode.as_str().to_string();
    }
    if let Some(config) = payload.booth_config {
        event.booth_config_json = serde_json::to_string(&config)
            .map_err(|_| AppError::Validation("Invalid booth config".into()))?;
    }

    let updated = state.event_repo.update(&event).await?;
    info!("Updated event: {}", event_id);
    Ok(Json(updated))
}

pub async fn delete_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Query(params): Query<DeleteEventParams>,
) -> Result<impl IntoResponse, AppError> {
    let actor = params.actor.unwrap_or_else(|| "organizer".to_string());
    state.event_repo.soft_delete(&event_id, &actor).await?;
    info!("Soft-deleted event {} by {}", event_id, actor);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}

pub async fn restore_event(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let restored = state.event_repo.restore(&event_id).await?;
    info!("Restored event: {}", event_id);
    Ok(Json(restored))
}
