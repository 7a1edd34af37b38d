use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{CreateWineRequest, UpdateWineRequest};
use crate::domain::models::wine::{NewWineParams, Wine};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_wine(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateWineRequest>,
) -> Result<impl IntoResponse, AppError> {
    let event = state.event_repo.find_by_id(&event_id).await?
        .ok_or(AppError::NotFound("Event not found".into()))?;

    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Wine name is required".into()));
    }

    let tasting_order = match payload.tasting_order {
        Some(order) => order,
        None => state.wine_repo.list_by_event(&event.id).await?.len() as i32 + 1,
    };

    let details_json = match payload.details {
        Some(details) => serde_json::to_string(&details)
            .map_err(|_| AppError::Validation("Invalid wine details".into()))?,
        None => "{}".to_string(),
    };

    let wine = Wine::new(NewWineParams {
        event_id: event.id,
        location_id: payload.location_id,
        name: payload.name,
        producer: payload.producer.unwrap_or_default(),
        vintage: payload.vintage,
        wine_type: payload.wine_type.unwrap_or_default(),
        tasting_order,
        details_json,
    });

    let created = state.wine_repo.create(&wine).await?;
    info!("Added wine {} to event {}", created.id, event_id);
    Ok(Json(created))
}

pub async fn list_wines(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let wines = state.wine_repo.list_by_event(&event_id).await?;
    Ok(Json(wines))
}

pub async fn get_wine(
    State(state): State<Arc<AppState>>,
    Path((event_id, wine_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let wine = state.wine_repo.find_by_id(&event_id, &wine_id).await?
        .ok_or(AppError::NotFound("Wine not found".into()))?;
    Ok(Json(wine))
}

pub async fn update_wine(
    State(state): State<Arc<AppState>>,
    Path((event_id, wine_id)): Path<(String, String)>,
    Json(payload): Json<UpdateWineRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut wine = state.wine_repo.find_by_id(&event_id, &wine_id).await?
        .ok_or(AppError::NotFound("Wine not found".into()))?;

    if let Some(val) = payload.name { wine.name = val; }
    if let Some(val) = payload.producer { wine.producer = val; }
    if let Some(val) = payload.vintage { wine.vintage = Some(val); }
    if let Some(val) = payload.wine_type { wine.wine_type = val; }
    if let Some(val) = payload.location_id { wine.location_id = Some(val); }
    if let Some(val) = payload.tasting_order { wine.tasting_order = val; }
    if let Some(details) = payload.details {
        wine.details_json = serde_json::to_string(&details)
            .map_err(|_| AppError::Validation("Invalid wine details".into()))?;
    }

    let updated = state.wine_repo.update(&wine).await?;
    info!("Updated wine: {}", wine_id);
    Ok(Json(updated))
}

pub async fn delete_wine(
    State(state): State<Arc<AppState>>,
    Path((event_id, wine_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.wine_repo.delete(&event_id, &wine_id).await?;
    info!("Deleted wine: {}", wine_id);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
