use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateRatingRequest;
use crate::domain::models::rating::{Descriptor, Rating, MAX_STARS, MIN_STARS};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_rating(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateRatingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !(MIN_STARS..=MAX_STARS).contains(&payload.stars) {
        return Err(AppError::Validation(format!(
            "Rating must be between {} and {} stars", MIN_STARS, MAX_STARS
        )));
    }

    let wine = state.wine_repo.find_by_id(&event_id, &payload.wine_id).await?
        .ok_or(AppError::NotFound("Wine not found".into()))?;

    let profile = state.profile_repo.find_by_id(&payload.profile_id).await?
        .ok_or(AppError::NotFound("Guest profile not found".into()))?;

    let note = payload.note.filter(|n| !n.trim().is_empty());
    let rating = Rating::new(event_id, wine.id, profile.id, payload.stars, note);

    let descriptors: Vec<Descriptor> = payload
        .descriptors
        .unwrap_or_default()
        .into_iter()
        .filter(|d| !d.name.trim().is_empty())
        .map(|d| Descriptor::new(rating.id.clone(), d.name, d.intensity.unwrap_or(0)))
        .collect();

    let created = state.rating_repo.create(&rating, &descriptors).await?;
    info!("Recorded {}-star rating {} for wine {}", created.stars, created.id, created.wine_id);
    Ok(Json(created))
}

pub async fn list_ratings(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let ratings = state.rating_repo.list_by_event(&event_id).await?;
    Ok(Json(ratings))
}
