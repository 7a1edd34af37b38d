use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateEventRequest {
    pub name: String,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub access_mode: String,
    pub booth_config: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct UpdateEventRequest {
    pub name: Option<String>,
    pub event_date: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub access_mode: Option<String>,
    pub active: Option<bool>,
    pub booth_config: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct ListEventsParams {
    pub include_deleted: Option<bool>,
}

#[derive(Deserialize)]
pub struct DeleteEventParams {
    pub actor: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateWineRequest {
    pub name: String,
    pub producer: Option<String>,
    pub vintage: Option<i32>,
    pub wine_type: Option<String>,
    pub location_id: Option<String>,
    pub tasting_order: Option<i32>,
    pub details: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct UpdateWineRequest {
    pub name: Option<String>,
    pub producer: Option<String>,
    pub vintage: Option<i32>,
    pub wine_type: Option<String>,
    pub location_id: Option<String>,
    pub tasting_order: Option<i32>,
    pub details: Option<serde_json::Value>,
}

#[derive(Deserialize)]
pub struct CreateLocationRequest {
    pub name: String,
    pub address: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub display_order: Option<i32>,
}

#[derive(Deserialize)]
pub struct DescriptorInput {
    pub name: String,
    pub intensity: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateRatingRequest {
    pub wine_id: String,
    pub profile_id: String,
    pub stars: i32,
    pub note: Option<String>,
    pub descriptors: Option<Vec<DescriptorInput>>,
}
