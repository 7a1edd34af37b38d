use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Wine {
    pub id: String,
    pub event_id: String,
    pub location_id: Option<String>,
    pub name: String,
    pub producer: String,
    pub vintage: Option<i32>,
    pub wine_type: String,
    pub tasting_order: i32,
    /// Full tasting-sheet payload (notes, grape, region). Opaque to the core.
    pub details_json: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewWineParams {
    pub event_id: String,
    pub location_id: Option<String>,
    pub name: String,
    pub producer: String,
    pub vintage: Option<i32>,
    pub wine_type: String,
    pub tasting_order: i32,
    pub details_json: String,
}

impl Wine {
    pub fn new(params: NewWineParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id: params.event_id,
            location_id: params.location_id,
            name: params.name,
            producer: params.producer,
            vintage: params.vintage,
            wine_type: params.wine_type,
            tasting_order: params.tasting_order,
            details_json: params.details_json,
            created_at: Utc::now(),
        }
    }
}
