use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A named stop in a wine-crawl event. Events with zero locations behave as
/// a single flat booth of wines.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Location {
    pub id: String,
    pub event_id: String,
    pub name: String,
    pub address: Option<String>,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
}

impl Location {
    pub fn new(event_id: String, name: String, address: Option<String>, display_order: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            name,
            address,
            display_order,
            created_at: Utc::now(),
        }
    }
}
