use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const MIN_STARS: i32 = 1;
pub const MAX_STARS: i32 = 5;

/// Stars at or above this mark the rating as "would buy".
pub const WOULD_BUY_THRESHOLD: i32 = 4;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Rating {
    pub id: String,
    pub event_id: String,
    pub wine_id: String,
    pub profile_id: String,
    pub stars: i32,
    pub note: Option<String>,
    pub would_buy: bool,
    pub created_at: DateTime<Utc>,
}

impl Rating {
    pub fn new(event_id: String, wine_id: String, profile_id: String, stars: i32, note: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            wine_id,
            profile_id,
            stars,
            note,
            would_buy: stars >= WOULD_BUY_THRESHOLD,
            created_at: Utc::now(),
        }
    }
}

/// A sensory tag attached to one rating.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Descriptor {
    pub id: String,
    pub rating_id: String,
    pub name: String,
    pub intensity: i32,
}

impl Descriptor {
    pub fn new(rating_id: String, name: String, intensity: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            rating_id,
            name,
            intensity,
        }
    }
}

/// One rating joined with its wine and (where the profile row still exists)
/// its owner, as fed to the analytics rollups. Descriptor names are attached
/// by the repository from a second query.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct RatingRow {
    pub id: String,
    pub wine_id: String,
    pub profile_id: String,
    pub stars: i32,
    pub note: Option<String>,
    pub would_buy: bool,
    pub created_at: DateTime<Utc>,
    pub wine_name: String,
    pub wine_producer: String,
    pub rater_name: Option<String>,
    pub rater_email: Option<String>,
    #[sqlx(skip)]
    #[serde(default)]
    pub descriptors: Vec<String>,
}
