use serde::{Deserialize, Serialize};
use chrono::{DateTime, Duration, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A self-provisioned guest account, keyed by normalized email. Expiration is
/// advisory metadata for an external cleanup process; nothing here deletes
/// expired rows.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Profile {
    pub id: String,
    pub display_name: String,
    pub email: String,
    pub is_temporary: bool,
    pub is_admin: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// `email` must already be normalized (trimmed, lowercased).
    pub fn new_temporary(email: String, window_days: i64) -> Self {
        let display_name = email
            .split('@')
            .next()
            .unwrap_or("guest")
            .to_string();

        Self {
            id: Uuid::new_v4().to_string(),
            display_name,
            email,
            is_temporary: true,
            is_admin: false,
            expires_at: Some(Utc::now() + Duration::days(window_days)),
            created_at: Utc::now(),
        }
    }
}
