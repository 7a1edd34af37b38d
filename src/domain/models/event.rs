use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use rand::{distributions::Alphanumeric, Rng};

pub const ACCESS_CODE_LEN: usize = 6;

/// How participants get into an event.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccessMode {
    /// Participant enters the 6-character event code plus their email.
    Standard,
    /// Walk-up booth/kiosk: email only, the code lives in the kiosk URL.
    EmailOnly,
}

impl AccessMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessMode::Standard => "standard",
            AccessMode::EmailOnly => "email_only",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "standard" => Some(AccessMode::Standard),
            "email_only" => Some(AccessMode::EmailOnly),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub name: String,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub access_code: String,
    pub access_mode: String,
    pub active: bool,
    /// Booth screen customization (icon, title, colors). Opaque payload,
    /// rendered by the client as-is.
    pub booth_config_json: String,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub name: String,
    pub event_date: DateTime<Utc>,
    pub location: String,
    pub description: String,
    pub access_mode: AccessMode,
    pub booth_config_json: String,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            event_date: params.event_date,
            location: params.location,
            description: params.description,
            access_code: generate_access_code(),
            access_mode: params.access_mode.as_str().to_string(),
            active: true,
            booth_config_json: params.booth_config_json,
            deleted: false,
            deleted_at: None,
            deleted_by: None,
            created_at: Utc::now(),
        }
    }

    pub fn mode(&self) -> AccessMode {
        AccessMode::parse(&self.access_mode).unwrap_or(AccessMode::Standard)
    }

    /// Joinable: participants can resolve it by code or id.
    pub fn is_joinable(&self) -> bool {
        self.active && !self.deleted
    }
}

pub fn generate_access_code() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ACCESS_CODE_LEN)
        .map(char::from)
        .collect::<String>()
        .to_uppercase()
}
