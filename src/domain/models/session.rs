use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

use crate::domain::models::event::{AccessMode, Event};
use crate::domain::models::profile::Profile;

/// The client-held record of "which guest joined which event". Built fresh on
/// every successful join and handed back in the join response; the server
/// never stores it. A client re-entering with a saved session must run the
/// join flow again rather than trust this blob's freshness.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GuestSession {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub is_temp: bool,
    pub access_type: AccessMode,
    pub event_id: String,
    /// Mirrors the identity's expiration at build time.
    pub expires_at: Option<DateTime<Utc>>,
}

impl GuestSession {
    pub fn build(event: &Event, identity: &Profile, mode: AccessMode) -> Self {
        Self {
            user_id: identity.id.clone(),
            display_name: identity.display_name.clone(),
            email: identity.email.clone(),
            is_temp: true,
            access_type: mode,
            event_id: event.id.clone(),
            expires_at: identity.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::NewEventParams;

    #[test]
    fn test_session_mirrors_identity_and_event() {
        let event = Event::new(NewEventParams {
            name: "Spring Tasting".into(),
            event_date: Utc::now(),
            location: "Cellar".into(),
            description: String::new(),
            access_mode: AccessMode::Standard,
            booth_config_json: "{}".into(),
        });
        let identity = Profile::new_temporary("jake@example.com".to_string(), 30);

        let session = GuestSession::build(&event, &identity, AccessMode::Standard);
        assert_eq!(session.user_id, identity.id);
        assert_eq!(session.email, "jake@example.com");
        assert_eq!(session.event_id, event.id);
        assert_eq!(session.expires_at, identity.expires_at);
        assert!(session.is_temp);
    }

    #[test]
    fn test_session_serializes_camel_case() {
        let event = Event::new(NewEventParams {
            name: "E".into(),
            event_date: Utc::now(),
            location: String::new(),
            description: String::new(),
            access_mode: AccessMode::EmailOnly,
            booth_config_json: "{}".into(),
        });
        let identity = Profile::new_temporary("a@b.com".to_string(), 7);
        let session = GuestSession::build(&event, &identity, AccessMode::EmailOnly);

        let json = serde_json::to_value(&session).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("displayName").is_some());
        assert!(json.get("isTemp").is_some());
        assert_eq!(json["accessType"], "email_only");
        assert!(json.get("expiresAt").is_some());
    }
}
