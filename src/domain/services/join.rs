use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::models::event::{AccessMode, Event};
use crate::domain::models::profile::Profile;
use crate::domain::models::session::GuestSession;
use crate::domain::ports::{EventRepository, ProfileRepository};
use crate::domain::services::identity::{
    normalize_email, IdentityProvisioner, BOOTH_WINDOW_DAYS, STANDARD_WINDOW_DAYS,
};
use crate::domain::services::resolver::{EventResolver, IdentifierKind};
use crate::error::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct JoinRequest {
    pub code: Option<String>,
    pub email: Option<String>,
    pub mode: AccessMode,
    /// Kiosk deep-link entry: resolves the event directly, no code step.
    pub event_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct JoinOutcome {
    pub event: Event,
    pub session: GuestSession,
}

/// Terminal failure reasons. Everything the join flow can hit ends up here;
/// nothing propagates past `join()` as an unhandled fault.
#[derive(Debug, Error)]
pub enum JoinError {
    #[error("Please enter an event code")]
    MissingCode,
    #[error("Please enter your email address")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Event not found. Check the code and try again.")]
    EventNotFound,
    #[error("Could not create a guest profile: {0}")]
    ProfileCreate(String),
    #[error("{0}")]
    Store(String),
}

impl From<JoinError> for AppError {
    fn from(err: JoinError) -> Self {
        match err {
            JoinError::MissingCode | JoinError::MissingEmail | JoinError::InvalidEmail => {
                AppError::Validation(err.to_string())
            }
            JoinError::EventNotFound => AppError::NotFound(err.to_string()),
            JoinError::ProfileCreate(msg) => AppError::Conflict(msg),
            JoinError::Store(msg) => AppError::InternalWithMsg(msg),
        }
    }
}

/// How the event gets looked up once input is validated.
#[derive(Debug, Clone)]
pub enum EventLookup {
    ById(String),
    ByCode(String),
}

/// One join attempt, expressed as an explicit state machine. `step` performs
/// exactly one transition; `join` loops it to a terminal state.
#[derive(Debug)]
pub enum JoinState {
    Validating { input: JoinRequest },
    ResolvingEvent { email: String, mode: AccessMode, lookup: EventLookup },
    /// A standard-path code landed on an email-only event. The flow re-enters
    /// on the booth path with the event already in hand; the store is not
    /// queried a second time.
    RoutingToBooth { email: String, event: Event },
    ProvisioningIdentity { email: String, mode: AccessMode, event: Event },
    BuildingSession { event: Event, identity: Profile, mode: AccessMode },
    Joined(Box<JoinOutcome>),
    Failed(JoinError),
}

pub struct JoinOrchestrator {
    resolver: EventResolver,
    provisioner: IdentityProvisioner,
}

impl JoinOrchestrator {
    pub fn new(events: Arc<dyn EventRepository>, profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            resolver: EventResolver::new(events),
            provisioner: IdentityProvisioner::new(profiles),
        }
    }

    pub async fn join(&self, input: JoinRequest) -> Result<JoinOutcome, JoinError> {
        let mut state = JoinState::Validating { input };
        loop {
            state = self.step(state).await;
            match state {
                JoinState::Joined(outcome) => return Ok(*outcome),
                JoinState::Failed(err) => return Err(err),
                _ => {}
            }
        }
    }

    async fn step(&self, state: JoinState) -> JoinState {
        match state {
            JoinState::Validating { input } => self.validate(input),
            JoinState::ResolvingEvent { email, mode, lookup } => {
                self.resolve_event(email, mode, lookup).await
            }
            JoinState::RoutingToBooth { email, event } => {
                info!("Standard code matched email-only event {}; routing to booth path", event.id);
                JoinState::ProvisioningIdentity { email, mode: AccessMode::EmailOnly, event }
            }
            JoinState::ProvisioningIdentity { email, mode, event } => {
                self.provision_identity(email, mode, event).await
            }
            JoinState::BuildingSession { event, identity, mode } => {
                let session = GuestSession::build(&event, &identity, mode);
                info!("Guest {} joined event {}", identity.id, event.id);
                JoinState::Joined(Box::new(JoinOutcome { event, session }))
            }
            terminal @ (JoinState::Joined(_) | JoinState::Failed(_)) => terminal,
        }
    }

    /// Input-shape checks only, no I/O.
    fn validate(&self, input: JoinRequest) -> JoinState {
        let email = match input.email.as_deref().map(str::trim) {
            None | Some("") => return JoinState::Failed(JoinError::MissingEmail),
            Some(raw) => match normalize_email(raw) {
                Ok(email) => email,
                Err(_) => return JoinState::Failed(JoinError::InvalidEmail),
            },
        };

        let lookup = if let Some(event_id) = input.event_id.filter(|id| !id.trim().is_empty()) {
            EventLookup::ById(event_id)
        } else {
            match input.code.as_deref().map(str::trim) {
                None | Some("") => return JoinState::Failed(JoinError::MissingCode),
                Some(code) => EventLookup::ByCode(code.to_string()),
            }
        };

        JoinState::ResolvingEvent { email, mode: input.mode, lookup }
    }

    async fn resolve_event(&self, email: String, mode: AccessMode, lookup: EventLookup) -> JoinState {
        let (identifier, kind) = match &lookup {
            EventLookup::ById(id) => (id.as_str(), IdentifierKind::EventId),
            EventLookup::ByCode(code) => match mode {
                AccessMode::Standard => (code.as_str(), IdentifierKind::StandardCode),
                AccessMode::EmailOnly => (code.as_str(), IdentifierKind::BoothCode),
            },
        };

        let event = match self.resolver.resolve(identifier, kind).await {
            Ok(event) => event,
            Err(AppError::NotFound(_)) => return JoinState::Failed(JoinError::EventNotFound),
            Err(e) => return JoinState::Failed(JoinError::Store(e.to_string())),
        };

        // Mode mismatch on the standard path is a routing signal, not an error.
        if mode == AccessMode::Standard && event.mode() == AccessMode::EmailOnly {
            return JoinState::RoutingToBooth { email, event };
        }

        JoinState::ProvisioningIdentity { email, mode, event }
    }

    async fn provision_identity(&self, email: String, mode: AccessMode, event: Event) -> JoinState {
        let window_days = match mode {
            AccessMode::Standard => STANDARD_WINDOW_DAYS,
            AccessMode::EmailOnly => BOOTH_WINDOW_DAYS,
        };

        match self.provisioner.provision(&email, window_days).await {
            Ok(identity) => JoinState::BuildingSession { event, identity, mode },
            Err(err) if err.is_unique_violation() => {
                JoinState::Failed(JoinError::ProfileCreate(
                    "A guest profile for this email already exists. Please try again.".into(),
                ))
            }
            Err(AppError::Conflict(msg)) => JoinState::Failed(JoinError::ProfileCreate(msg)),
            Err(AppError::Validation(_)) => JoinState::Failed(JoinError::InvalidEmail),
            Err(err) => JoinState::Failed(JoinError::Store(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_join_error_status_mapping() {
        let cases = [
            (JoinError::MissingCode, StatusCode::BAD_REQUEST),
            (JoinError::MissingEmail, StatusCode::BAD_REQUEST),
            (JoinError::InvalidEmail, StatusCode::BAD_REQUEST),
            (JoinError::EventNotFound, StatusCode::NOT_FOUND),
            (JoinError::ProfileCreate("dup".into()), StatusCode::CONFLICT),
            (JoinError::Store("down".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            let app_err: AppError = err.into();
            assert_eq!(app_err.into_response().status(), expected);
        }
    }
}
