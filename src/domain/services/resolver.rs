use std::sync::Arc;

use crate::domain::models::event::{AccessMode, Event};
use crate::domain::ports::EventRepository;
use crate::error::AppError;

/// Which kind of identifier a join attempt carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierKind {
    /// Direct primary-key lookup (kiosk deep links), any mode.
    EventId,
    /// Participant-entered event code. May land on an email-only event;
    /// that is a routing signal for the caller, not a miss.
    StandardCode,
    /// Booth detection: only email-only events match, enforced in the query.
    BoothCode,
}

pub struct EventResolver {
    events: Arc<dyn EventRepository>,
}

impl EventResolver {
    pub fn new(events: Arc<dyn EventRepository>) -> Self {
        Self { events }
    }

    /// Every miss is a recoverable NotFound ("event not found"), never fatal.
    pub async fn resolve(&self, identifier: &str, kind: IdentifierKind) -> Result<Event, AppError> {
        let event = match kind {
            IdentifierKind::EventId => {
                self.events
                    .find_by_id(identifier)
                    .await?
                    .filter(|e| e.is_joinable())
            }
            IdentifierKind::StandardCode => {
                self.events.find_by_code(identifier.trim(), None).await?
            }
            IdentifierKind::BoothCode => {
                self.events
                    .find_by_code(identifier.trim(), Some(AccessMode::EmailOnly))
                    .await?
            }
        };

        event.ok_or(AppError::NotFound("Event not found".into()))
    }
}
