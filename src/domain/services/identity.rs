use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{info, warn};

use crate::domain::models::profile::Profile;
use crate::domain::ports::ProfileRepository;
use crate::error::AppError;

/// Identity lifetime granted on a standard-code join.
pub const STANDARD_WINDOW_DAYS: i64 = 30;
/// Identity lifetime granted on a booth (email-only) join.
pub const BOOTH_WINDOW_DAYS: i64 = 7;

/// An identity this close to expiry gets its window pushed forward on the
/// next join.
const RENEWAL_THRESHOLD_HOURS: i64 = 24;

/// Finds-or-creates the temporary guest profile for an email address.
/// At most one live temporary profile exists per normalized email; the
/// lookup-before-create plus the store's unique index keep it that way.
pub struct IdentityProvisioner {
    profiles: Arc<dyn ProfileRepository>,
}

impl IdentityProvisioner {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn provision(&self, email: &str, window_days: i64) -> Result<Profile, AppError> {
        let email = normalize_email(email)?;

        if let Some(existing) = self.profiles.find_temporary_by_email(&email).await? {
            if let Some(expires_at) = existing.expires_at
                && expires_at - Utc::now() < Duration::hours(RENEWAL_THRESHOLD_HOURS)
            {
                let new_expiry = Utc::now() + Duration::days(window_days);
                // Renewal is best-effort: a failed update must not fail the join.
                match self.profiles.update_expiration(&existing.id, new_expiry).await {
                    Ok(renewed) => {
                        info!("Renewed guest profile {} until {}", renewed.id, new_expiry);
                        return Ok(renewed);
                    }
                    Err(e) => {
                        warn!("Failed to renew guest profile {}: {}", existing.id, e);
                        return Ok(existing);
                    }
                }
            }
            return Ok(existing);
        }

        let profile = Profile::new_temporary(email, window_days);
        let created = self.profiles.create(&profile).await?;
        info!("Created guest profile {} for {}", created.id, created.email);
        Ok(created)
    }
}

/// Trims, lowercases, and checks the basic `local@domain.tld` shape. Runs
/// before any store call.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(AppError::Validation("Please enter a valid email address".into()));
    }
    Ok(email)
}
