use crate::domain::models::{
    event::{AccessMode, Event}, location::Location, profile::Profile,
    rating::{Descriptor, Rating, RatingRow}, wine::Wine,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    /// Case-insensitive code lookup among joinable (active, not deleted)
    /// events. `mode` narrows the match in the query itself, not after.
    async fn find_by_code(&self, code: &str, mode: Option<AccessMode>) -> Result<Option<Event>, AppError>;
    async fn list(&self, include_deleted: bool) -> Result<Vec<Event>, AppError>;
    async fn update(&self, event: &Event) -> Result<Event, AppError>;
    async fn soft_delete(&self, id: &str, actor: &str) -> Result<Event, AppError>;
    async fn restore(&self, id: &str) -> Result<Event, AppError>;
}

#[async_trait]
pub trait WineRepository: Send + Sync {
    async fn create(&self, wine: &Wine) -> Result<Wine, AppError>;
    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Wine>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Wine>, AppError>;
    async fn update(&self, wine: &Wine) -> Result<Wine, AppError>;
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait LocationRepository: Send + Sync {
    async fn create(&self, location: &Location) -> Result<Location, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Location>, AppError>;
    async fn update(&self, location: &Location) -> Result<Location, AppError>;
    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn create(&self, profile: &Profile) -> Result<Profile, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, AppError>;
    async fn find_temporary_by_email(&self, email: &str) -> Result<Option<Profile>, AppError>;
    async fn update_expiration(&self, id: &str, expires_at: DateTime<Utc>) -> Result<Profile, AppError>;
}

#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn create(&self, rating: &Rating, descriptors: &[Descriptor]) -> Result<Rating, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Rating>, AppError>;
    /// Rows joined with wine name/producer and the rater's profile (LEFT
    /// JOIN, so rows survive a purged profile), descriptors attached.
    async fn list_rows_for_wines(&self, wine_ids: &[String]) -> Result<Vec<RatingRow>, AppError>;
}
