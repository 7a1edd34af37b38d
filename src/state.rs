use std::sync::Arc;
use crate::domain::ports::{
    EventRepository, LocationRepository, ProfileRepository, RatingRepository, WineRepository,
};
use crate::domain::services::join::JoinOrchestrator;
use crate::domain::services::resolver::EventResolver;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub event_repo: Arc<dyn EventRepository>,
    pub wine_repo: Arc<dyn WineRepository>,
    pub location_repo: Arc<dyn LocationRepository>,
    pub profile_repo: Arc<dyn ProfileRepository>,
    pub rating_repo: Arc<dyn RatingRepository>,
    pub resolver: Arc<EventResolver>,
    pub join: Arc<JoinOrchestrator>,
}
