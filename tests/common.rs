use tasting_backend::{
    api::router::create_router,
    state::AppState,
    config::Config,
    domain::services::join::JoinOrchestrator,
    domain::services::resolver::EventResolver,
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo,
        sqlite_location_repo::SqliteLocationRepo,
        sqlite_profile_repo::SqliteProfileRepo,
        sqlite_rating_repo::SqliteRatingRepo,
        sqlite_wine_repo::SqliteWineRepo,
    },
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;
use axum::Router;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
        };

        let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
        let profile_repo = Arc::new(SqliteProfileRepo::new(pool.clone()));

        let state = Arc::new(AppState {
            config,
            event_repo: event_repo.clone(),
            wine_repo: Arc::new(SqliteWineRepo::new(pool.clone())),
            location_repo: Arc::new(SqliteLocationRepo::new(pool.clone())),
            profile_repo: profile_repo.clone(),
            rating_repo: Arc::new(SqliteRatingRepo::new(pool.clone())),
            resolver: Arc::new(EventResolver::new(event_repo.clone())),
            join: Arc::new(JoinOrchestrator::new(event_repo, profile_repo)),
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
