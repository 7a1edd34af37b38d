use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::state::AppState;
use crate::domain::services::join::JoinOrchestrator;
use crate::domain::services::resolver::EventResolver;
use crate::infra::repositories::{
    postgres_event_repo::PostgresEventRepo, postgres_location_repo::PostgresLocationRepo,
    postgres_profile_repo::PostgresProfileRepo, postgres_rating_repo::PostgresRatingRepo,
    postgres_wine_repo::PostgresWineRepo,
    sqlite_event_repo::SqliteEventRepo, sqlite_location_repo::SqliteLocationRepo,
    sqlite_profile_repo::SqliteProfileRepo, sqlite_rating_repo::SqliteRatingRepo,
    sqlite_wine_repo::SqliteWineRepo,
};

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let event_repo = Arc::new(PostgresEventRepo::new(pool.clone()));
        let profile_repo = Arc::new(PostgresProfileRepo::new(pool.clone()));
        let join = Arc::new(JoinOrchestrator::new(event_repo.clone(), profile_repo.clone()));
        let resolver = Arc::new(EventResolver::new(event_repo.clone()));

        AppState {
            config: config.clone(),
            event_repo,
            wine_repo: Arc::new(PostgresWineRepo::new(pool.clone())),
            location_repo: Arc::new(PostgresLocationRepo::new(pool.clone())),
            profile_repo,
            rating_repo: Arc::new(PostgresRatingRepo::new(pool.clone())),
            resolver,
            join,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
        let profile_repo = Arc::new(SqliteProfileRepo::new(pool.clone()));
        let join = Arc::new(JoinOrchestrator::new(event_repo.clone(), profile_repo.clone()));
        let resolver = Arc::new(EventResolver::new(event_repo.clone()));

        AppState {
            config: config.clone(),
            event_repo,
            wine_repo: Arc::new(SqliteWineRepo::new(pool.clone())),
            location_repo: Arc::new(SqliteLocationRepo::new(pool.clone())),
            profile_repo,
            rating_repo: Arc::new(SqliteRatingRepo::new(pool.clone())),
            resolver,
            join,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
