use crate::domain::{models::event::{AccessMode, Event}, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PostgresEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                id, name, event_date, location, description, access_code, access_mode,
                active, booth_config_json, deleted, deleted_at, deleted_by, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *"#
        )
            .bind(&event.id)
            .bind(&event.name)
            .bind(event.event_date)
            .bind(&event.location)
            .bind(&event.description)
            .bind(&event.access_code)
            .bind(&event.access_mode)
            .bind(event.active)
            .bind(&event.booth_config_json)
            .bind(event.deleted)
            .bind(event.deleted_at)
            .bind(&event.deleted_by)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE id = $1",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_code(&self, code: &str, mode: Option<AccessMode>) -> Result<Option<Event>, AppError> {
        let query = match mode {
            Some(mode) => sqlx::query_as::<_, Event>(
                r#"SELECT * FROM events
                   WHERE UPPER(access_code) = UPPER($1) AND access_mode = $2
                     AND active AND NOT deleted"#,
            )
                .bind(code)
                .bind(mode.as_str()),
            None => sqlx::query_as::<_, Event>(
                r#"SELECT * FROM events
                   WHERE UPPER(access_code) = UPPER($1)
                     AND active AND NOT deleted"#,
            )
                .bind(code),
        };

        query
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, include_deleted: bool) -> Result<Vec<Event>, AppError> {
        let sql = if include_deleted {
            "SELECT * FROM events ORDER BY event_date DESC"
        } else {
            "SELECT * FROM events WHERE NOT deleted ORDER BY event_date DESC"
        };

        sqlx::query_as::<_, Event>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"UPDATE events SET
                name=$1, event_date=$2, location=$3, description=$4,
                access_mode=$5, active=$6, booth_config_json=$7
               WHERE id=$8 RETURNING *"#
        )
            .bind(&event.name)
            .bind(event.event_date)
            .bind(&event.location)
            .bind(&event.description)
            .bind(&event.access_mode)
            .bind(event.active)
            .bind(&event.booth_config_json)
            .bind(&event.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn soft_delete(&self, id: &str, actor: &str) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET deleted = TRUE, deleted_at = $1, deleted_by = $2 WHERE id = $3 RETURNING *",
        )
            .bind(Utc::now())
            .bind(actor)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Event not found".into()))
    }

    async fn restore(&self, id: &str) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            "UPDATE events SET deleted = FALSE, deleted_at = NULL, deleted_by = NULL WHERE id = $1 RETURNING *",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Event not found".into()))
    }
}
