use crate::domain::{models::event::{AccessMode, Event}, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (
                id, name, event_date, location, description, access_code, access_mode,
                active, booth_config_json, deleted, deleted_at, deleted_by, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
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
            "SELECT * FROM events WHERE id = ?",
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
                   WHERE UPPER(access_code) = UPPER(?) AND access_mode = ?
                     AND active = 1 AND deleted = 0"#,
            )
                .bind(code)
                .bind(mode.as_str()),
            None => sqlx::query_as::<_, Event>(
                r#"SELECT * FROM events
                   WHERE UPPER(access_code) = UPPER(?)
                     AND active = 1 AND deleted = 0"#,
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
            "SELECT * FROM events WHERE deleted = 0 ORDER BY event_date DESC"
        };

        sqlx::query_as::<_, Event>(sql)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"UPDATE events SET
                name=?, event_date=?, location=?, description=?,
                access_mode=?, active=?, booth_config_json=?
               WHERE id=? RETURNING *"#
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
            "UPDATE events SET deleted = 1, deleted_at = ?, deleted_by = ? WHERE id = ? RETURNING *",
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
            "UPDATE events SET deleted = 0, deleted_at = NULL, deleted_by = NULL WHERE id = ? RETURNING *",
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or(AppError::NotFound("Event not found".into()))
    }
}
