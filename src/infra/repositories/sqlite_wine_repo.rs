use crate::domain::{models::wine::Wine, ports::WineRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteWineRepo {
    pool: SqlitePool,
}

impl SqliteWineRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WineRepository for SqliteWineRepo {
    async fn create(&self, wine: &Wine) -> Result<Wine, AppError> {
        sqlx::query_as::<_, Wine>(
            r#"INSERT INTO wines (
                id, event_id, location_id, name, producer, vintage,
                wine_type, tasting_order, details_json, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING *"#
        )
            .bind(&wine.id)
            .bind(&wine.event_id)
            .bind(&wine.location_id)
            .bind(&wine.name)
            .bind(&wine.producer)
            .bind(wine.vintage)
            .bind(&wine.wine_type)
            .bind(wine.tasting_order)
            .bind(&wine.details_json)
            .bind(wine.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, event_id: &str, id: &str) -> Result<Option<Wine>, AppError> {
        sqlx::query_as::<_, Wine>(
            "SELECT * FROM wines WHERE event_id = ? AND id = ?",
        )
            .bind(event_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Wine>, AppError> {
        sqlx::query_as::<_, Wine>(
            "SELECT * FROM wines WHERE event_id = ? ORDER BY tasting_order, created_at",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, wine: &Wine) -> Result<Wine, AppError> {
        sqlx::query_as::<_, Wine>(
            r#"UPDATE wines SET
                location_id=?, name=?, producer=?, vintage=?,
                wine_type=?, tasting_order=?, details_json=?
               WHERE id=? AND event_id=? RETURNING *"#
        )
            .bind(&wine.location_id)
            .bind(&wine.name)
            .bind(&wine.producer)
            .bind(wine.vintage)
            .bind(&wine.wine_type)
            .bind(wine.tasting_order)
            .bind(&wine.details_json)
            .bind(&wine.id)
            .bind(&wine.event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM wines WHERE id = ? AND event_id = ?")
            .bind(id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Wine not found".into()));
        }
        Ok(())
    }
}
