use crate::domain::{models::wine::Wine, ports::WineRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresWineRepo {
    pool: PgPool,
}

impl PostgresWineRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WineRepository for PostgresWineRepo {
    async fn create(&self, wine: &Wine) -> Result<Wine, AppError> {
        sqlx::query_as::<_, Wine>(
            r#"INSERT INTO wines (
                id, event_id, location_id, name, producer, vintage,
                wine_type, tasting_order, details_json, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
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
            "SELECT * FROM wines WHERE event_id = $1 AND id = $2",
        )
            .bind(event_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Wine>, AppError> {
        sqlx::query_as::<_, Wine>(
            "SELECT * FROM wines WHERE event_id = $1 ORDER BY tasting_order, created_at",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, wine: &Wine) -> Result<Wine, AppError> {
        sqlx::query_as::<_, Wine>(
            r#"UPDATE wines SET
                location_id=$1, name=$2, producer=$3, vintage=$4,
                wine_type=$5, tasting_order=$6, details_json=$7
               WHERE id=$8 AND event_id=$9 RETURNING *"#
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
        let result = sqlx::query("DELETE FROM wines WHERE id = $1 AND event_id = $2")
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
