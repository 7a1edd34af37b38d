use crate::domain::{models::location::Location, ports::LocationRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresLocationRepo {
    pool: PgPool,
}

impl PostgresLocationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepo {
    async fn create(&self, location: &Location) -> Result<Location, AppError> {
        sqlx::query_as::<_, Location>(
            r#"INSERT INTO locations (id, event_id, name, address, display_order, created_at)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING *"#
        )
            .bind(&location.id)
            .bind(&location.event_id)
            .bind(&location.name)
            .bind(&location.address)
            .bind(location.display_order)
            .bind(location.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Location>, AppError> {
        sqlx::query_as::<_, Location>(
            "SELECT * FROM locations WHERE event_id = $1 ORDER BY display_order, created_at",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, location: &Location) -> Result<Location, AppError> {
        sqlx::query_as::<_, Location>(
            r#"UPDATE locations SET name=$1, address=$2, display_order=$3
               WHERE id=$4 AND event_id=$5 RETURNING *"#
        )
            .bind(&location.name)
            .bind(&location.address)
            .bind(location.display_order)
            .bind(&location.id)
            .bind(&location.event_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, event_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM locations WHERE id = $1 AND event_id = $2")
            .bind(id)
            .bind(event_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Location not found".into()));
        }
        Ok(())
    }
}
