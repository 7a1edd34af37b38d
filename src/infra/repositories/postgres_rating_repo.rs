use std::collections::HashMap;

use crate::domain::{models::rating::{Descriptor, Rating, RatingRow}, ports::RatingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresRatingRepo {
    pool: PgPool,
}

impl PostgresRatingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingRepository for PostgresRatingRepo {
    async fn create(&self, rating: &Rating, descriptors: &[Descriptor]) -> Result<Rating, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Rating>(
            r#"INSERT INTO ratings (
                id, event_id, wine_id, profile_id, stars, note, would_buy, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *"#
        )
            .bind(&rating.id)
            .bind(&rating.event_id)
            .bind(&rating.wine_id)
            .bind(&rating.profile_id)
            .bind(rating.stars)
            .bind(&rating.note)
            .bind(rating.would_buy)
            .bind(rating.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        for descriptor in descriptors {
            sqlx::query(
                "INSERT INTO rating_descriptors (id, rating_id, name, intensity) VALUES ($1, $2, $3, $4)",
            )
                .bind(&descriptor.id)
                .bind(&descriptor.rating_id)
                .bind(&descriptor.name)
                .bind(descriptor.intensity)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Rating>, AppError> {
        sqlx::query_as::<_, Rating>(
            "SELECT * FROM ratings WHERE event_id = $1 ORDER BY created_at",
        )
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_rows_for_wines(&self, wine_ids: &[String]) -> Result<Vec<RatingRow>, AppError> {
        if wine_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = sqlx::query_as::<_, RatingRow>(
            r#"SELECT
                r.id, r.wine_id, r.profile_id, r.stars, r.note, r.would_buy, r.created_at,
                w.name AS wine_name, w.producer AS wine_producer,
                p.display_name AS rater_name, p.email AS rater_email
               FROM ratings r
               JOIN wines w ON w.id = r.wine_id
               LEFT JOIN profiles p ON p.id = r.profile_id
               WHERE r.wine_id = ANY($1)
               ORDER BY r.created_at"#,
        )
            .bind(wine_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if rows.is_empty() {
            return Ok(rows);
        }

        let rating_ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let descriptor_rows = sqlx::query_as::<_, (String, String)>(
            "SELECT rating_id, name FROM rating_descriptors WHERE rating_id = ANY($1)",
        )
            .bind(&rating_ids)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let mut by_rating: HashMap<String, Vec<String>> = HashMap::new();
        for (rating_id, name) in descriptor_rows {
            by_rating.entry(rating_id).or_default().push(name);
        }
        for row in &mut rows {
            if let Some(names) = by_rating.remove(&row.id) {
                row.descriptors = names;
            }
        }

        Ok(rows)
    }
}
