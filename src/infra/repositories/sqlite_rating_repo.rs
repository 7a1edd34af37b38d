use std::collections::HashMap;

use crate::domain::{models::rating::{Descriptor, Rating, RatingRow}, ports::RatingRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteRatingRepo {
    pool: SqlitePool,
}

impl SqliteRatingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[async_trait]
impl RatingRepository for SqliteRatingRepo {
    async fn create(&self, rating: &Rating, descriptors: &[Descriptor]) -> Result<Rating, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let created = sqlx::query_as::<_, Rating>(
            r#"INSERT INTO ratings (
                id, event_id, wine_id, profile_id, stars, note, would_buy, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
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
                "INSERT INTO rating_descriptors (id, rating_id, name, intensity) VALUES (?, ?, ?, ?)",
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
            "SELECT * FROM ratings WHERE event_id = ? ORDER BY created_at",
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

        let sql = format!(
            r#"SELECT
                r.id, r.wine_id, r.profile_id, r.stars, r.note, r.would_buy, r.created_at,
                w.name AS wine_name, w.producer AS wine_producer,
                p.display_name AS rater_name, p.email AS rater_email
               FROM ratings r
               JOIN wines w ON w.id = r.wine_id
               LEFT JOIN profiles p ON p.id = r.profile_id
               WHERE r.wine_id IN ({})
               ORDER BY r.created_at"#,
            placeholders(wine_ids.len())
        );

        let mut query = sqlx::query_as::<_, RatingRow>(&sql);
        for id in wine_ids {
            query = query.bind(id);
        }
        let mut rows = query.fetch_all(&self.pool).await.map_err(AppError::Database)?;

        if rows.is_empty() {
            return Ok(rows);
        }

        let rating_ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        let descriptor_sql = format!(
            "SELECT rating_id, name FROM rating_descriptors WHERE rating_id IN ({})",
            placeholders(rating_ids.len())
        );

        let mut descriptor_query = sqlx::query_as::<_, (String, String)>(&descriptor_sql);
        for id in &rating_ids {
            descriptor_query = descriptor_query.bind(id);
        }
        let descriptor_rows = descriptor_query
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
