use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct SocialLink {
    pub id: Uuid,
    pub platform: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSocialLinkRequest {
    pub platform: String,
    pub url: String,
}

impl SocialLink {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, SocialLink>(
            "SELECT id, platform, url, created_at FROM social_links ORDER BY platform",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn create(pool: &PgPool, platform: &str, url: &str) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, SocialLink>(
            r#"
            INSERT INTO social_links (platform, url)
            VALUES ($1, $2)
            RETURNING id, platform, url, created_at
            "#,
        )
        .bind(platform)
        .bind(url)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM social_links WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
