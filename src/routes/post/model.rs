use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::routes::tag::Tag;
use crate::utils::{normalize_tags, post_slug, slugify};

#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub thumbnail_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub view_count: i32,
    pub is_published: bool,
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub tags: Vec<Tag>,
}

fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub thumbnail_url: String,
    #[serde(default = "default_published")]
    pub is_published: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub thumbnail_url: String,
    pub is_published: bool,
    /// 为空时保留原有标签
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

const POST_COLUMNS: &str = "id, title, content, thumbnail_url, created_at, updated_at, \
                            author_id, view_count, is_published, slug";

impl Post {
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts ORDER BY created_at DESC"
        ))
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<PostDetail>, sqlx::Error> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        match post {
            Some(post) => {
                let tags = Tag::find_by_post(pool, post.id).await?;
                Ok(Some(PostDetail { post, tags }))
            }
            None => Ok(None),
        }
    }

    /// 创建文章、upsert 标签并建立关联，在同一事务内完成
    pub async fn create(
        pool: &PgPool,
        req: CreatePostRequest,
        author_id: Uuid,
    ) -> Result<PostDetail, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (title, content, thumbnail_url, is_published, slug, author_id, view_count)
            VALUES ($1, $2, $3, $4, $5, $6, 0)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(req.title.trim())
        .bind(&req.content)
        .bind(&req.thumbnail_url)
        .bind(req.is_published)
        .bind(post_slug(&req.title))
        .bind(author_id)
        .fetch_one(&mut *tx)
        .await?;

        let tags = attach_tags(&mut tx, post.id, &req.tags).await?;
        tx.commit().await?;

        tracing::info!("Created post {} with {} tags", post.id, tags.len());
        Ok(PostDetail { post, tags })
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: UpdatePostRequest,
    ) -> Result<Option<PostDetail>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET title = $2, content = $3, thumbnail_url = $4, is_published = $5,
                slug = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(req.title.trim())
        .bind(&req.content)
        .bind(&req.thumbnail_url)
        .bind(req.is_published)
        .bind(post_slug(&req.title))
        .fetch_optional(&mut *tx)
        .await?;

        let Some(post) = post else {
            return Ok(None);
        };

        let tags = match req.tags {
            Some(tags) => {
                sqlx::query("DELETE FROM post_tags WHERE post_id = $1")
                    .bind(post.id)
                    .execute(&mut *tx)
                    .await?;
                attach_tags(&mut tx, post.id, &tags).await?
            }
            None => Tag::find_by_post(&mut *tx, post.id).await?,
        };
        tx.commit().await?;

        Ok(Some(PostDetail { post, tags }))
    }

    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// upsert 标签并写入 post_tags，返回关联后的标签
async fn attach_tags(
    tx: &mut Transaction<'_, Postgres>,
    post_id: Uuid,
    tags: &[String],
) -> Result<Vec<Tag>, sqlx::Error> {
    let names = normalize_tags(tags);
    if names.is_empty() {
        return Ok(Vec::new());
    }
    let slugs: Vec<String> = names.iter().map(|name| slugify(name)).collect();

    let tags = sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO tags (name, slug)
        SELECT * FROM UNNEST($1::text[], $2::text[])
        ON CONFLICT (name) DO UPDATE SET slug = EXCLUDED.slug
        RETURNING id, name, slug, created_at
        "#,
    )
    .bind(&names)
    .bind(&slugs)
    .fetch_all(&mut **tx)
    .await?;

    let tag_ids: Vec<Uuid> = tags.iter().map(|tag| tag.id).collect();
    sqlx::query(
        r#"
        INSERT INTO post_tags (post_id, tag_id)
        SELECT $1, UNNEST($2::uuid[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(post_id)
    .bind(&tag_ids)
    .execute(&mut **tx)
    .await?;

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_request_defaults_match_new_post_form() {
        let req: CreatePostRequest =
            serde_json::from_value(json!({ "title": "Hello", "content": "body" })).unwrap();
        assert!(req.is_published);
        assert!(req.thumbnail_url.is_empty());
        assert!(req.tags.is_empty());
    }

    #[test]
    fn update_request_without_tags_keeps_existing() {
        let req: UpdatePostRequest = serde_json::from_value(json!({
            "title": "Hello",
            "content": "body",
            "is_published": false
        }))
        .unwrap();
        assert!(req.tags.is_none());
    }
}
