//! PostgreSQL implementation of CommentRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use encore::{Comment, CommentRepository, DomainError, Page, PageRequest};

use super::map_sqlx_error;

pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CommentRow {
    id: Uuid,
    user_id: Uuid,
    favorite_id: Uuid,
    text: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            favorite_id: row.favorite_id,
            text: row.text,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: &Comment) -> Result<Comment, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (id, user_id, favorite_id, text, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(comment.id)
        .bind(comment.user_id)
        .bind(comment.favorite_id)
        .bind(&comment.text)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn list_for_favorite(
        &self,
        favorite_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Comment>, DomainError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments WHERE favorite_id = $1")
                .bind(favorite_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT * FROM comments
            WHERE favorite_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(favorite_id)
        .bind(page.limit as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Page::new(
            rows.into_iter().map(Into::into).collect(),
            page,
            total.max(0) as u64,
        ))
    }

    async fn update_text(
        &self,
        user_id: Uuid,
        id: Uuid,
        text: &str,
    ) -> Result<Option<Comment>, DomainError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            UPDATE comments
            SET text = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(text)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
