//! PostgreSQL implementation of CategoryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use encore::{Category, CategoryRepository, DomainError, Page, PageRequest};

use super::map_sqlx_error;

/// Category columns plus the ordered membership list
const SELECT_CATEGORY: &str = r#"
    SELECT c.id, c.user_id, c.name, c.created_at, c.updated_at,
           COALESCE(
               ARRAY_AGG(cf.favorite_id ORDER BY cf.added_at)
                   FILTER (WHERE cf.favorite_id IS NOT NULL),
               ARRAY[]::uuid[]
           ) AS favorite_ids
    FROM categories c
    LEFT JOIN category_favorites cf ON cf.category_id = c.id
"#;

pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    favorite_ids: Vec<Uuid>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            favorite_ids: row.favorite_ids,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, category: &Category) -> Result<Category, DomainError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (id, user_id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *, ARRAY[]::uuid[] AS favorite_ids
            "#,
        )
        .bind(category.id)
        .bind(category.user_id)
        .bind(&category.name)
        .bind(category.created_at)
        .bind(category.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Category>, DomainError> {
        let sql = format!(
            "{} WHERE c.id = $1 AND c.user_id = $2 GROUP BY c.id",
            SELECT_CATEGORY
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_name(
        &self,
        user_id: Uuid,
        name: &str,
    ) -> Result<Option<Category>, DomainError> {
        let sql = format!(
            "{} WHERE c.user_id = $1 AND c.name = $2 GROUP BY c.id",
            SELECT_CATEGORY
        );
        let row = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(user_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Category>, DomainError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        let sql = format!(
            "{} WHERE c.user_id = $1 GROUP BY c.id ORDER BY c.created_at DESC LIMIT $2 OFFSET $3",
            SELECT_CATEGORY
        );
        let rows = sqlx::query_as::<_, CategoryRow>(&sql)
            .bind(user_id)
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

    async fn rename(
        &self,
        user_id: Uuid,
        id: Uuid,
        name: &str,
    ) -> Result<Option<Category>, DomainError> {
        let result = sqlx::query(
            "UPDATE categories SET name = $3, updated_at = NOW() WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.find_by_id(user_id, id).await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_favorite(&self, category_id: Uuid, favorite_id: Uuid) -> Result<(), DomainError> {
        sqlx::query("INSERT INTO category_favorites (category_id, favorite_id) VALUES ($1, $2)")
            .bind(category_id)
            .bind(favorite_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn remove_favorite(
        &self,
        category_id: Uuid,
        favorite_id: Uuid,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM category_favorites WHERE category_id = $1 AND favorite_id = $2",
        )
        .bind(category_id)
        .bind(favorite_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }
}
