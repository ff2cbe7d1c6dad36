//! PostgreSQL implementation of FavoriteRepository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use encore::{DomainError, Favorite, FavoriteDigest, FavoriteRepository, Page, PageRequest};

use super::map_sqlx_error;

pub struct PgFavoriteRepository {
    pool: PgPool,
}

impl PgFavoriteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct FavoriteRow {
    id: Uuid,
    user_id: Uuid,
    catalog_track_id: String,
    track_name: Option<String>,
    artist_name: Option<String>,
    album_image_url: Option<String>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<FavoriteRow> for Favorite {
    fn from(row: FavoriteRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            catalog_track_id: row.catalog_track_id,
            track_name: row.track_name,
            artist_name: row.artist_name,
            album_image_url: row.album_image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DigestRow {
    catalog_track_id: String,
    track_name: Option<String>,
    artist_name: Option<String>,
}

impl From<DigestRow> for FavoriteDigest {
    fn from(row: DigestRow) -> Self {
        Self {
            catalog_track_id: row.catalog_track_id,
            track_name: row.track_name.unwrap_or_default(),
            artist_name: row.artist_name.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl FavoriteRepository for PgFavoriteRepository {
    async fn create(&self, favorite: &Favorite) -> Result<Favorite, DomainError> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            r#"
            INSERT INTO favorites
                (id, user_id, catalog_track_id, track_name, artist_name, album_image_url,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(favorite.id)
        .bind(favorite.user_id)
        .bind(&favorite.catalog_track_id)
        .bind(&favorite.track_name)
        .bind(&favorite.artist_name)
        .bind(&favorite.album_image_url)
        .bind(favorite.created_at)
        .bind(favorite.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, user_id: Uuid, id: Uuid) -> Result<Option<Favorite>, DomainError> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            "SELECT * FROM favorites WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn find_by_track(
        &self,
        user_id: Uuid,
        catalog_track_id: &str,
    ) -> Result<Option<Favorite>, DomainError> {
        let row = sqlx::query_as::<_, FavoriteRow>(
            "SELECT * FROM favorites WHERE user_id = $1 AND catalog_track_id = $2",
        )
        .bind(user_id)
        .bind(catalog_track_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(Into::into))
    }

    async fn list(&self, user_id: Uuid, page: PageRequest) -> Result<Page<Favorite>, DomainError> {
        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        let rows = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT * FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
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

    async fn list_by_ids(
        &self,
        user_id: Uuid,
        ids: &[Uuid],
        page: PageRequest,
    ) -> Result<Page<Favorite>, DomainError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM favorites WHERE user_id = $1 AND id = ANY($2)",
        )
        .bind(user_id)
        .bind(ids.to_vec())
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        let rows = sqlx::query_as::<_, FavoriteRow>(
            r#"
            SELECT * FROM favorites
            WHERE user_id = $1 AND id = ANY($2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(ids.to_vec())
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

    async fn delete_by_track(
        &self,
        user_id: Uuid,
        catalog_track_id: &str,
    ) -> Result<bool, DomainError> {
        // memberships and comments go with it (ON DELETE CASCADE)
        let result =
            sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND catalog_track_id = $2")
                .bind(user_id)
                .bind(catalog_track_id)
                .execute(&self.pool)
                .await
                .map_err(map_sqlx_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn recent_digest(
        &self,
        user_id: Uuid,
        limit: u32,
    ) -> Result<Vec<FavoriteDigest>, DomainError> {
        let rows = sqlx::query_as::<_, DigestRow>(
            r#"
            SELECT catalog_track_id, track_name, artist_name
            FROM favorites
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
