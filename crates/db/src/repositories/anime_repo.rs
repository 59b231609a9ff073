//! Repository for the `animes` table.

use anime_core::pagination::{Page, PageRequest};
use anime_core::types::DbId;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::error::StoreError;
use crate::models::anime::Anime;
use crate::store::AnimeStore;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name";

/// Provides CRUD operations for animes.
pub struct AnimeRepo;

impl AnimeRepo {
    /// Insert a new anime, returning the created row.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Anime, sqlx::Error> {
        let query = format!("INSERT INTO animes (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Anime>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find an anime by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Anime>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animes WHERE id = $1");
        sqlx::query_as::<_, Anime>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all animes ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<Anime>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animes ORDER BY id");
        sqlx::query_as::<_, Anime>(&query).fetch_all(pool).await
    }

    /// List one page of animes plus the total row count.
    ///
    /// The ORDER BY clause is built from the typed sort, never from raw input.
    /// `id` is appended as a tiebreaker so pages are stable under name sorts.
    pub async fn list_page(
        pool: &PgPool,
        request: &PageRequest,
    ) -> Result<(Vec<Anime>, i64), sqlx::Error> {
        let sort = request.sort();
        let query = format!(
            "SELECT {COLUMNS} FROM animes
             ORDER BY {column} {direction}, id {direction}
             LIMIT $1 OFFSET $2",
            column = sort.property.column(),
            direction = sort.direction.keyword(),
        );
        let rows = sqlx::query_as::<_, Anime>(&query)
            .bind(request.size())
            .bind(request.offset())
            .fetch_all(pool)
            .await?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM animes")
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// Case-sensitive substring search on `name`.
    ///
    /// Uses `strpos` rather than `LIKE` so `%` and `_` in the fragment match
    /// literally.
    pub async fn find_by_name(pool: &PgPool, fragment: &str) -> Result<Vec<Anime>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animes WHERE strpos(name, $1) > 0 ORDER BY id");
        sqlx::query_as::<_, Anime>(&query)
            .bind(fragment)
            .fetch_all(pool)
            .await
    }

    /// Overwrite an anime's name. Returns `None` if no row with `id` exists.
    pub async fn replace(pool: &PgPool, id: DbId, name: &str) -> Result<Option<Anime>, sqlx::Error> {
        let query = format!("UPDATE animes SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Anime>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an anime by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM animes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// [`AnimeStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgAnimeStore {
    pool: PgPool,
}

impl PgAnimeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnimeStore for PgAnimeStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn create(&self, name: &str) -> Result<Anime, StoreError> {
        AnimeRepo::create(&self.pool, name)
            .await
            .map_err(StoreError::classify)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Anime>, StoreError> {
        Ok(AnimeRepo::find_by_id(&self.pool, id).await?)
    }

    async fn list_all(&self) -> Result<Vec<Anime>, StoreError> {
        Ok(AnimeRepo::list(&self.pool).await?)
    }

    async fn list_page(&self, request: &PageRequest) -> Result<Page<Anime>, StoreError> {
        let (rows, total) = AnimeRepo::list_page(&self.pool, request).await?;
        Ok(Page::new(rows, request, total))
    }

    async fn find_by_name(&self, fragment: &str) -> Result<Vec<Anime>, StoreError> {
        Ok(AnimeRepo::find_by_name(&self.pool, fragment).await?)
    }

    async fn replace(&self, id: DbId, name: &str) -> Result<Option<Anime>, StoreError> {
        AnimeRepo::replace(&self.pool, id, name)
            .await
            .map_err(StoreError::classify)
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(AnimeRepo::delete(&self.pool, id).await?)
    }
}
