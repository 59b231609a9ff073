//! The storage seam between the HTTP handlers and persistence.

use anime_core::pagination::{Page, PageRequest};
use anime_core::types::DbId;
use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::anime::Anime;

/// Persistence operations for the anime catalog.
///
/// Implementations must serialise concurrent writes themselves; callers hold
/// no locks. Every write re-checks that `name` is not blank and reports a
/// violation as [`StoreError::Constraint`].
#[async_trait]
pub trait AnimeStore: Send + Sync {
    /// Short backend label reported by the health endpoint.
    fn backend(&self) -> &'static str;

    /// Confirm the backend is reachable.
    async fn health_check(&self) -> Result<(), StoreError>;

    /// Insert a new anime, returning it with its assigned id.
    async fn create(&self, name: &str) -> Result<Anime, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Anime>, StoreError>;

    /// Every anime ordered by id.
    async fn list_all(&self) -> Result<Vec<Anime>, StoreError>;

    /// One page of animes ordered per the request's sort.
    async fn list_page(&self, request: &PageRequest) -> Result<Page<Anime>, StoreError>;

    /// Animes whose name contains `fragment` (case-sensitive), ordered by id.
    /// An empty fragment matches everything.
    async fn find_by_name(&self, fragment: &str) -> Result<Vec<Anime>, StoreError>;

    /// Overwrite the anime with `id`. Returns `None` if no such row exists.
    async fn replace(&self, id: DbId, name: &str) -> Result<Option<Anime>, StoreError>;

    /// Delete by id. Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;
}
