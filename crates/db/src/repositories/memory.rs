//! In-process [`AnimeStore`] used when no database is configured and in tests.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use anime_core::pagination::{Page, PageRequest, SortDirection, SortProperty};
use anime_core::types::DbId;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::anime::Anime;
use crate::store::AnimeStore;

#[derive(Debug)]
struct Rows {
    next_id: DbId,
    by_id: BTreeMap<DbId, Anime>,
}

/// Anime rows held in a `BTreeMap` behind a `RwLock`.
///
/// Ids start at 1 and are never reused, mirroring a BIGSERIAL column.
#[derive(Debug)]
pub struct MemoryAnimeStore {
    rows: RwLock<Rows>,
}

impl Default for MemoryAnimeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryAnimeStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Rows {
                next_id: 1,
                by_id: BTreeMap::new(),
            }),
        }
    }
}

fn check_name(name: &str) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::Constraint(
            "row violates constraint ck_animes_name_not_blank".into(),
        ));
    }
    Ok(())
}

fn compare(a: &Anime, b: &Anime, property: SortProperty) -> Ordering {
    match property {
        SortProperty::Id => a.id.cmp(&b.id),
        SortProperty::Name => a.name.cmp(&b.name).then(a.id.cmp(&b.id)),
    }
}

#[async_trait]
impl AnimeStore for MemoryAnimeStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn create(&self, name: &str) -> Result<Anime, StoreError> {
        check_name(name)?;
        let mut rows = self.rows.write().await;
        let anime = Anime {
            id: rows.next_id,
            name: name.to_string(),
        };
        rows.next_id += 1;
        rows.by_id.insert(anime.id, anime.clone());
        Ok(anime)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Anime>, StoreError> {
        Ok(self.rows.read().await.by_id.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Anime>, StoreError> {
        Ok(self.rows.read().await.by_id.values().cloned().collect())
    }

    async fn list_page(&self, request: &PageRequest) -> Result<Page<Anime>, StoreError> {
        let rows = self.rows.read().await;
        let sort = request.sort();

        let mut all: Vec<&Anime> = rows.by_id.values().collect();
        all.sort_by(|a, b| {
            let ord = compare(a, b, sort.property);
            match sort.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });

        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let size = usize::try_from(request.size()).unwrap_or(usize::MAX);
        let content = all.into_iter().skip(offset).take(size).cloned().collect();
        let total = i64::try_from(rows.by_id.len()).unwrap_or(i64::MAX);

        Ok(Page::new(content, request, total))
    }

    async fn find_by_name(&self, fragment: &str) -> Result<Vec<Anime>, StoreError> {
        Ok(self
            .rows
            .read()
            .await
            .by_id
            .values()
            .filter(|anime| anime.name.contains(fragment))
            .cloned()
            .collect())
    }

    async fn replace(&self, id: DbId, name: &str) -> Result<Option<Anime>, StoreError> {
        check_name(name)?;
        let mut rows = self.rows.write().await;
        Ok(rows.by_id.get_mut(&id).map(|anime| {
            anime.name = name.to_string();
            anime.clone()
        }))
    }

    async fn delete(&self, id: DbId) -> Result<bool, StoreError> {
        Ok(self.rows.write().await.by_id.remove(&id).is_some())
    }
}
