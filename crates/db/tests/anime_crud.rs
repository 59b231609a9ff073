//! Integration tests for the PostgreSQL anime repository.
//!
//! These need a live database: set `DATABASE_URL` and run with
//! `cargo test -p anime-db -- --ignored`.

use anime_core::pagination::PageRequest;
use anime_db::repositories::{AnimeRepo, PgAnimeStore};
use anime_db::store::AnimeStore;
use anime_db::StoreError;
use assert_matches::assert_matches;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_create_and_find(pool: PgPool) {
    let created = AnimeRepo::create(&pool, "DBZ").await.unwrap();
    assert!(created.id > 0);

    let found = AnimeRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(found, Some(created));
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_replace_and_delete(pool: PgPool) {
    let created = AnimeRepo::create(&pool, "DBZ").await.unwrap();

    let replaced = AnimeRepo::replace(&pool, created.id, "DBZ2").await.unwrap();
    assert_eq!(replaced.map(|a| a.name), Some("DBZ2".to_string()));

    assert!(AnimeRepo::delete(&pool, created.id).await.unwrap());
    assert!(!AnimeRepo::delete(&pool, created.id).await.unwrap());
    assert_eq!(AnimeRepo::find_by_id(&pool, created.id).await.unwrap(), None);
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_replace_missing_row_returns_none(pool: PgPool) {
    let replaced = AnimeRepo::replace(&pool, 999_999, "Ghost").await.unwrap();
    assert!(replaced.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_name_matches_literal_substring(pool: PgPool) {
    AnimeRepo::create(&pool, "Hajime no Ippo").await.unwrap();
    AnimeRepo::create(&pool, "100% Ippo").await.unwrap();
    AnimeRepo::create(&pool, "Berserk").await.unwrap();

    let hits = AnimeRepo::find_by_name(&pool, "Ippo").await.unwrap();
    assert_eq!(hits.len(), 2);

    let hits = AnimeRepo::find_by_name(&pool, "%").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "100% Ippo");

    assert!(AnimeRepo::find_by_name(&pool, "ippo").await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Store trait over Postgres
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_blank_name_is_a_constraint_violation(pool: PgPool) {
    let store = PgAnimeStore::new(pool);

    assert_matches!(store.create("   ").await, Err(StoreError::Constraint(_)));

    let created = store.create("Trigun").await.unwrap();
    assert_matches!(
        store.replace(created.id, "").await,
        Err(StoreError::Constraint(_))
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_list_page_counts_all_rows(pool: PgPool) {
    let store = PgAnimeStore::new(pool);
    store.create("DBZ").await.unwrap();
    store.create("Berserk").await.unwrap();

    let req = PageRequest::new(Some(0), Some(1), None).unwrap();
    let page = store.list_page(&req).await.unwrap();
    assert_eq!(page.content.len(), 1);
    assert_eq!(page.total_elements, 2);
    assert_eq!(page.total_pages, 2);

    let req = PageRequest::new(None, None, Some("name,asc")).unwrap();
    let page = store.list_page(&req).await.unwrap();
    assert_eq!(page.content[0].name, "Berserk");
}

#[sqlx::test(migrations = "../../db/migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_health_check(pool: PgPool) {
    let store = PgAnimeStore::new(pool);
    assert_eq!(store.backend(), "postgres");
    store.health_check().await.unwrap();
}
