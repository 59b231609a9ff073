//! Store implementations.

pub mod anime_repo;
pub mod memory;

pub use anime_repo::{AnimeRepo, PgAnimeStore};
pub use memory::MemoryAnimeStore;
