//! Query parameter types for the anime handlers.

use anime_core::error::CoreError;
use anime_core::pagination::PageRequest;
use serde::Deserialize;

/// Pagination parameters (`?page=&size=&sort=`).
///
/// `page` is 0-based. Values are normalised by [`PageRequest::new`]; only an
/// unknown sort expression is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
}

impl PageParams {
    pub fn to_page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(self.page, self.size, self.sort.as_deref())
    }
}

/// Parameters for `GET /animes/find`.
///
/// `name` must be present; `?name=` is the empty fragment and matches
/// everything.
#[derive(Debug, Deserialize)]
pub struct FindByNameParams {
    pub name: String,
}
