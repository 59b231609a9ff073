//! Route definitions for the `/animes` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::anime;
use crate::state::AppState;

/// Routes mounted at `/animes`.
///
/// ```text
/// GET    /                 -> list (paged)
/// POST   /                 -> create
/// PUT    /                 -> replace
/// GET    /all              -> list_all
/// GET    /find?name=       -> find_by_name
/// GET    /{id}             -> get_by_id
/// DELETE /{id}             -> delete (admin only)
/// DELETE /admin/{id}       -> delete (admin only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(anime::list).post(anime::create).put(anime::replace),
        )
        .route("/all", get(anime::list_all))
        .route("/find", get(anime::find_by_name))
        .route("/{id}", get(anime::get_by_id).delete(anime::delete))
        .route("/admin/{id}", delete(anime::delete))
}
