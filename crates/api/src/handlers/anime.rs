//! Handlers for the `/animes` resource.
//!
//! Every handler sits behind the authorization gate. Reads and writes need
//! the `USER` role; deletes need `ADMIN`. Request bodies are validated
//! before the store is touched.

use anime_core::error::CoreError;
use anime_core::pagination::Page;
use anime_core::types::DbId;
use anime_db::models::anime::{Anime, CreateAnime, ReplaceAnime};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::{RequireAdmin, RequireUser};
use crate::query::{FindByNameParams, PageParams};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Anime", id })
}

/// GET /animes
///
/// List animes one page at a time. The default page size is 20; use `size`
/// to change it and `sort=name,desc` to reorder.
pub async fn list(
    _user: RequireUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<PageParams>,
) -> AppResult<Json<Page<Anime>>> {
    let request = params.to_page_request()?;
    let page = state.store.list_page(&request).await?;
    Ok(Json(page))
}

/// GET /animes/all
pub async fn list_all(
    _user: RequireUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Anime>>> {
    let animes = state.store.list_all().await?;
    Ok(Json(animes))
}

/// GET /animes/{id}
pub async fn get_by_id(
    _user: RequireUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Anime>> {
    let anime = state.store.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(anime))
}

/// GET /animes/find?name=
///
/// Case-sensitive substring search. No match is an empty list, not an error.
pub async fn find_by_name(
    _user: RequireUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<FindByNameParams>,
) -> AppResult<Json<Vec<Anime>>> {
    let animes = state.store.find_by_name(&params.name).await?;
    Ok(Json(animes))
}

/// POST /animes
pub async fn create(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateAnime>,
) -> AppResult<(StatusCode, Json<Anime>)> {
    let name = input.validated_name()?;
    let anime = state.store.create(name).await?;

    tracing::info!(anime_id = anime.id, username = %user.username, "Anime created");

    Ok((StatusCode::CREATED, Json(anime)))
}

/// PUT /animes
///
/// Overwrite an existing anime. The id travels in the body.
pub async fn replace(
    RequireUser(user): RequireUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<ReplaceAnime>,
) -> AppResult<StatusCode> {
    let (id, name) = input.validated()?;
    state.store.replace(id, name).await?.ok_or_else(|| not_found(id))?;

    tracing::info!(anime_id = id, username = %user.username, "Anime replaced");

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /animes/{id} and DELETE /animes/admin/{id}
///
/// Admin only.
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(anime_id = id, username = %admin.username, "Anime deleted");

    Ok(StatusCode::NO_CONTENT)
}
