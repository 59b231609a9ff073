//! The authorization gate and the identity it attaches to requests.

use std::sync::Arc;

use anime_core::error::CoreError;
use anime_core::roles::Role;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::basic::BasicCredentials;
use crate::auth::policy::Access;
use crate::error::AppError;
use crate::state::AppState;

/// The caller authenticated by [`authorize`].
///
/// Use this as an extractor parameter in any handler behind the gate:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(username = %user.username, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
    pub roles: Vec<Role>,
}

impl AuthUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Authentication required".into()))
        })
    }
}

/// Axum middleware admitting or rejecting every request.
///
/// Resolves the path's [`Access`] requirement from the policy, then (unless
/// public) decodes Basic credentials, verifies them against the credential
/// store and checks the required role. Rejections are 401 for missing or
/// bad credentials and 403 for a missing role. Nothing is cached; every
/// request is re-authenticated.
///
/// ```ignore
/// let app = Router::new()
///     .nest("/animes", routes::anime::router())
///     .layer(middleware::from_fn_with_state(state.clone(), authorize));
/// ```
pub async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let access = state
        .policy
        .required_access(request.method(), request.uri().path());

    if access == Access::Public {
        return Ok(next.run(request).await);
    }

    let credentials = BasicCredentials::from_headers(request.headers()).map_err(|e| {
        tracing::debug!(
            method = %request.method(),
            path = request.uri().path(),
            reason = %e,
            "Rejected request without usable credentials",
        );
        AppError::Core(CoreError::Unauthorized(e.to_string()))
    })?;

    let user = authenticate(&state, credentials).await?;

    if let Access::Role(role) = access {
        if !user.has_role(role) {
            tracing::warn!(
                username = %user.username,
                method = %request.method(),
                path = request.uri().path(),
                required = %role,
                "Insufficient role",
            );
            return Err(AppError::Core(CoreError::Forbidden(format!(
                "{role} role required"
            ))));
        }
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// Verify credentials off the async runtime; Argon2 is deliberately slow.
async fn authenticate(state: &AppState, credentials: BasicCredentials) -> Result<AuthUser, AppError> {
    let store = Arc::clone(&state.credentials);
    let username = credentials.username.clone();

    let roles = tokio::task::spawn_blocking(move || {
        store.authenticate(&credentials.username, &credentials.password)
    })
    .await
    .map_err(|e| AppError::InternalError(format!("credential check aborted: {e}")))?;

    match roles {
        Some(roles) => Ok(AuthUser { username, roles }),
        None => {
            tracing::warn!(username = %username, "Invalid Basic credentials");
            Err(AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            )))
        }
    }
}
