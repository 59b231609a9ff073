//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose roles do not
//! include the one required. The gate already enforces the path policy;
//! these pin the requirement to the handler signature as well.

use anime_core::error::CoreError;
use anime_core::roles::Role;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;

/// Requires the `ADMIN` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<StatusCode> {
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = require_role(parts, state, Role::Admin).await?;
        Ok(RequireAdmin(user))
    }
}

/// Requires the `USER` role. Rejects with 403 Forbidden otherwise.
pub struct RequireUser(pub AuthUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = require_role(parts, state, Role::User).await?;
        Ok(RequireUser(user))
    }
}

async fn require_role<S>(parts: &mut Parts, state: &S, role: Role) -> Result<AuthUser, AppError>
where
    S: Send + Sync,
{
    let user = AuthUser::from_request_parts(parts, state).await?;
    if !user.has_role(role) {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "{role} role required"
        ))));
    }
    Ok(user)
}
