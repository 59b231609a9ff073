//! Authentication and authorization middleware.
//!
//! - [`auth::authorize`] -- The gate: Basic-auth check plus path policy on every request.
//! - [`auth::AuthUser`] -- The identity the gate attached to the request.
//! - [`rbac::RequireAdmin`] -- Requires the `ADMIN` role.
//! - [`rbac::RequireUser`] -- Requires the `USER` role.

pub mod auth;
pub mod rbac;
