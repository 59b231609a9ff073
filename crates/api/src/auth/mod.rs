//! Authentication and authorization primitives.
//!
//! - [`basic`] -- HTTP Basic `Authorization` header decoding.
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`credentials`] -- The static credential table consulted per request.
//! - [`policy`] -- Path and method rules mapping requests to a required role.

pub mod basic;
pub mod credentials;
pub mod password;
pub mod policy;
