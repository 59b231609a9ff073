//! Domain primitives shared by the store, the HTTP server and the client.

pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
pub mod validation;
