use std::sync::Arc;

use anime_db::store::AnimeStore;

use crate::auth::credentials::CredentialStore;
use crate::auth::policy::AccessPolicy;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Every collaborator is constructed explicitly and passed in; cloning is
/// cheap because each field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Anime persistence (PostgreSQL or in-memory).
    pub store: Arc<dyn AnimeStore>,
    /// Accounts accepted by the Basic-auth gate.
    pub credentials: Arc<CredentialStore>,
    /// Path/role rules applied by the gate.
    pub policy: Arc<AccessPolicy>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn AnimeStore>,
        credentials: CredentialStore,
        policy: AccessPolicy,
        config: ServerConfig,
    ) -> Self {
        Self {
            store,
            credentials: Arc::new(credentials),
            policy: Arc::new(policy),
            config: Arc::new(config),
        }
    }
}
