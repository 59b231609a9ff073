//! The static credential table: username -> (Argon2id hash, roles).

use std::collections::HashMap;

use anime_core::roles::Role;

use crate::auth::password::{check_hash, hash_password, is_argon2_hash, verify_password};
use crate::config::UserEntry;

/// Failure while building the credential table at startup.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("stored hash for user '{username}' is invalid: {reason}")]
    InvalidHash { username: String, reason: String },

    #[error("failed to hash password: {0}")]
    Hashing(String),
}

#[derive(Debug, Clone)]
struct StoredUser {
    password_hash: String,
    roles: Vec<Role>,
}

/// In-memory credential store consulted on every request.
///
/// Lookups for unknown usernames still run a full Argon2 verification
/// against a throwaway hash so timing does not reveal which accounts exist.
#[derive(Debug)]
pub struct CredentialStore {
    users: HashMap<String, StoredUser>,
    decoy_hash: String,
}

impl CredentialStore {
    /// Build the table from configured entries, hashing plaintext secrets.
    pub fn from_entries(entries: &[UserEntry]) -> Result<Self, CredentialError> {
        let mut users = HashMap::with_capacity(entries.len());

        for entry in entries {
            let password_hash = if is_argon2_hash(&entry.secret) {
                check_hash(&entry.secret).map_err(|e| CredentialError::InvalidHash {
                    username: entry.username.clone(),
                    reason: e.to_string(),
                })?;
                entry.secret.clone()
            } else {
                hash_password(&entry.secret).map_err(|e| CredentialError::Hashing(e.to_string()))?
            };

            users.insert(
                entry.username.clone(),
                StoredUser {
                    password_hash,
                    roles: entry.roles.clone(),
                },
            );
        }

        let decoy_hash =
            hash_password("decoy-password").map_err(|e| CredentialError::Hashing(e.to_string()))?;

        Ok(Self { users, decoy_hash })
    }

    /// Verify `password` for `username`, returning the account's roles on
    /// success and `None` for an unknown user or a wrong password.
    ///
    /// CPU-bound; call from a blocking context.
    pub fn authenticate(&self, username: &str, password: &str) -> Option<Vec<Role>> {
        let Some(user) = self.users.get(username) else {
            let _ = verify_password(password, &self.decoy_hash);
            return None;
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Some(user.roles.clone()),
            Ok(false) => None,
            Err(e) => {
                tracing::error!(username, error = %e, "Stored password hash could not be parsed");
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
