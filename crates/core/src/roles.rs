//! The two role tiers understood by the authorization gate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "USER";
pub const ROLE_ADMIN: &str = "ADMIN";

/// A role attached to a credential.
///
/// Admin accounts are expected to carry `User` as well; the gate never
/// treats `Admin` as implying `User`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => ROLE_USER,
            Role::Admin => ROLE_ADMIN,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}', expected USER or ADMIN")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    /// Accepts `USER`/`ADMIN` in any case, with or without a `ROLE_` prefix.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed
            .get(..5)
            .filter(|p| p.eq_ignore_ascii_case("ROLE_"))
            .map_or(trimmed, |_| &trimmed[5..]);

        if bare.eq_ignore_ascii_case(ROLE_USER) {
            Ok(Role::User)
        } else if bare.eq_ignore_ascii_case(ROLE_ADMIN) {
            Ok(Role::Admin)
        } else {
            Err(UnknownRole(trimmed.to_string()))
        }
    }
}
