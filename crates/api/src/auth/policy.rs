//! Ordered access rules evaluated by the authorization gate.
//!
//! The first rule whose method and path prefix match decides what a request
//! needs; requests matching no rule fall back to [`Access::Authenticated`].

use anime_core::roles::Role;
use axum::http::Method;

/// What a request must present to pass the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No credentials needed.
    Public,
    /// Any valid credentials.
    Authenticated,
    /// Valid credentials carrying this role.
    Role(Role),
}

#[derive(Debug, Clone)]
pub struct AccessRule {
    method: Option<Method>,
    prefix: String,
    access: Access,
}

impl AccessRule {
    /// Match any method under `prefix`.
    pub fn any(prefix: impl Into<String>, access: Access) -> Self {
        Self {
            method: None,
            prefix: normalise(prefix.into()),
            access,
        }
    }

    /// Match only `method` under `prefix`.
    pub fn method(method: Method, prefix: impl Into<String>, access: Access) -> Self {
        Self {
            method: Some(method),
            prefix: normalise(prefix.into()),
            access,
        }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        if self.method.as_ref().is_some_and(|m| m != method) {
            return false;
        }
        under_prefix(path, &self.prefix)
    }
}

fn normalise(prefix: String) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Segment-aware prefix test: `/animes` covers `/animes` and `/animes/1`
/// but not `/animes-archive`.
fn under_prefix(path: &str, prefix: &str) -> bool {
    if prefix == "/" {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[derive(Debug, Clone)]
pub struct AccessPolicy {
    rules: Vec<AccessRule>,
    fallback: Access,
}

impl AccessPolicy {
    pub fn new(rules: Vec<AccessRule>, fallback: Access) -> Self {
        Self { rules, fallback }
    }

    /// The rules guarding the anime API, most specific first:
    ///
    /// ```text
    /// *       /health          public
    /// *       /animes/admin/** ADMIN
    /// DELETE  /animes/**       ADMIN
    /// *       /animes/**       USER
    /// *       anything else    authenticated
    /// ```
    pub fn anime_api() -> Self {
        Self::new(
            vec![
                AccessRule::any("/health", Access::Public),
                AccessRule::any("/animes/admin", Access::Role(Role::Admin)),
                AccessRule::method(Method::DELETE, "/animes", Access::Role(Role::Admin)),
                AccessRule::any("/animes", Access::Role(Role::User)),
            ],
            Access::Authenticated,
        )
    }

    /// Resolve the access requirement for a request.
    pub fn required_access(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map_or(self.fallback, |rule| rule.access)
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::anime_api()
    }
}
