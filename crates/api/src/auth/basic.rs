//! Decoding of `Authorization: Basic <base64(username:password)>` headers.

use std::fmt;

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Realm advertised in `WWW-Authenticate` challenges.
pub const REALM: &str = "animes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BasicAuthError {
    #[error("Missing Authorization header")]
    Missing,
    #[error("Invalid Authorization format. Expected: Basic <credentials>")]
    WrongScheme,
    #[error("Basic credentials are not valid base64")]
    InvalidEncoding,
    #[error("Basic credentials must be 'username:password'")]
    Malformed,
}

/// A decoded username/password pair.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl BasicCredentials {
    /// Extract credentials from the request headers.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, BasicAuthError> {
        let value = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(BasicAuthError::Missing)?;
        Self::parse(value)
    }

    /// Parse the header value. The scheme name is case-insensitive.
    pub fn parse(header: &str) -> Result<Self, BasicAuthError> {
        let (scheme, encoded) = header
            .trim()
            .split_once(' ')
            .ok_or(BasicAuthError::WrongScheme)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(BasicAuthError::WrongScheme);
        }

        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|_| BasicAuthError::InvalidEncoding)?;
        let decoded = String::from_utf8(decoded).map_err(|_| BasicAuthError::InvalidEncoding)?;

        // The password may itself contain ':'; only the first one separates.
        let (username, password) = decoded.split_once(':').ok_or(BasicAuthError::Malformed)?;
        if username.is_empty() {
            return Err(BasicAuthError::Malformed);
        }

        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    /// Encode as an `Authorization` header value.
    pub fn to_header_value(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.username, self.password));
        format!("Basic {token}")
    }
}

/// The `WWW-Authenticate` challenge sent with every 401.
pub fn challenge() -> String {
    format!("Basic realm=\"{REALM}\", charset=\"UTF-8\"")
}
