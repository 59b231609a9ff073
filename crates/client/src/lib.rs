//! Typed HTTP client for the anime catalog service.
//!
//! Wraps the `/animes` endpoints using [`reqwest`], sending HTTP Basic
//! credentials on every request.

use anime_core::pagination::Page;
use anime_core::types::DbId;
use anime_db::models::anime::{Anime, CreateAnime, ReplaceAnime};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Errors from the client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },
}

/// JSON error envelope produced by the service.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
}

/// HTTP client bound to one service instance and one account.
#[derive(Clone)]
pub struct AnimeClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl std::fmt::Debug for AnimeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimeClient")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl AnimeClient {
    /// * `base_url` - e.g. `http://localhost:8080`; a trailing `/` is ignored.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, username, password)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            username: username.into(),
            password: password.into(),
        }
    }

    /// `GET /animes/{id}`
    pub async fn get(&self, id: DbId) -> Result<Anime, ClientError> {
        let response = self.request(reqwest::Method::GET, &format!("/animes/{id}")).send().await?;
        Self::parse_response(response).await
    }

    /// `GET /animes/all`
    pub async fn list_all(&self) -> Result<Vec<Anime>, ClientError> {
        let response = self.request(reqwest::Method::GET, "/animes/all").send().await?;
        Self::parse_response(response).await
    }

    /// `GET /animes?page=&size=`
    pub async fn list_page(&self, page: i64, size: i64) -> Result<Page<Anime>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/animes")
            .query(&[("page", page), ("size", size)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `GET /animes/find?name=`
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Anime>, ClientError> {
        let response = self
            .request(reqwest::Method::GET, "/animes/find")
            .query(&[("name", name)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /animes`; returns the stored anime with its assigned id.
    pub async fn create(&self, name: &str) -> Result<Anime, ClientError> {
        let response = self
            .request(reqwest::Method::POST, "/animes")
            .json(&CreateAnime::new(name))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `PUT /animes`
    pub async fn replace(&self, anime: &Anime) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::PUT, "/animes")
            .json(&ReplaceAnime::from(anime.clone()))
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// `DELETE /animes/admin/{id}`; needs an ADMIN account.
    pub async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/animes/admin/{id}"))
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- private helpers ----

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .basic_auth(&self.username, Some(&self.password))
    }

    /// Turn a non-2xx response into [`ClientError::Api`], reading the
    /// service's `{error, code}` envelope when present.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => (parsed.code, parsed.error),
            Err(_) => (String::new(), body),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            code,
            message,
        })
    }

    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}
