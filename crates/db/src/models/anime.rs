//! Anime entity model and request DTOs.

use anime_core::error::CoreError;
use anime_core::types::DbId;
use anime_core::validation::{not_blank, validate_request};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

pub const NAME_REQUIRED: &str = "The anime name cannot be blank or null";
pub const ID_REQUIRED: &str = "The anime id is required";

/// A row from the `animes` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Anime {
    pub id: DbId,
    pub name: String,
}

/// DTO for creating a new anime. The id is assigned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateAnime {
    #[validate(
        required(message = "The anime name cannot be blank or null"),
        custom(function = "not_blank", message = "The anime name cannot be blank or null")
    )]
    pub name: Option<String>,
}

impl CreateAnime {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Validate the request and borrow the name to persist.
    pub fn validated_name(&self) -> Result<&str, CoreError> {
        validate_request(self)?;
        self.name
            .as_deref()
            .ok_or_else(|| CoreError::Validation(format!("name: {NAME_REQUIRED}")))
    }
}

/// DTO for replacing an existing anime. Every field is overwritten.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ReplaceAnime {
    #[validate(required(message = "The anime id is required"))]
    pub id: Option<DbId>,
    #[validate(
        required(message = "The anime name cannot be blank or null"),
        custom(function = "not_blank", message = "The anime name cannot be blank or null")
    )]
    pub name: Option<String>,
}

impl ReplaceAnime {
    pub fn new(id: DbId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
        }
    }

    /// Validate the request and return the target id and new name.
    pub fn validated(&self) -> Result<(DbId, &str), CoreError> {
        validate_request(self)?;
        match (self.id, self.name.as_deref()) {
            (Some(id), Some(name)) => Ok((id, name)),
            (None, _) => Err(CoreError::Validation(format!("id: {ID_REQUIRED}"))),
            (_, None) => Err(CoreError::Validation(format!("name: {NAME_REQUIRED}"))),
        }
    }
}

impl From<Anime> for ReplaceAnime {
    fn from(anime: Anime) -> Self {
        Self::new(anime.id, anime.name)
    }
}
