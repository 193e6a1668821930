// src/application/dto.rs
use crate::domain::bookmark::Bookmark;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for creating or patching a bookmark.
///
/// Every field is optional at this level; which ones are required depends on the
/// operation. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BookmarkPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub rating: Option<i32>,
}

/// A freshly stored bookmark together with the address it can be fetched from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedBookmark {
    pub bookmark: Bookmark,
    pub location: String,
}
