// src/domain/bookmark.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Represents a bookmark domain entity
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Bookmark {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i32,
}

impl Bookmark {
    pub fn from_storage(
        id: i32,
        title: String,
        url: String,
        description: Option<String>,
        rating: i32,
    ) -> Self {
        Self {
            id,
            title,
            url,
            description,
            rating,
        }
    }

    /// Apply a partial change set in place, leaving absent fields untouched
    pub fn apply(&mut self, changes: &BookmarkChanges) {
        if let Some(title) = &changes.title {
            self.title = title.clone();
        }
        if let Some(url) = &changes.url {
            self.url = url.clone();
        }
        if let Some(description) = &changes.description {
            self.description = Some(description.clone());
        }
        if let Some(rating) = changes.rating {
            self.rating = rating;
        }
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} (rating: {})",
            self.id, self.title, self.url, self.rating
        )
    }
}

impl fmt::Debug for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bookmark")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("url", &self.url)
            .field("description", &self.description)
            .field("rating", &self.rating)
            .finish()
    }
}

/// A validated creation draft; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i32,
}

/// Partial field set for an update. `None` means "leave as stored".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookmarkChanges {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i32>,
}

impl BookmarkChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.url.is_none()
            && self.description.is_none()
            && self.rating.is_none()
    }
}
