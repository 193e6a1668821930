// src/application/services/bookmark_service.rs
use crate::application::dto::{BookmarkPayload, CreatedBookmark};
use crate::application::error::ApplicationResult;
use crate::domain::bookmark::Bookmark;
use crate::domain::sanitize::{sanitize_html, sanitize_optional};
use async_trait::async_trait;
use std::fmt::Debug;

pub const UPDATE_FIELDS_REQUIRED: &str =
    "Request body must contain either 'title', 'description', 'rating', or 'url'";

/// Service interface for bookmark-related operations
#[async_trait]
pub trait BookmarkService: Send + Sync + Debug {
    /// Get all bookmarks as stored
    async fn list_bookmarks(&self) -> ApplicationResult<Vec<Bookmark>>;

    /// Look up a bookmark without output shaping; `BookmarkNotFound` if absent
    async fn resolve_bookmark(&self, id: i32) -> ApplicationResult<Bookmark>;

    /// Read view of a resolved bookmark: text fields sanitized, stored data untouched.
    /// Together with `resolve_bookmark` this makes up the single-bookmark read.
    fn present_bookmark(&self, bookmark: Bookmark) -> Bookmark;

    /// Validate and store a new bookmark. `collection_location` is the address of the
    /// collection the bookmark is created in; the returned location appends the new id.
    async fn create_bookmark(
        &self,
        collection_location: &str,
        payload: BookmarkPayload,
    ) -> ApplicationResult<CreatedBookmark>;

    /// Apply the supplied fields of `payload` to an existing bookmark
    async fn update_bookmark(&self, id: i32, payload: BookmarkPayload) -> ApplicationResult<()>;

    /// Delete a bookmark by ID
    async fn delete_bookmark(&self, id: i32) -> ApplicationResult<()>;
}

/// Neutralize markup in the user-supplied text fields; `id` and `rating` pass through.
pub fn sanitize_bookmark(bookmark: Bookmark) -> Bookmark {
    Bookmark {
        title: sanitize_html(&bookmark.title),
        url: sanitize_html(&bookmark.url),
        description: sanitize_optional(bookmark.description.as_deref()),
        ..bookmark
    }
}
