// src/domain/repositories/repository.rs

use crate::domain::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use crate::domain::error::DomainResult;
use async_trait::async_trait;

/// Repository trait for bookmark persistence operations.
///
/// A narrow key-based CRUD boundary. Absence is reported through `Option` and
/// affected-row counts; errors are reserved for store failures.
#[async_trait]
pub trait BookmarkRepository: std::fmt::Debug + Send + Sync {
    /// Get all bookmarks, ordered by id
    async fn list_all(&self) -> DomainResult<Vec<Bookmark>>;

    /// Get a bookmark by its ID
    async fn get_by_id(&self, id: i32) -> DomainResult<Option<Bookmark>>;

    /// Persist a new bookmark and return it with its assigned id
    async fn insert(&self, draft: &NewBookmark) -> DomainResult<Bookmark>;

    /// Apply the supplied fields only. Returns rows affected, 0 if `id` is unknown.
    async fn update(&self, id: i32, changes: &BookmarkChanges) -> DomainResult<usize>;

    /// Hard-delete a bookmark. Returns rows affected, 0 if `id` is unknown.
    async fn remove(&self, id: i32) -> DomainResult<usize>;
}
