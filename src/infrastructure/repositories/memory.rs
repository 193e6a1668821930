// src/infrastructure/repositories/memory.rs

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::domain::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use crate::domain::error::DomainResult;
use crate::domain::repositories::repository::BookmarkRepository;

#[derive(Debug, Default)]
struct Rows {
    last_id: i32,
    bookmarks: BTreeMap<i32, Bookmark>,
}

/// Process-local bookmark store. All state is owned here and only reachable
/// through [`BookmarkRepository`]; ids are never reused.
#[derive(Debug, Default)]
pub struct InMemoryBookmarkRepository {
    rows: RwLock<Rows>,
}

impl InMemoryBookmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing rows, keeping their ids
    pub fn with_bookmarks(bookmarks: impl IntoIterator<Item = Bookmark>) -> Self {
        let mut rows = Rows::default();
        for bookmark in bookmarks {
            rows.last_id = rows.last_id.max(bookmark.id);
            rows.bookmarks.insert(bookmark.id, bookmark);
        }
        Self {
            rows: RwLock::new(rows),
        }
    }
}

#[async_trait]
impl BookmarkRepository for InMemoryBookmarkRepository {
    #[instrument(skip_all, level = "debug")]
    async fn list_all(&self) -> DomainResult<Vec<Bookmark>> {
        let rows = self.rows.read().await;
        Ok(rows.bookmarks.values().cloned().collect())
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_by_id(&self, id: i32) -> DomainResult<Option<Bookmark>> {
        let rows = self.rows.read().await;
        Ok(rows.bookmarks.get(&id).cloned())
    }

    #[instrument(skip_all, level = "debug")]
    async fn insert(&self, draft: &NewBookmark) -> DomainResult<Bookmark> {
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let bookmark = Bookmark::from_storage(
            rows.last_id,
            draft.title.clone(),
            draft.url.clone(),
            draft.description.clone(),
            draft.rating,
        );
        rows.bookmarks.insert(bookmark.id, bookmark.clone());
        debug!("Inserted bookmark with id {}", bookmark.id);
        Ok(bookmark)
    }

    #[instrument(skip(self, changes), level = "debug")]
    async fn update(&self, id: i32, changes: &BookmarkChanges) -> DomainResult<usize> {
        let mut rows = self.rows.write().await;
        match rows.bookmarks.get_mut(&id) {
            Some(bookmark) => {
                bookmark.apply(changes);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    #[instrument(skip(self), level = "debug")]
    async fn remove(&self, id: i32) -> DomainResult<usize> {
        let mut rows = self.rows.write().await;
        Ok(usize::from(rows.bookmarks.remove(&id).is_some()))
    }
}
