// src/application/services/bookmark_service_impl.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::application::dto::{BookmarkPayload, CreatedBookmark};
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::{
    sanitize_bookmark, BookmarkService, UPDATE_FIELDS_REQUIRED,
};
use crate::domain::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use crate::domain::repositories::repository::BookmarkRepository;

#[derive(Debug)]
pub struct BookmarkServiceImpl<R: BookmarkRepository> {
    repository: Arc<R>,
}

impl<R: BookmarkRepository> BookmarkServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Ids come from the store's counter starting at 1, so anything else cannot exist
    #[instrument(skip(self), level = "trace")]
    fn validate_bookmark_id(&self, id: i32) -> ApplicationResult<()> {
        if id <= 0 {
            return Err(ApplicationError::BookmarkNotFound(id));
        }
        Ok(())
    }
}

fn required_text(value: Option<String>, field: &'static str) -> ApplicationResult<String> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(ApplicationError::MissingField(field)),
    }
}

fn supplied_text(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}

/// Check a create payload field by field, in the order title, url, rating
fn validate_new_bookmark(payload: BookmarkPayload) -> ApplicationResult<NewBookmark> {
    let BookmarkPayload {
        title,
        url,
        description,
        rating,
    } = payload;

    let title = required_text(title, "title")?;
    let url = required_text(url, "url")?;
    let rating = rating.ok_or(ApplicationError::MissingField("rating"))?;

    Ok(NewBookmark {
        title,
        url,
        description,
        rating,
    })
}

#[async_trait]
impl<R: BookmarkRepository> BookmarkService for BookmarkServiceImpl<R> {
    #[instrument(skip(self), level = "debug")]
    async fn list_bookmarks(&self) -> ApplicationResult<Vec<Bookmark>> {
        let bookmarks = self.repository.list_all().await?;
        debug!("Listing {} bookmarks", bookmarks.len());
        Ok(bookmarks)
    }

    #[instrument(skip(self), level = "debug")]
    async fn resolve_bookmark(&self, id: i32) -> ApplicationResult<Bookmark> {
        self.validate_bookmark_id(id)?;
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ApplicationError::BookmarkNotFound(id))
    }

    #[instrument(skip_all, fields(id = bookmark.id), level = "debug")]
    fn present_bookmark(&self, bookmark: Bookmark) -> Bookmark {
        sanitize_bookmark(bookmark)
    }

    #[instrument(skip(self, payload), level = "debug")]
    async fn create_bookmark(
        &self,
        collection_location: &str,
        payload: BookmarkPayload,
    ) -> ApplicationResult<CreatedBookmark> {
        let draft = validate_new_bookmark(payload)?;

        let bookmark = self
            .repository
            .insert(&draft)
            .await
            .map_err(|e| ApplicationError::Domain(e).context("create bookmark"))?;
        let location = format!(
            "{}/{}",
            collection_location.trim_end_matches('/'),
            bookmark.id
        );
        debug!("Created bookmark {} at {}", bookmark.id, location);

        Ok(CreatedBookmark { bookmark, location })
    }

    #[instrument(skip(self, payload), level = "debug")]
    async fn update_bookmark(&self, id: i32, payload: BookmarkPayload) -> ApplicationResult<()> {
        self.validate_bookmark_id(id)?;

        let changes = BookmarkChanges {
            title: supplied_text(payload.title),
            url: supplied_text(payload.url),
            description: supplied_text(payload.description),
            rating: payload.rating,
        };
        if changes.is_empty() {
            return Err(ApplicationError::Validation(
                UPDATE_FIELDS_REQUIRED.to_string(),
            ));
        }

        let affected = self
            .repository
            .update(id, &changes)
            .await
            .map_err(|e| ApplicationError::Domain(e).context(format!("update bookmark {}", id)))?;
        if affected == 0 {
            return Err(ApplicationError::BookmarkNotFound(id));
        }
        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn delete_bookmark(&self, id: i32) -> ApplicationResult<()> {
        self.validate_bookmark_id(id)?;

        let affected = self
            .repository
            .remove(id)
            .await
            .map_err(|e| ApplicationError::Domain(e).context(format!("delete bookmark {}", id)))?;
        if affected == 0 {
            return Err(ApplicationError::BookmarkNotFound(id));
        }
        debug!("Deleted bookmark {}", id);
        Ok(())
    }
}
