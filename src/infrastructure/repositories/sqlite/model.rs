use crate::domain::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use std::fmt;

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::bookmarks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbBookmark {
    pub id: i32,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub rating: i32,
}

impl From<DbBookmark> for Bookmark {
    fn from(row: DbBookmark) -> Self {
        Bookmark::from_storage(row.id, row.title, row.url, row.description, row.rating)
    }
}

/// New bookmark for insertion
#[derive(Insertable, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::bookmarks)]
pub struct DbNewBookmark<'a> {
    pub title: &'a str,
    pub url: &'a str,
    pub description: Option<&'a str>,
    pub rating: i32,
}

impl<'a> From<&'a NewBookmark> for DbNewBookmark<'a> {
    fn from(draft: &'a NewBookmark) -> Self {
        Self {
            title: &draft.title,
            url: &draft.url,
            description: draft.description.as_deref(),
            rating: draft.rating,
        }
    }
}

impl fmt::Display for DbNewBookmark<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "title: {}, url: {}, description: {}, rating: {}",
            self.title,
            self.url,
            self.description.unwrap_or("None"),
            self.rating
        )
    }
}

/// Changes for updating a bookmark. `None` fields are skipped by diesel,
/// so only supplied columns end up in the `SET` clause.
#[derive(AsChangeset, Debug)]
#[diesel(table_name = crate::infrastructure::repositories::sqlite::schema::bookmarks)]
pub struct DbBookmarkChanges<'a> {
    pub title: Option<&'a str>,
    pub url: Option<&'a str>,
    pub description: Option<&'a str>,
    pub rating: Option<i32>,
}

impl<'a> From<&'a BookmarkChanges> for DbBookmarkChanges<'a> {
    fn from(changes: &'a BookmarkChanges) -> Self {
        Self {
            title: changes.title.as_deref(),
            url: changes.url.as_deref(),
            description: changes.description.as_deref(),
            rating: changes.rating,
        }
    }
}
