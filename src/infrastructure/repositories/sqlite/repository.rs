// src/infrastructure/repositories/sqlite/repository.rs

use async_trait::async_trait;
use diesel::prelude::*;
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::bookmark::{Bookmark, BookmarkChanges, NewBookmark};
use crate::domain::error::DomainResult;
use crate::domain::repositories::repository::BookmarkRepository;
use crate::infrastructure::repositories::sqlite::model::{
    DbBookmark, DbBookmarkChanges, DbNewBookmark,
};
use crate::infrastructure::repositories::sqlite::schema::bookmarks::dsl;

#[derive(Clone, Debug)]
pub struct SqliteBookmarkRepository {
    pool: ConnectionPool,
}

impl SqliteBookmarkRepository {
    /// Create a new SQLite repository with the provided database URL, running migrations
    #[instrument(skip_all, level = "debug")]
    pub fn from_url(database_url: &str, pool_size: u32) -> SqliteResult<Self> {
        let pool = super::connection::init_pool(database_url, pool_size)?;
        Ok(Self { pool })
    }

    /// Get a connection from the pool
    #[instrument(skip_all, level = "debug")]
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }

    /// Run a blocking diesel operation on the blocking thread pool with a pooled connection
    async fn with_connection<T, F>(&self, operation: F) -> SqliteResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PooledConnection) -> SqliteResult<T> + Send + 'static,
    {
        let repository = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = repository.get_connection()?;
            operation(&mut conn)
        })
        .await?
    }
}

#[async_trait]
impl BookmarkRepository for SqliteBookmarkRepository {
    #[instrument(skip_all, level = "debug")]
    async fn list_all(&self) -> DomainResult<Vec<Bookmark>> {
        let rows = self
            .with_connection(|conn| {
                dsl::bookmarks
                    .order(dsl::id.asc())
                    .select(DbBookmark::as_select())
                    .load::<DbBookmark>(conn)
                    .map_err(SqliteRepositoryError::DatabaseError)
            })
            .await?;

        Ok(rows.into_iter().map(Bookmark::from).collect())
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_by_id(&self, id: i32) -> DomainResult<Option<Bookmark>> {
        let row = self
            .with_connection(move |conn| {
                dsl::bookmarks
                    .filter(dsl::id.eq(id))
                    .select(DbBookmark::as_select())
                    .first::<DbBookmark>(conn)
                    .optional()
                    .map_err(SqliteRepositoryError::DatabaseError)
            })
            .await?;

        Ok(row.map(Bookmark::from))
    }

    #[instrument(skip_all, level = "debug")]
    async fn insert(&self, draft: &NewBookmark) -> DomainResult<Bookmark> {
        let draft = draft.clone();
        let row = self
            .with_connection(move |conn| {
                let db_bookmark = DbNewBookmark::from(&draft);
                debug!("Inserting bookmark: {}", db_bookmark);

                diesel::insert_into(dsl::bookmarks)
                    .values(&db_bookmark)
                    .returning(DbBookmark::as_returning())
                    .get_result::<DbBookmark>(conn)
                    .map_err(SqliteRepositoryError::DatabaseError)
            })
            .await?;

        debug!("Inserted bookmark with id {}", row.id);
        Ok(row.into())
    }

    #[instrument(skip(self, changes), level = "debug")]
    async fn update(&self, id: i32, changes: &BookmarkChanges) -> DomainResult<usize> {
        let changes = changes.clone();
        let affected = self
            .with_connection(move |conn| {
                // diesel refuses an empty SET clause; report existence instead
                if changes.is_empty() {
                    let count = dsl::bookmarks
                        .filter(dsl::id.eq(id))
                        .count()
                        .get_result::<i64>(conn)?;
                    return Ok(usize::from(count > 0));
                }

                diesel::update(dsl::bookmarks.filter(dsl::id.eq(id)))
                    .set(&DbBookmarkChanges::from(&changes))
                    .execute(conn)
                    .map_err(SqliteRepositoryError::DatabaseError)
            })
            .await?;

        debug!("Updated {} row(s) for bookmark {}", affected, id);
        Ok(affected)
    }

    #[instrument(skip(self), level = "debug")]
    async fn remove(&self, id: i32) -> DomainResult<usize> {
        let affected = self
            .with_connection(move |conn| {
                diesel::delete(dsl::bookmarks.filter(dsl::id.eq(id)))
                    .execute(conn)
                    .map_err(SqliteRepositoryError::DatabaseError)
            })
            .await?;

        debug!("Deleted {} row(s) for bookmark {}", affected, id);
        Ok(affected)
    }
}
