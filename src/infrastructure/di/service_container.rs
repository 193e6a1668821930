use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::BookmarkServiceImpl;
use crate::config::{Settings, StorageKind};
use crate::domain::repositories::repository::BookmarkRepository;
use crate::infrastructure::repositories::memory::InMemoryBookmarkRepository;
use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;
use std::sync::Arc;
use tracing::{info, instrument};

/// Production service container - single source of truth for service creation
#[derive(Clone)]
pub struct ServiceContainer {
    pub storage: StorageKind,
    pub bookmark_service: Arc<dyn BookmarkService>,
}

impl ServiceContainer {
    /// Create all services with explicit dependency injection
    #[instrument(skip_all, level = "debug")]
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        let bookmark_service: Arc<dyn BookmarkService> = match config.storage {
            StorageKind::Sqlite => {
                let repository = Self::create_sqlite_repository(config)?;
                Arc::new(BookmarkServiceImpl::new(repository))
            }
            StorageKind::Memory => {
                info!("Using in-memory bookmark storage, data is lost on shutdown");
                Arc::new(BookmarkServiceImpl::new(Arc::new(
                    InMemoryBookmarkRepository::new(),
                )))
            }
        };

        Ok(Self {
            storage: config.storage,
            bookmark_service,
        })
    }

    /// Wrap an existing repository, mainly for tests and embedding
    pub fn with_repository<R>(repository: Arc<R>, storage: StorageKind) -> Self
    where
        R: BookmarkRepository + 'static,
    {
        Self {
            storage,
            bookmark_service: Arc::new(BookmarkServiceImpl::new(repository)),
        }
    }

    fn create_sqlite_repository(
        config: &Settings,
    ) -> ApplicationResult<Arc<SqliteBookmarkRepository>> {
        // Creates the database file when missing and runs all migrations
        let repository = SqliteBookmarkRepository::from_url(&config.db_url, config.pool_size)
            .map_err(|e| {
                ApplicationError::Other(format!(
                    "Failed to create SQLite bookmark repository at '{}': {}",
                    config.db_url, e
                ))
            })?;
        info!("Using SQLite bookmark storage at {}", config.db_url);

        Ok(Arc::new(repository))
    }
}

impl std::fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("storage", &self.storage)
            .field("bookmark_service", &"Arc<dyn BookmarkService>")
            .finish()
    }
}
