// src/util/testing.rs

use std::env;
use std::sync::OnceLock;
use tempfile::TempDir;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::infrastructure::repositories::sqlite::connection::DEFAULT_POOL_SIZE;
use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;

/// Environment variables read by `config::load_settings`
pub const SETTINGS_ENV_VARS: [&str; 5] = [
    "BOOKMARKS_DB_URL",
    "BOOKMARKS_BIND_ADDR",
    "BOOKMARKS_API_PREFIX",
    "BOOKMARKS_STORAGE",
    "BOOKMARKS_POOL_SIZE",
];

/// Global test configuration, initialized exactly once via OnceLock.
#[derive(Debug)]
pub struct TestEnv {
    /// File name used for per-test databases
    pub db_file_name: &'static str,
}

static TEST_ENV: OnceLock<TestEnv> = OnceLock::new();

/// Initializes the global test environment exactly once and sets up logging.
pub fn init_test_env() -> &'static TestEnv {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
        TestEnv {
            db_file_name: "bookmarks.db",
        }
    })
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let noisy_modules = ["hyper", "h2", "mio", "tower", "want", "hyper_util"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Snapshots the settings environment variables and clears them; restores them on drop.
#[derive(Debug, Clone)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        let saved = SETTINGS_ENV_VARS
            .iter()
            .map(|&name| (name, env::var(name).ok()))
            .collect();
        for name in SETTINGS_ENV_VARS {
            env::remove_var(name);
        }
        Self { saved }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(val) => env::set_var(name, val),
                None => env::remove_var(name),
            }
        }
    }
}

/// Creates a repository backed by a fresh, migrated database in its own temp directory.
/// The directory is removed when the returned `TempDir` is dropped.
pub fn setup_test_db() -> (TempDir, SqliteBookmarkRepository) {
    let env_data = init_test_env();
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join(env_data.db_file_name);

    let repository =
        SqliteBookmarkRepository::from_url(db_path.to_string_lossy().as_ref(), DEFAULT_POOL_SIZE)
            .expect("Failed to create SqliteBookmarkRepository");

    (temp_dir, repository)
}
