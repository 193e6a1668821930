// src/infrastructure/repositories/sqlite/migration.rs
use diesel_migrations::{embed_migrations, EmbeddedMigrations};

/// Schema migrations compiled into the binary, applied when the pool is created
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");
