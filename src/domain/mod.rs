// src/domain/mod.rs
pub mod bookmark;
pub mod error;
pub mod repositories;
pub mod sanitize;
