// src/application/mod.rs
pub mod dto;
pub mod error;
pub mod services;

pub use services::bookmark_service_impl::BookmarkServiceImpl;
