// src/lib.rs
#![crate_type = "lib"]
#![crate_name = "bookmarks_api"]

// Core modules
pub mod application;
pub mod domain;
pub mod infrastructure;

// HTTP binding
pub mod api;

// Binary support
pub mod cli;
pub mod config;
pub mod exitcode;
pub mod util;
