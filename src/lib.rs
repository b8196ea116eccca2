//! Site Content Service Library
//!
//! Content for a business website, read from a hosted backend-as-a-service
//! with built-in fallback data. The main binary is in `src/main.rs`.

pub mod api;
pub mod backend;
pub mod config;
pub mod content;
pub mod diagnostics;
pub mod error;
