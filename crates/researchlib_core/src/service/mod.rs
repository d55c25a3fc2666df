//! Core use-case services.
//!
//! # Responsibility
//! - Coordinate collections, indexing and bulk import/export behind one
//!   facade so callers never touch the index cache directly.

pub mod archive_service;
