//! Search entry points.
//!
//! # Responsibility
//! - Build and query inverted keyword indexes (`keyword_index`).
//! - Provide substring matching over serialized records (`text`).

pub mod keyword_index;
pub mod text;
