//! Research record domain model.
//!
//! # Responsibility
//! - Define authors, documents, collections and members.
//! - Own field normalization so every record enters the system canonical.
//!
//! # Invariants
//! - Documents are identified by a non-empty identifier, unique within a
//!   collection.
//! - Mutations re-stamp `last_updated`, which drives catalog reconciliation.

pub mod author;
pub mod collection;
pub mod document;
pub mod fields;
pub mod member;
pub mod record;
