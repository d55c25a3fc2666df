//! Catalog reconciliation between independently maintained record lists.
//!
//! No network protocol lives here; callers bring both sides in memory.

pub mod merge;
