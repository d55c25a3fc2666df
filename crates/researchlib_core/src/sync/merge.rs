//! Last-write-wins catalog reconciliation.
//!
//! # Responsibility
//! - Merge two independently maintained record lists keyed by identifier.
//!
//! # Invariants
//! - Entries present on only one side always survive.
//! - On collision, remote wins only with a strictly newer `last_updated`;
//!   ties keep the earlier entry.
//! - Remote entries whose key is blank are dropped.
//! - Output keeps local order first, then remote-only entries in remote order.

use crate::model::document::DocumentRecord;
use crate::model::fields::sanitize_input;
use indexmap::map::Entry;
use indexmap::IndexMap;
use log::debug;
use std::borrow::Cow;

/// Timestamp assumed for records that never tracked modification time.
pub const EPOCH_STAMP: &str = "1970-01-01";

/// A record that can take part in catalog reconciliation.
///
/// `merge_key` must already be in the form the record's owner stores, so a
/// merged record never changes key when it is rebuilt. `last_updated` must
/// be a `YYYY-MM-DD` string so that lexicographic order equals chronological
/// order.
pub trait MergeRecord {
    fn merge_key(&self) -> Cow<'_, str>;
    fn last_updated(&self) -> &str;
}

impl MergeRecord for DocumentRecord {
    /// Identifier after the same sanitizing `Document` applies.
    fn merge_key(&self) -> Cow<'_, str> {
        let key = sanitize_input(&self.identifier);
        if key == self.identifier {
            Cow::Borrowed(&self.identifier)
        } else {
            Cow::Owned(key)
        }
    }

    fn last_updated(&self) -> &str {
        &self.last_updated
    }
}

/// Counters describing one merge run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Distinct local entries that survived unchanged.
    pub kept_local: usize,
    /// Distinct local entries replaced by a newer remote entry.
    pub replaced: usize,
    /// Distinct remote-only keys added to the output.
    pub appended: usize,
    /// Remote entries that lost to a newer remote entry with the same key.
    pub superseded: usize,
    /// Remote entries without a usable key.
    pub dropped: usize,
}

/// Merges `remote` into `local` with last-write-wins conflict resolution.
pub fn merge_databases<T: MergeRecord>(local: Vec<T>, remote: Vec<T>) -> Vec<T> {
    merge_with_stats(local, remote).0
}

/// Same as [`merge_databases`], also returning per-run counters.
pub fn merge_with_stats<T: MergeRecord>(local: Vec<T>, remote: Vec<T>) -> (Vec<T>, MergeStats) {
    let mut stats = MergeStats::default();
    let mut merged: IndexMap<String, T> = IndexMap::with_capacity(local.len() + remote.len());

    for item in local {
        let key = item.merge_key().into_owned();
        merged.insert(key, item);
    }
    // Slots below this index hold local entries; later slots came from remote.
    let local_len = merged.len();
    let mut local_replaced = vec![false; local_len];

    for item in remote {
        let key = item.merge_key().into_owned();
        if key.is_empty() {
            stats.dropped += 1;
            continue;
        }

        match merged.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(item);
                stats.appended += 1;
            }
            Entry::Occupied(mut slot) => {
                let position = slot.index();
                let holds_remote = local_replaced.get(position).copied().unwrap_or(true);
                let current_time = effective_stamp(slot.get().last_updated());
                let remote_time = effective_stamp(item.last_updated());

                if remote_time > current_time {
                    slot.insert(item);
                    if let Some(replaced) = local_replaced.get_mut(position) {
                        *replaced = true;
                    }
                }
                // Two remote entries met; whichever lost is discarded.
                if holds_remote {
                    stats.superseded += 1;
                }
            }
        }
    }
    stats.replaced = local_replaced.iter().filter(|replaced| **replaced).count();
    stats.kept_local = local_len - stats.replaced;

    debug!(
        "event=catalog_merge module=sync status=ok kept_local={} replaced={} appended={} superseded={} dropped={}",
        stats.kept_local, stats.replaced, stats.appended, stats.superseded, stats.dropped
    );

    (merged.into_values().collect(), stats)
}

fn effective_stamp(value: &str) -> &str {
    if value.is_empty() {
        EPOCH_STAMP
    } else {
        value
    }
}
