//! Archive coordinator over named collections.
//!
//! # Responsibility
//! - Own collections by unique name.
//! - Maintain a lazily rebuilt global keyword index.
//! - Provide bulk import, whole-archive export/load and cross-collection merge.
//!
//! # Invariants
//! - Collection names are unique within one archive.
//! - Every membership-changing operation clears the cached index before it
//!   returns, including failed bulk imports.
//! - Bulk import is not transactional: records before a failing record stay
//!   applied.
//! - All mutation goes through `&mut self`; hosts sharing an archive across
//!   threads must serialize access externally (e.g. `Mutex<ArchiveManager>`).

use crate::model::collection::{Collection, CollectionError};
use crate::model::document::{Document, DocumentError, DocumentRecord};
use crate::model::fields::{sanitize_input, today_stamp};
use crate::model::record::{generate_universal_record, RecordError};
use crate::search::keyword_index::KeywordIndex;
use crate::store::{read_json, write_json, StoreError};
use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type ArchiveResult<T> = Result<T, ArchiveError>;

#[derive(Debug)]
pub enum ArchiveError {
    DuplicateCollection(String),
    CollectionNotFound(String),
    /// Raw record at `position` could not be mapped.
    Record {
        position: usize,
        source: RecordError,
    },
    /// Mapped record at `position` failed document validation.
    InvalidDocument {
        position: usize,
        source: DocumentError,
    },
    Collection(CollectionError),
    Store(StoreError),
}

impl Display for ArchiveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateCollection(name) => {
                write!(f, "a collection named `{name}` already exists")
            }
            Self::CollectionNotFound(name) => write!(f, "collection not found: `{name}`"),
            Self::Record { position, source } => {
                write!(f, "record #{position} could not be imported: {source}")
            }
            Self::InvalidDocument { position, source } => {
                write!(f, "record #{position} is not a valid document: {source}")
            }
            Self::Collection(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ArchiveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DuplicateCollection(_) | Self::CollectionNotFound(_) => None,
            Self::Record { source, .. } => Some(source),
            Self::InvalidDocument { source, .. } => Some(source),
            Self::Collection(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<CollectionError> for ArchiveError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

impl From<StoreError> for ArchiveError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// One collection inside an archive export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchivedCollection {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub documents: Vec<DocumentRecord>,
}

/// Whole-archive export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveExport {
    pub exported_at: String,
    pub collections: IndexMap<String, ArchivedCollection>,
}

/// Facade coordinating collections, the global index and bulk operations.
#[derive(Debug, Default)]
pub struct ArchiveManager {
    collections: IndexMap<String, Collection>,
    global_index: Option<KeywordIndex>,
}

impl ArchiveManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a collection under its name.
    ///
    /// # Errors
    /// - `DuplicateCollection` when the name is already taken.
    pub fn add_collection(&mut self, collection: Collection) -> ArchiveResult<()> {
        if self.collections.contains_key(collection.name()) {
            return Err(ArchiveError::DuplicateCollection(
                collection.name().to_string(),
            ));
        }
        self.collections
            .insert(collection.name().to_string(), collection);
        self.invalidate_index();
        Ok(())
    }

    /// Removes and returns a collection; `None` when it does not exist.
    pub fn remove_collection(&mut self, name: &str) -> Option<Collection> {
        let removed = self.collections.shift_remove(name);
        if removed.is_some() {
            self.invalidate_index();
        }
        removed
    }

    /// Collection names in registration order.
    pub fn list_collections(&self) -> Vec<&str> {
        self.collections.keys().map(String::as_str).collect()
    }

    pub fn get_collection(&self, name: &str) -> Option<&Collection> {
        self.collections.get(name)
    }

    /// Mutable access to one collection.
    ///
    /// The cached index is cleared up front since the caller may change
    /// membership through the returned reference.
    pub fn collection_mut(&mut self, name: &str) -> Option<&mut Collection> {
        let collection = self.collections.get_mut(name)?;
        self.global_index = None;
        Some(collection)
    }

    /// First document with `identifier`, searching collections in order.
    pub fn find_document(&self, identifier: &str) -> Option<&Document> {
        self.collections
            .values()
            .find_map(|collection| collection.find_by_identifier(identifier))
    }

    /// Rebuilds the global index from every collection and caches it.
    pub fn build_global_index(&mut self) -> &KeywordIndex {
        let index = KeywordIndex::from_documents(
            self.collections
                .values()
                .flat_map(|collection| collection.documents()),
        );
        info!(
            "event=global_index_build module=service status=ok collections={} terms={}",
            self.collections.len(),
            index.len()
        );
        self.global_index.insert(index)
    }

    /// Returns the cached global index, rebuilding it when stale.
    pub fn global_index(&mut self) -> &KeywordIndex {
        if self.global_index.is_none() {
            self.build_global_index();
        }
        self.global_index.get_or_insert_with(KeywordIndex::default)
    }

    pub fn is_index_cached(&self) -> bool {
        self.global_index.is_some()
    }

    /// Imports raw records into `collection_name`, creating it if missing.
    ///
    /// Each record goes through the universal-record mapping. Returns the
    /// number of imported documents.
    ///
    /// # Errors
    /// - `Record` / `InvalidDocument` for the first failing record; earlier
    ///   records remain imported.
    pub fn import_records(&mut self, records: &[Value], collection_name: &str) -> ArchiveResult<usize> {
        let name = sanitize_input(collection_name);
        if !self.collections.contains_key(name.as_str()) {
            let collection = Collection::new(&name, None)?;
            self.collections.insert(name.clone(), collection);
        }
        // Why: the import is not atomic; clearing first means a failure midway
        // never leaves a cached index that misses the records already added.
        self.invalidate_index();

        let collection = self
            .collections
            .get_mut(name.as_str())
            .ok_or_else(|| ArchiveError::CollectionNotFound(name.clone()))?;

        for (position, raw) in records.iter().enumerate() {
            let document = generate_universal_record(raw)
                .map_err(|source| ArchiveError::Record { position, source })
                .and_then(|record| {
                    Document::from_universal(record)
                        .map_err(|source| ArchiveError::InvalidDocument { position, source })
                });

            match document {
                Ok(document) => {
                    collection.add_document(document);
                }
                Err(err) => {
                    warn!(
                        "event=records_import module=service status=error failed_at={} collection_size={}",
                        position,
                        collection.size()
                    );
                    return Err(err);
                }
            }
        }

        info!(
            "event=records_import module=service status=ok imported={} collection_size={}",
            records.len(),
            collection.size()
        );
        Ok(records.len())
    }

    /// Export snapshot of every collection and its documents.
    pub fn archive_snapshot(&self) -> ArchiveExport {
        ArchiveExport {
            exported_at: today_stamp(),
            collections: self
                .collections
                .iter()
                .map(|(name, collection)| {
                    (
                        name.clone(),
                        ArchivedCollection {
                            description: collection.description().to_string(),
                            created: collection.created().to_string(),
                            documents: collection.to_records(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Writes the archive snapshot to `path` as pretty-printed JSON.
    pub fn export_archive(&self, path: impl AsRef<Path>) -> ArchiveResult<()> {
        write_json(&self.archive_snapshot(), path)?;
        Ok(())
    }

    /// Rebuilds an archive from a file written by [`Self::export_archive`].
    ///
    /// Documents keep their identifiers and `last_updated` stamps.
    pub fn load_archive(path: impl AsRef<Path>) -> ArchiveResult<Self> {
        let export: ArchiveExport = read_json(path)?;
        Self::from_snapshot(export)
    }

    /// Rebuilds an archive from an in-memory export snapshot.
    pub fn from_snapshot(export: ArchiveExport) -> ArchiveResult<Self> {
        let mut archive = Self::new();
        for (name, archived) in export.collections {
            let mut collection = Collection::new(&name, Some(archived.description.as_str()))?
                .with_created(&archived.created);
            for (position, record) in archived.documents.into_iter().enumerate() {
                let document = Document::from_record(record)
                    .map_err(|source| ArchiveError::InvalidDocument { position, source })?;
                collection.add_document(document);
            }
            archive.add_collection(collection)?;
        }
        info!(
            "event=archive_load module=service status=ok collections={}",
            archive.collections.len()
        );
        Ok(archive)
    }

    /// Merges `source` into `target` with last-write-wins semantics.
    ///
    /// # Errors
    /// - `CollectionNotFound` when either name is unknown; nothing changes.
    pub fn merge_collections(&mut self, target: &str, source: &str) -> ArchiveResult<()> {
        let remote = self
            .collections
            .get(source)
            .ok_or_else(|| ArchiveError::CollectionNotFound(source.to_string()))?
            .to_records();
        let target_collection = self
            .collections
            .get_mut(target)
            .ok_or_else(|| ArchiveError::CollectionNotFound(target.to_string()))?;

        self.global_index = None;
        target_collection.merge_records(remote)?;
        Ok(())
    }

    fn invalidate_index(&mut self) {
        self.global_index = None;
    }
}

impl Display for ArchiveManager {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ArchiveManager({} collections)", self.collections.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{ArchiveError, ArchiveManager};
    use crate::model::collection::Collection;
    use serde_json::json;

    #[test]
    fn duplicate_collection_names_are_rejected() {
        let mut archive = ArchiveManager::new();
        archive
            .add_collection(Collection::new("Main", None).expect("valid name"))
            .expect("first add should succeed");
        let err = archive
            .add_collection(Collection::new("Main", None).expect("valid name"))
            .unwrap_err();
        assert!(matches!(err, ArchiveError::DuplicateCollection(name) if name == "Main"));
        assert_eq!(archive.list_collections(), vec!["Main"]);
    }

    #[test]
    fn index_cache_is_lazy_and_cleared_by_mutation() {
        let mut archive = ArchiveManager::new();
        archive
            .import_records(&[json!({"title": "Blue Book", "identifier": "ID-1"})], "Main")
            .expect("import should succeed");
        assert!(!archive.is_index_cached());

        assert_eq!(
            archive
                .global_index()
                .search_keyword("blue")
                .expect("keyword is valid"),
            ["ID-1".to_string()]
        );
        assert!(archive.is_index_cached());

        archive.collection_mut("Main").expect("collection exists");
        assert!(!archive.is_index_cached());

        archive.build_global_index();
        assert!(archive.remove_collection("Missing").is_none());
        assert!(archive.is_index_cached());
        assert!(archive.remove_collection("Main").is_some());
        assert!(!archive.is_index_cached());
    }

    #[test]
    fn merge_requires_both_collections() {
        let mut archive = ArchiveManager::new();
        archive
            .add_collection(Collection::new("Main", None).expect("valid name"))
            .expect("add should succeed");
        let err = archive.merge_collections("Main", "Other").unwrap_err();
        assert!(matches!(err, ArchiveError::CollectionNotFound(name) if name == "Other"));
        let err = archive.merge_collections("Other", "Main").unwrap_err();
        assert!(matches!(err, ArchiveError::CollectionNotFound(name) if name == "Other"));
    }
}
