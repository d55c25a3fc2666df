//! Named document collection.
//!
//! # Responsibility
//! - Hold documents keyed by identifier in insertion order.
//! - Provide search, export and last-write-wins merge at collection level.
//!
//! # Invariants
//! - Identifiers are unique within one collection.
//! - `merge_with` replaces the whole membership with the merge result; the
//!   new membership is fully built before the old one is dropped.

use crate::model::document::{Document, DocumentError, DocumentRecord};
use crate::model::fields::{sanitize_input, today_stamp};
use crate::search::text::search_records;
use crate::store::{write_json, StoreError};
use crate::sync::merge::merge_databases;
use indexmap::IndexMap;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type CollectionResult<T> = Result<T, CollectionError>;

#[derive(Debug)]
pub enum CollectionError {
    EmptyName,
    /// A merged record could not be rebuilt into a document.
    Document(DocumentError),
    Store(StoreError),
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "collection name must be a non-empty string"),
            Self::Document(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CollectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyName => None,
            Self::Document(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<DocumentError> for CollectionError {
    fn from(value: DocumentError) -> Self {
        Self::Document(value)
    }
}

impl From<StoreError> for CollectionError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Export snapshot of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionExport {
    pub collection: String,
    pub description: String,
    pub created: String,
    pub documents: Vec<DocumentRecord>,
}

/// A named collection of documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    name: String,
    description: String,
    created: String,
    documents: IndexMap<String, Document>,
}

impl Collection {
    /// Creates an empty collection stamped with today's date.
    ///
    /// # Errors
    /// - `EmptyName` when the name is blank after sanitizing.
    pub fn new(name: &str, description: Option<&str>) -> CollectionResult<Self> {
        let name = sanitize_input(name);
        if name.is_empty() {
            return Err(CollectionError::EmptyName);
        }
        Ok(Self {
            name,
            description: description.map(sanitize_input).unwrap_or_default(),
            created: today_stamp(),
            documents: IndexMap::new(),
        })
    }

    /// Overrides the creation date, used when restoring exported collections.
    pub(crate) fn with_created(mut self, created: &str) -> Self {
        let created = created.trim();
        if !created.is_empty() {
            self.created = created.to_string();
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created(&self) -> &str {
        &self.created
    }

    pub fn size(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Adds a document, replacing (in place) any document with the same
    /// identifier. Returns the replaced document.
    pub fn add_document(&mut self, document: Document) -> Option<Document> {
        self.documents
            .insert(document.identifier().to_string(), document)
    }

    /// Removes a document by identifier, keeping the order of the rest.
    pub fn remove_document(&mut self, identifier: &str) -> Option<Document> {
        self.documents.shift_remove(identifier)
    }

    /// Documents in insertion order.
    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub fn list_documents(&self) -> Vec<&Document> {
        self.documents.values().collect()
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Option<&Document> {
        self.documents.get(identifier)
    }

    pub fn find_by_identifier_mut(&mut self, identifier: &str) -> Option<&mut Document> {
        self.documents.get_mut(identifier)
    }

    /// Substring search over the given record fields (title, author,
    /// abstract and keywords when `fields` is `None`).
    pub fn search(&self, query: &str, fields: Option<&[&str]>) -> Vec<&Document> {
        let records = self.to_records();
        search_records(query, &records, fields)
            .into_iter()
            .filter_map(|record| self.documents.get(record.identifier.as_str()))
            .collect()
    }

    pub fn to_records(&self) -> Vec<DocumentRecord> {
        self.documents.values().map(Document::to_record).collect()
    }

    pub fn export_snapshot(&self) -> CollectionExport {
        CollectionExport {
            collection: self.name.clone(),
            description: self.description.clone(),
            created: self.created.clone(),
            documents: self.to_records(),
        }
    }

    /// Writes the export snapshot to `path` as pretty-printed JSON.
    pub fn export(&self, path: impl AsRef<Path>) -> CollectionResult<()> {
        write_json(&self.export_snapshot(), path)?;
        Ok(())
    }

    /// Merges another collection into this one, last write wins.
    pub fn merge_with(&mut self, other: &Collection) -> CollectionResult<()> {
        self.merge_records(other.to_records())
    }

    /// Merges remote records into this collection and replaces the membership
    /// with the merge result.
    ///
    /// Remote records whose identifier is blank after sanitizing are dropped.
    pub fn merge_records(&mut self, remote: Vec<DocumentRecord>) -> CollectionResult<()> {
        let before = self.documents.len();
        let merged = merge_databases(self.to_records(), remote);

        // Why: merge keys are sanitized exactly like `Document` identifiers, so
        // the rebuild below keeps every key and never generates a fresh one.
        let mut rebuilt = IndexMap::with_capacity(merged.len());
        for record in merged {
            let document = Document::from_record(record)?;
            rebuilt.insert(document.identifier().to_string(), document);
        }
        self.documents = rebuilt;

        info!(
            "event=collection_merge module=model status=ok before={} after={}",
            before,
            self.documents.len()
        );
        Ok(())
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Collection: {} ({} documents)", self.name, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::{Collection, CollectionError};
    use crate::model::document::{Document, NewDocument};

    fn doc(id: &str, title: &str) -> Document {
        Document::create(NewDocument::new(title, "John Smith").identifier(id))
            .expect("fixture document should build")
    }

    #[test]
    fn new_rejects_blank_name() {
        assert!(matches!(
            Collection::new("<>", None),
            Err(CollectionError::EmptyName)
        ));
    }

    #[test]
    fn add_replaces_in_place_and_remove_keeps_order() {
        let mut collection = Collection::new("Medieval Manuscripts", None).expect("valid name");
        assert!(collection.add_document(doc("A", "First")).is_none());
        collection.add_document(doc("B", "Second"));
        collection.add_document(doc("C", "Third"));

        let replaced = collection.add_document(doc("A", "First, revised"));
        assert_eq!(replaced.map(|d| d.title().to_string()), Some("First".to_string()));

        let ids = collection
            .documents()
            .map(Document::identifier)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["A", "B", "C"]);

        assert!(collection.remove_document("B").is_some());
        assert!(collection.remove_document("B").is_none());
        let ids = collection
            .documents()
            .map(Document::identifier)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(collection.to_string(), "Collection: Medieval Manuscripts (2 documents)");
    }

    #[test]
    fn search_returns_documents_in_collection_order() {
        let mut collection = Collection::new("Test", None).expect("valid name");
        collection.add_document(doc("ID-2", "Blue guide"));
        collection.add_document(doc("ID-1", "The Blue Book"));
        collection.add_document(doc("ID-3", "Red guide"));

        let ids = collection
            .search("blue", None)
            .into_iter()
            .map(Document::identifier)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["ID-2", "ID-1"]);
    }
}
