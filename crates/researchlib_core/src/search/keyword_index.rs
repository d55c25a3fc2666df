//! Inverted keyword index over document titles and abstracts.
//!
//! # Responsibility
//! - Build keyword -> identifier posting lists from a document set.
//! - Answer exact-token, case-insensitive keyword lookups.
//!
//! # Invariants
//! - Tokens are runs of at least three ASCII lowercase letters between word
//!   boundaries; no stopwords, no stemming.
//! - One document contributes at most one posting per token.
//! - Posting-list order follows first encounter across the input; duplicated
//!   input documents yield duplicated postings.
//! - An index is a snapshot and never observes later document changes.

use crate::model::collection::Collection;
use crate::model::document::{Document, DocumentRecord};
use indexmap::{IndexMap, IndexSet};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-z]{3,}\b").expect("valid token regex"));

pub type IndexResult<T> = Result<T, IndexError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Lookup keyword is blank.
    EmptyKeyword,
}

impl Display for IndexError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKeyword => write!(f, "keyword must be a non-empty string"),
        }
    }
}

impl Error for IndexError {}

/// Fields the indexer reads from a document-like value.
pub trait IndexSource {
    fn index_identifier(&self) -> &str;
    fn index_title(&self) -> &str;
    fn index_abstract(&self) -> &str;
}

impl IndexSource for Document {
    fn index_identifier(&self) -> &str {
        self.identifier()
    }

    fn index_title(&self) -> &str {
        self.title()
    }

    fn index_abstract(&self) -> &str {
        self.abstract_text()
    }
}

impl IndexSource for DocumentRecord {
    fn index_identifier(&self) -> &str {
        &self.identifier
    }

    fn index_title(&self) -> &str {
        &self.title
    }

    fn index_abstract(&self) -> &str {
        &self.abstract_text
    }
}

/// Builds keyword -> identifier posting lists.
pub fn index_by_keyword<'a, T, I>(documents: I) -> IndexMap<String, Vec<String>>
where
    T: IndexSource + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut index: IndexMap<String, Vec<String>> = IndexMap::new();
    let mut document_count = 0_usize;

    for document in documents {
        document_count += 1;
        let text = format!(
            "{} {}",
            document.index_title(),
            document.index_abstract()
        )
        .to_lowercase();

        let tokens = TOKEN_RE
            .find_iter(&text)
            .map(|m| m.as_str())
            .collect::<IndexSet<_>>();

        for token in tokens {
            index
                .entry(token.to_string())
                .or_default()
                .push(document.index_identifier().to_string());
        }
    }

    debug!(
        "event=index_build module=search status=ok documents={} terms={}",
        document_count,
        index.len()
    );
    index
}

/// Queryable snapshot of a keyword index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordIndex {
    index: IndexMap<String, Vec<String>>,
}

impl KeywordIndex {
    pub fn new(index: IndexMap<String, Vec<String>>) -> Self {
        Self { index }
    }

    pub fn from_documents<'a, T, I>(documents: I) -> Self
    where
        T: IndexSource + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::new(index_by_keyword(documents))
    }

    pub fn from_collection(collection: &Collection) -> Self {
        Self::from_documents(collection.documents())
    }

    /// Returns identifiers indexed under `keyword`, or an empty slice.
    ///
    /// # Errors
    /// - `EmptyKeyword` when `keyword` is blank.
    pub fn search_keyword(&self, keyword: &str) -> IndexResult<&[String]> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(IndexError::EmptyKeyword);
        }
        Ok(self
            .index
            .get(keyword.to_lowercase().as_str())
            .map(Vec::as_slice)
            .unwrap_or_default())
    }

    pub fn as_map(&self) -> &IndexMap<String, Vec<String>> {
        &self.index
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl Display for KeywordIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeywordIndex({} terms)", self.index.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{index_by_keyword, IndexError, KeywordIndex};
    use crate::model::document::{Document, NewDocument};

    fn doc(id: &str, title: &str, abstract_text: &str) -> Document {
        Document::create(
            NewDocument::new(title, "Alice Archer")
                .identifier(id)
                .abstract_text(abstract_text),
        )
        .expect("fixture document should build")
    }

    #[test]
    fn tokens_need_three_letters_and_word_boundaries() {
        let docs = vec![doc("ID-1", "An AI of 3D art", "abc123 x-ray blue")];
        let index = index_by_keyword(&docs);
        let terms = index.keys().map(String::as_str).collect::<Vec<_>>();
        assert_eq!(terms, vec!["art", "ray", "blue"]);
    }

    #[test]
    fn tokens_deduplicate_within_one_document() {
        let docs = vec![doc("ID-1", "Blue blue BLUE", "blue book")];
        let index = index_by_keyword(&docs);
        assert_eq!(index["blue"], vec!["ID-1".to_string()]);
        assert_eq!(index["book"], vec!["ID-1".to_string()]);
    }

    #[test]
    fn duplicated_input_yields_duplicated_postings() {
        let first = doc("ID-1", "Red guide", "");
        let docs = vec![first.clone(), doc("ID-2", "Red book", ""), first];
        let index = KeywordIndex::from_documents(&docs);
        assert_eq!(
            index.search_keyword("RED").expect("keyword is valid"),
            ["ID-1".to_string(), "ID-2".to_string(), "ID-1".to_string()]
        );
    }

    #[test]
    fn lookup_is_exact_and_rejects_blank() {
        let docs = vec![doc("ID-1", "Cooking guide", "")];
        let index = KeywordIndex::from_documents(&docs);
        assert!(index
            .search_keyword("cook")
            .expect("keyword is valid")
            .is_empty());
        assert_eq!(index.search_keyword(" ").unwrap_err(), IndexError::EmptyKeyword);
        assert_eq!(index.to_string(), "KeywordIndex(2 terms)");
    }
}
