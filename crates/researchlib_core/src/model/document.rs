//! Document domain model.
//!
//! # Responsibility
//! - Define the canonical research document shared by collections, the
//!   indexer and the catalog merger.
//! - Keep field normalization at construction and setter time.
//!
//! # Invariants
//! - `title` and `identifier` are never empty.
//! - `author` is stored in normalized `Surname, Given` form.
//! - `keywords` are lowercase, sanitized and unique, in insertion order.
//! - Every successful mutation re-stamps `last_updated` with today's date.

use crate::citation::{generate_citation, CitationMetadata, CitationResult};
use crate::model::fields::{
    generate_unique_id, normalize_author_name, sanitize_input, today_stamp, validate_isbn,
    FieldError, DOCUMENT_ID_PREFIX, NO_DATE,
};
use crate::model::record::UniversalRecord;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Validation failures for document construction and mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    EmptyTitle,
    EmptyAuthor,
    EmptyIdentifier,
    EmptyYear,
    EmptyKeyword,
    Field(FieldError),
}

impl Display for DocumentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must be a non-empty string"),
            Self::EmptyAuthor => write!(f, "author must be a non-empty string"),
            Self::EmptyIdentifier => write!(f, "identifier must be a non-empty string"),
            Self::EmptyYear => write!(f, "year must be a non-empty string"),
            Self::EmptyKeyword => write!(f, "keyword must be a non-empty string"),
            Self::Field(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DocumentError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for DocumentError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// Serialized document shape used by exports and the catalog merger.
///
/// Every field defaults when missing so that foreign catalogs with partial or
/// additive fields still deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub identifier: String,
    #[serde(default = "default_year")]
    pub year: String,
    /// Serialized as `abstract`.
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// `YYYY-MM-DD`; empty when the source catalog did not track it.
    #[serde(default)]
    pub last_updated: String,
}

fn default_year() -> String {
    NO_DATE.to_string()
}

/// Request model for creating a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDocument {
    pub title: String,
    /// Raw author name; normalized on construction.
    pub author: String,
    /// Generated as `DOC-XXXXXXXXXX` when absent or blank.
    pub identifier: Option<String>,
    /// Stored as `n.d.` when absent or blank.
    pub year: Option<String>,
    pub abstract_text: Option<String>,
    pub keywords: Vec<String>,
}

impl NewDocument {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            ..Self::default()
        }
    }

    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = Some(abstract_text.into());
        self
    }

    pub fn keywords(mut self, keywords: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }
}

/// A research document or archival item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    title: String,
    author: String,
    identifier: String,
    year: String,
    abstract_text: String,
    keywords: Vec<String>,
    last_updated: String,
}

impl Document {
    /// Creates a document with a generated identifier and no year.
    pub fn new(title: &str, author: &str) -> DocumentResult<Self> {
        Self::create(NewDocument::new(title, author))
    }

    /// Validates and normalizes a creation request.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank after sanitizing.
    /// - `EmptyAuthor` when the author is blank.
    pub fn create(request: NewDocument) -> DocumentResult<Self> {
        let title = clean_title(&request.title)?;
        if request.author.trim().is_empty() {
            return Err(DocumentError::EmptyAuthor);
        }
        let author = normalize_author_name(&request.author)?;

        let identifier = request
            .identifier
            .as_deref()
            .map(sanitize_input)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| generate_unique_id(DOCUMENT_ID_PREFIX));

        let mut keywords = Vec::new();
        for keyword in &request.keywords {
            if let Some(value) = normalize_keyword(keyword) {
                if !keywords.contains(&value) {
                    keywords.push(value);
                }
            }
        }

        Ok(Self {
            title,
            author,
            identifier,
            year: clean_year(request.year.as_deref()),
            abstract_text: request
                .abstract_text
                .as_deref()
                .map(sanitize_input)
                .unwrap_or_default(),
            keywords,
            last_updated: today_stamp(),
        })
    }

    /// Rebuilds a document from its serialized record.
    ///
    /// A non-empty `last_updated` is preserved so reconstructed documents keep
    /// their position in last-write-wins ordering.
    pub fn from_record(record: DocumentRecord) -> DocumentResult<Self> {
        let last_updated = record.last_updated.trim().to_string();
        let mut document = Self::create(NewDocument {
            title: record.title,
            author: record.author,
            identifier: Some(record.identifier),
            year: Some(record.year),
            abstract_text: Some(record.abstract_text),
            keywords: record.keywords,
        })?;
        // Why: `create` stamps today; re-stamping on every rebuild would make
        // each merge or archive load win the next last-write-wins comparison.
        if !last_updated.is_empty() {
            document.last_updated = last_updated;
        }
        Ok(document)
    }

    /// Builds a document from a normalized universal record.
    pub fn from_universal(record: UniversalRecord) -> DocumentResult<Self> {
        Self::create(NewDocument {
            title: record.title,
            author: record.author,
            identifier: Some(record.identifier),
            year: Some(record.year),
            abstract_text: Some(record.abstract_text),
            keywords: record.keywords,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) -> DocumentResult<()> {
        self.title = clean_title(title)?;
        self.touch();
        Ok(())
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn set_author(&mut self, author: &str) -> DocumentResult<()> {
        if author.trim().is_empty() {
            return Err(DocumentError::EmptyAuthor);
        }
        self.author = normalize_author_name(author)?;
        self.touch();
        Ok(())
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Replaces the identifier.
    ///
    /// Callers holding the document inside a collection must re-key it; the
    /// collection only keys by identifier at insertion time.
    pub fn set_identifier(&mut self, identifier: &str) -> DocumentResult<()> {
        let cleaned = sanitize_input(identifier);
        if cleaned.is_empty() {
            return Err(DocumentError::EmptyIdentifier);
        }
        self.identifier = cleaned;
        self.touch();
        Ok(())
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    /// Sets the publication year; `None` stores the `n.d.` sentinel.
    pub fn set_year(&mut self, year: Option<&str>) {
        self.year = clean_year(year);
        self.touch();
    }

    pub fn abstract_text(&self) -> &str {
        &self.abstract_text
    }

    pub fn set_abstract(&mut self, abstract_text: &str) {
        self.abstract_text = sanitize_input(abstract_text);
        self.touch();
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Adds one keyword, lowercased. Returns whether the set changed.
    pub fn add_keyword(&mut self, keyword: &str) -> DocumentResult<bool> {
        let value = normalize_keyword(keyword).ok_or(DocumentError::EmptyKeyword)?;
        if self.keywords.contains(&value) {
            return Ok(false);
        }
        self.keywords.push(value);
        self.touch();
        Ok(true)
    }

    /// Removes one keyword. Returns whether the set changed.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let Some(value) = normalize_keyword(keyword) else {
            return false;
        };
        let before = self.keywords.len();
        self.keywords.retain(|existing| existing != &value);
        let removed = self.keywords.len() != before;
        if removed {
            self.touch();
        }
        removed
    }

    pub fn last_updated(&self) -> &str {
        &self.last_updated
    }

    /// Whether the identifier has ISBN-10 or ISBN-13 shape.
    pub fn has_isbn_identifier(&self) -> bool {
        validate_isbn(&self.identifier).unwrap_or(false)
    }

    /// Checks that every required field is populated.
    pub fn validate(&self) -> DocumentResult<()> {
        if self.title.is_empty() {
            return Err(DocumentError::EmptyTitle);
        }
        if self.author.is_empty() {
            return Err(DocumentError::EmptyAuthor);
        }
        if self.identifier.is_empty() {
            return Err(DocumentError::EmptyIdentifier);
        }
        if self.year.is_empty() {
            return Err(DocumentError::EmptyYear);
        }
        Ok(())
    }

    /// Renders this document in the given citation style (`APA` or `MLA`).
    pub fn generate_citation(&self, style: &str) -> CitationResult<String> {
        let metadata = CitationMetadata {
            author: self.author.clone(),
            title: self.title.clone(),
            year: self.year.clone(),
        };
        generate_citation(&metadata, style)
    }

    pub fn to_record(&self) -> DocumentRecord {
        DocumentRecord {
            title: self.title.clone(),
            author: self.author.clone(),
            identifier: self.identifier.clone(),
            year: self.year.clone(),
            abstract_text: self.abstract_text.clone(),
            keywords: self.keywords.clone(),
            last_updated: self.last_updated.clone(),
        }
    }

    /// Projects this document into the universal record shape.
    pub fn to_universal_record(&self) -> UniversalRecord {
        UniversalRecord {
            title: self.title.clone(),
            author: self.author.clone(),
            year: self.year.clone(),
            identifier: self.identifier.clone(),
            keywords: self.keywords.clone(),
            abstract_text: self.abstract_text.clone(),
            last_updated: today_stamp(),
        }
    }

    fn touch(&mut self) {
        self.last_updated = today_stamp();
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} ({})", self.title, self.author, self.year)
    }
}

fn clean_title(title: &str) -> DocumentResult<String> {
    let cleaned = sanitize_input(title);
    if cleaned.is_empty() {
        return Err(DocumentError::EmptyTitle);
    }
    Ok(cleaned)
}

fn clean_year(year: Option<&str>) -> String {
    match year.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => NO_DATE.to_string(),
    }
}

fn normalize_keyword(keyword: &str) -> Option<String> {
    let cleaned = sanitize_input(keyword).to_lowercase();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
