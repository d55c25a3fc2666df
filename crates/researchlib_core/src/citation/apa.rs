//! Structured APA reference generator.
//!
//! # Responsibility
//! - Accept raw metadata (un-normalized author list, year, title, publisher,
//!   optional DOI) and assemble one APA reference string.
//!
//! # Invariants
//! - Non-object metadata is rejected when the generator is built.
//! - Authors render as `Surname, I.`; the final pair joins with `, & `.
//! - Segments are separated by exactly one space; the DOI is never altered.

use crate::citation::{CitationError, CitationResult, CitationStyle};
use crate::model::fields::{normalize_author_name, NO_DATE};
use crate::model::record::text_field;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// Parsed generator input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApaMetadata {
    /// Raw author names, e.g. `Jane Doe`.
    #[serde(default)]
    pub authors: Vec<String>,
    pub year: Option<String>,
    pub title: Option<String>,
    pub publisher: Option<String>,
    pub doi: Option<String>,
}

/// Generator output: `{style: "APA", citation}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApaCitation {
    pub style: CitationStyle,
    pub citation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApaCitationGenerator {
    metadata: ApaMetadata,
}

impl ApaCitationGenerator {
    /// Builds a generator from a JSON metadata object.
    ///
    /// # Errors
    /// - `MetadataNotMapping` when `metadata` is not an object.
    /// - `InvalidField` when a field is neither text, number nor null, or when
    ///   `authors` holds non-text entries.
    pub fn new(metadata: &Value) -> CitationResult<Self> {
        let fields = metadata
            .as_object()
            .ok_or(CitationError::MetadataNotMapping)?;

        Ok(Self::from_metadata(ApaMetadata {
            authors: parse_authors(fields.get("authors"))?,
            year: optional_text(fields, "year")?,
            title: optional_text(fields, "title")?,
            publisher: optional_text(fields, "publisher")?,
            doi: optional_text(fields, "doi")?,
        }))
    }

    pub fn from_metadata(metadata: ApaMetadata) -> Self {
        Self { metadata }
    }

    pub fn metadata(&self) -> &ApaMetadata {
        &self.metadata
    }

    /// Assembles the reference string.
    pub fn generate(&self) -> ApaCitation {
        let authors = self
            .metadata
            .authors
            .iter()
            .filter_map(|name| format_author(name))
            .collect::<Vec<_>>();

        let mut segments = vec![
            join_authors(&authors),
            format!(
                "({}).",
                self.metadata.year.as_deref().unwrap_or(NO_DATE)
            ),
        ];
        if let Some(title) = non_blank(self.metadata.title.as_deref()) {
            segments.push(with_period(&sentence_case(title)));
        }
        if let Some(publisher) = non_blank(self.metadata.publisher.as_deref()) {
            segments.push(with_period(publisher));
        }
        if let Some(doi) = non_blank(self.metadata.doi.as_deref()) {
            segments.push(doi.to_string());
        }

        ApaCitation {
            style: CitationStyle::Apa,
            citation: segments.join(" "),
        }
    }
}

/// One-shot helper: `ApaCitationGenerator::new(metadata)?.generate()`.
pub fn apa_generate(metadata: &Value) -> CitationResult<ApaCitation> {
    Ok(ApaCitationGenerator::new(metadata)?.generate())
}

fn parse_authors(value: Option<&Value>) -> CitationResult<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(name)) => Ok(vec![name.clone()]),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(name) => Ok(name.clone()),
                other => Err(CitationError::InvalidField {
                    field: "authors",
                    message: format!("expected author name string, got `{other}`"),
                }),
            })
            .collect(),
        Some(other) => Err(CitationError::InvalidField {
            field: "authors",
            message: format!("expected list of names, got `{other}`"),
        }),
    }
}

fn optional_text(fields: &Map<String, Value>, field: &'static str) -> CitationResult<Option<String>> {
    match fields.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ (Value::String(_) | Value::Number(_))) => Ok(text_field(Some(value))),
        Some(other) => Err(CitationError::InvalidField {
            field,
            message: format!("expected text or number, got `{other}`"),
        }),
    }
}

/// `Jane Doe` -> `Doe, J.`; single-token names keep only the surname.
fn format_author(name: &str) -> Option<String> {
    let normalized = normalize_author_name(name).ok()?;
    let Some((surname, given)) = normalized.split_once(", ") else {
        return Some(normalized);
    };
    match given.chars().next() {
        Some(initial) => Some(format!("{surname}, {initial}.")),
        None => Some(surname.to_string()),
    }
}

fn join_authors(authors: &[String]) -> String {
    match authors {
        [] => UNKNOWN_AUTHOR.to_string(),
        [only] => only.clone(),
        [head @ .., last] => format!("{}, & {last}", head.join(", ")),
    }
}

fn sentence_case(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn with_period(value: &str) -> String {
    let value = value.trim();
    if value.ends_with('.') {
        value.to_string()
    } else {
        format!("{value}.")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
