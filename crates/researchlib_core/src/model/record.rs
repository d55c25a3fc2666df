//! Universal record mapping for arbitrary raw metadata.
//!
//! # Responsibility
//! - Map loosely shaped JSON records from other library systems onto one
//!   normalized field set.
//!
//! # Invariants
//! - `title` and `identifier` of a mapped record are never empty.
//! - `last_updated` is stamped with today's date at mapping time.

use crate::model::fields::{
    generate_unique_id, normalize_author_name, today_stamp, FieldError, DOCUMENT_ID_PREFIX,
    NO_DATE,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

const UNKNOWN_AUTHOR: &str = "Unknown";

pub type RecordResult<T> = Result<T, RecordError>;

/// Failures while mapping a raw record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Input is not a JSON object.
    NotAMapping,
    /// Neither `title` nor `name` carries a value.
    MissingTitle,
    Field(FieldError),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAMapping => write!(f, "record must be a JSON object"),
            Self::MissingTitle => write!(f, "record must contain a valid title"),
            Self::Field(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FieldError> for RecordError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// Normalized record shape, canonical input to document construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniversalRecord {
    pub title: String,
    pub author: String,
    pub year: String,
    pub identifier: String,
    pub keywords: Vec<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub last_updated: String,
}

/// Maps an arbitrary raw record onto the universal record shape.
///
/// Field fallbacks:
/// - `title` falls back to `name`.
/// - `author` defaults to `Unknown` and is always normalized.
/// - `year` falls back to `publication_date`, then `n.d.`.
/// - `identifier` is generated when absent.
///
/// # Errors
/// - `NotAMapping` for non-object input.
/// - `MissingTitle` when neither `title` nor `name` is usable.
/// - `Field` when a present author value is blank.
pub fn generate_universal_record(record: &Value) -> RecordResult<UniversalRecord> {
    let fields = record.as_object().ok_or(RecordError::NotAMapping)?;

    let title = text_field(fields.get("title"))
        .or_else(|| text_field(fields.get("name")))
        .ok_or(RecordError::MissingTitle)?;

    let author = match fields.get("author") {
        None | Some(Value::Null) => normalize_author_name(UNKNOWN_AUTHOR)?,
        Some(value) => normalize_author_name(&text_field(Some(value)).unwrap_or_default())?,
    };

    let year = text_field(fields.get("year"))
        .or_else(|| text_field(fields.get("publication_date")))
        .unwrap_or_else(|| NO_DATE.to_string());

    let identifier = text_field(fields.get("identifier"))
        .unwrap_or_else(|| generate_unique_id(DOCUMENT_ID_PREFIX));

    let keywords = match fields.get("keywords") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| text_field(Some(item)))
            .collect(),
        Some(Value::String(single)) if !single.trim().is_empty() => vec![single.clone()],
        _ => Vec::new(),
    };

    Ok(UniversalRecord {
        title,
        author,
        year,
        identifier,
        keywords,
        abstract_text: text_field(fields.get("abstract")).unwrap_or_default(),
        last_updated: today_stamp(),
    })
}

/// Reads a string or number as trimmed text; blank values count as absent.
pub(crate) fn text_field(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_universal_record, RecordError};
    use crate::model::fields::FieldError;
    use serde_json::json;

    #[test]
    fn mapping_applies_fallbacks() {
        let record = generate_universal_record(&json!({
            "name": "Analytical Engine Notes",
            "author": "ada lovelace",
            "publication_date": 1843,
            "keywords": ["engine", 7, ""]
        }))
        .expect("record should map");

        assert_eq!(record.title, "Analytical Engine Notes");
        assert_eq!(record.author, "Lovelace, Ada");
        assert_eq!(record.year, "1843");
        assert!(record.identifier.starts_with("DOC-"));
        assert_eq!(record.keywords, vec!["engine".to_string(), "7".to_string()]);
        assert_eq!(record.abstract_text, "");
    }

    #[test]
    fn mapping_defaults_author_and_year() {
        let record = generate_universal_record(&json!({"title": "Anon", "identifier": "X-1"}))
            .expect("record should map");
        assert_eq!(record.author, "Unknown");
        assert_eq!(record.year, "n.d.");
        assert_eq!(record.identifier, "X-1");
    }

    #[test]
    fn mapping_rejects_bad_shapes() {
        assert_eq!(
            generate_universal_record(&json!(["title"])).unwrap_err(),
            RecordError::NotAMapping
        );
        assert_eq!(
            generate_universal_record(&json!({"title": "  "})).unwrap_err(),
            RecordError::MissingTitle
        );
        assert_eq!(
            generate_universal_record(&json!({"title": "T", "author": ""})).unwrap_err(),
            RecordError::Field(FieldError::EmptyAuthorName)
        );
    }
}
