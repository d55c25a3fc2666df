//! Author value type.
//!
//! # Invariants
//! - `name` is always stored in normalized `Surname, Given` form.
//! - `orcid` is sanitized and `None` when blank.

use crate::model::fields::{normalize_author_name, sanitize_input, FieldResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A document author with an optional external identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    name: String,
    orcid: Option<String>,
}

/// Serialized author shape (`{name, orcid}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRecord {
    pub name: String,
    pub orcid: Option<String>,
}

impl Author {
    /// Creates an author, normalizing the name.
    ///
    /// # Errors
    /// - Returns a field error when `name` is blank.
    pub fn new(name: &str, orcid: Option<&str>) -> FieldResult<Self> {
        Ok(Self {
            name: normalize_author_name(name)?,
            orcid: clean_orcid(orcid),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the name after normalizing it.
    pub fn set_name(&mut self, name: &str) -> FieldResult<()> {
        self.name = normalize_author_name(name)?;
        Ok(())
    }

    pub fn orcid(&self) -> Option<&str> {
        self.orcid.as_deref()
    }

    pub fn set_orcid(&mut self, orcid: Option<&str>) {
        self.orcid = clean_orcid(orcid);
    }

    pub fn to_record(&self) -> AuthorRecord {
        AuthorRecord {
            name: self.name.clone(),
            orcid: self.orcid.clone(),
        }
    }
}

impl Display for Author {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Author: {}", self.name)
    }
}

fn clean_orcid(orcid: Option<&str>) -> Option<String> {
    orcid.map(sanitize_input).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::Author;

    #[test]
    fn author_normalizes_name_and_drops_blank_orcid() {
        let author = Author::new("jane doe", Some("  ")).expect("author should build");
        assert_eq!(author.name(), "Doe, Jane");
        assert_eq!(author.orcid(), None);
        assert_eq!(author.to_string(), "Author: Doe, Jane");
    }

    #[test]
    fn author_setters_keep_invariants() {
        let mut author = Author::new("Ada Lovelace", None).expect("author should build");
        author.set_orcid(Some("<0000-0002-1825-0097>"));
        assert_eq!(author.orcid(), Some("0000-0002-1825-0097"));

        assert!(author.set_name("").is_err());
        assert_eq!(author.name(), "Lovelace, Ada");

        author.set_name("charles babbage").expect("rename should succeed");
        assert_eq!(author.to_record().name, "Babbage, Charles");
    }
}
