//! Style-selecting citation formatter.
//!
//! # Invariants
//! - Only APA and MLA are supported; any other style is an error, never a
//!   silent fallback.
//! - Input fields are rendered verbatim; callers pass normalized metadata.

use crate::citation::{CitationError, CitationResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CitationStyle {
    #[serde(rename = "APA")]
    Apa,
    #[serde(rename = "MLA")]
    Mla,
}

impl CitationStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apa => "APA",
            Self::Mla => "MLA",
        }
    }
}

impl Display for CitationStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CitationStyle {
    type Err = CitationError;

    /// Style names match case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "APA" => Ok(Self::Apa),
            "MLA" => Ok(Self::Mla),
            _ => Err(CitationError::UnsupportedStyle(value.to_string())),
        }
    }
}

/// Normalized metadata consumed by [`generate_citation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CitationMetadata {
    pub author: String,
    pub title: String,
    pub year: String,
}

/// Renders `metadata` in the named style.
///
/// - APA: `{author} ({year}). {title}.`
/// - MLA: `{author}. "{title}." {year}.`
///
/// # Errors
/// - `UnsupportedStyle` for anything other than APA or MLA.
pub fn generate_citation(metadata: &CitationMetadata, style: &str) -> CitationResult<String> {
    Ok(format_citation(metadata, style.parse()?))
}

/// Renders `metadata` in an already-resolved style.
pub fn format_citation(metadata: &CitationMetadata, style: CitationStyle) -> String {
    let CitationMetadata {
        author,
        title,
        year,
    } = metadata;
    match style {
        CitationStyle::Apa => format!("{author} ({year}). {title}."),
        CitationStyle::Mla => format!("{author}. \"{title}.\" {year}."),
    }
}

#[cfg(test)]
mod tests {
    use super::{generate_citation, CitationMetadata, CitationStyle};
    use crate::citation::CitationError;

    fn metadata() -> CitationMetadata {
        CitationMetadata {
            author: "Doe, Jane".to_string(),
            title: "Test Title".to_string(),
            year: "2023".to_string(),
        }
    }

    #[test]
    fn apa_and_mla_shapes() {
        assert_eq!(
            generate_citation(&metadata(), "APA").expect("APA is supported"),
            "Doe, Jane (2023). Test Title."
        );
        assert_eq!(
            generate_citation(&metadata(), "MLA").expect("MLA is supported"),
            "Doe, Jane. \"Test Title.\" 2023."
        );
    }

    #[test]
    fn style_names_are_case_insensitive() {
        assert_eq!("mla".parse::<CitationStyle>().expect("mla parses"), CitationStyle::Mla);
    }

    #[test]
    fn unknown_style_is_rejected() {
        let err = generate_citation(&metadata(), "CHICAGO").unwrap_err();
        assert_eq!(err, CitationError::UnsupportedStyle("CHICAGO".to_string()));
    }
}
