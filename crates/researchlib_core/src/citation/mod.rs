//! Citation rendering.
//!
//! # Responsibility
//! - Render normalized document metadata in APA or MLA form (`style`).
//! - Build structured multi-author APA references from raw metadata (`apa`).
//!
//! The two entry points are independent contracts and do not share output
//! formatting rules.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod apa;
pub mod style;

pub use apa::{apa_generate, ApaCitation, ApaCitationGenerator, ApaMetadata};
pub use style::{format_citation, generate_citation, CitationMetadata, CitationStyle};

pub type CitationResult<T> = Result<T, CitationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationError {
    /// Style is neither APA nor MLA.
    UnsupportedStyle(String),
    /// Structured metadata is not a JSON object.
    MetadataNotMapping,
    /// A metadata field has the wrong shape.
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl Display for CitationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedStyle(style) => {
                write!(f, "unsupported citation style `{style}`; expected APA|MLA")
            }
            Self::MetadataNotMapping => write!(f, "citation metadata must be a JSON object"),
            Self::InvalidField { field, message } => {
                write!(f, "invalid citation field `{field}`: {message}")
            }
        }
    }
}

impl Error for CitationError {}
