//! Core domain logic for researchlib.
//! This crate is the single source of truth for record normalization,
//! citation rendering, keyword indexing and catalog reconciliation.

pub mod citation;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;
pub mod sync;

pub use citation::{
    apa_generate, generate_citation, ApaCitation, ApaCitationGenerator, ApaMetadata,
    CitationError, CitationMetadata, CitationResult, CitationStyle,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::author::{Author, AuthorRecord};
pub use model::collection::{Collection, CollectionError, CollectionExport, CollectionResult};
pub use model::document::{Document, DocumentError, DocumentRecord, DocumentResult, NewDocument};
pub use model::fields::{
    format_date, generate_unique_id, normalize_author_name, sanitize_input, today_stamp,
    validate_isbn, FieldError, FieldResult,
};
pub use model::member::{Member, MemberError, MemberRecord, MemberStatus, MemberType};
pub use model::record::{generate_universal_record, RecordError, RecordResult, UniversalRecord};
pub use search::keyword_index::{index_by_keyword, IndexError, IndexSource, KeywordIndex};
pub use search::text::search_records;
pub use service::archive_service::{
    ArchiveError, ArchiveExport, ArchiveManager, ArchiveResult, ArchivedCollection,
};
pub use store::{read_json, write_json, StoreError, StoreResult};
pub use sync::merge::{merge_databases, merge_with_stats, MergeRecord, MergeStats};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
