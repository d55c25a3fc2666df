//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `researchlib_core` linkage.
//! - Optionally import a JSON array of raw records and print their APA
//!   citations, exercising the import -> citation -> index path end to end.
//!
//! Usage: `researchlib_cli [records.json [collection-name]]`.
//! Set `RESEARCHLIB_LOG_DIR` to an absolute path to enable file logging.

use researchlib_core::{init_logging, read_json, sanitize_input, ArchiveManager, LoggingConfig};
use serde_json::Value;
use std::process::ExitCode;

const DEFAULT_COLLECTION: &str = "Personal Collection";
const LOG_DIR_ENV: &str = "RESEARCHLIB_LOG_DIR";

fn main() -> ExitCode {
    println!("researchlib_core version={}", researchlib_core::core_version());

    if let Ok(log_dir) = std::env::var(LOG_DIR_ENV) {
        let started = LoggingConfig::with_default_level(&log_dir)
            .and_then(|config| init_logging(&config));
        if let Err(err) = started {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut args = std::env::args().skip(1);
    let Some(records_path) = args.next() else {
        return ExitCode::SUCCESS;
    };
    let collection_name = args.next().unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

    match run_import(&records_path, &collection_name) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            log::error!("event=cli_import module=cli status=error");
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run_import(records_path: &str, collection_name: &str) -> Result<(), String> {
    let records: Vec<Value> = read_json(records_path).map_err(|err| err.to_string())?;

    let mut archive = ArchiveManager::new();
    let imported = archive
        .import_records(&records, collection_name)
        .map_err(|err| err.to_string())?;

    // Why: the archive stores collections under the sanitized name, so the
    // raw argument may not match what `import_records` registered.
    let collection_name = resolve_collection_name(collection_name);
    if let Some(collection) = archive.get_collection(&collection_name) {
        for document in collection.documents() {
            let citation = document
                .generate_citation("APA")
                .map_err(|err| err.to_string())?;
            println!("{}  {citation}", document.identifier());
        }
    }

    let terms = archive.global_index().len();
    println!("imported={imported} collection={collection_name} index_terms={terms}");
    Ok(())
}

fn resolve_collection_name(raw: &str) -> String {
    sanitize_input(raw)
}

#[cfg(test)]
mod tests {
    use super::resolve_collection_name;
    use researchlib_core::ArchiveManager;
    use serde_json::json;

    #[test]
    fn padded_collection_name_resolves_to_imported_collection() {
        let raw = "  <Reading List>  ";
        let mut archive = ArchiveManager::new();
        archive
            .import_records(&[json!({"title": "Padded", "identifier": "DOC-PAD"})], raw)
            .expect("import should succeed");

        let collection = archive
            .get_collection(&resolve_collection_name(raw))
            .expect("collection should be found under the resolved name");
        assert_eq!(collection.size(), 1);
        assert!(archive.get_collection(raw).is_none());
    }
}
