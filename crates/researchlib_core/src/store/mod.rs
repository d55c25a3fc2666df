//! JSON file boundary for exports and imports.
//!
//! # Responsibility
//! - Serialize export snapshots to pretty-printed UTF-8 JSON files.
//! - Read previously exported documents back into typed values.
//!
//! # Invariants
//! - A document is fully serialized in memory before the file is touched, so
//!   serialization failures never leave a truncated file behind.
//! - Only the last successful write is durable state; there is no
//!   partial-write recovery.

use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at `{}`: {source}", path.display()),
            Self::Json { path, source } => {
                write!(f, "json error at `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// Writes `value` as pretty-printed JSON, replacing any existing file.
///
/// # Side effects
/// - Emits `json_write` logging events with duration and status.
pub fn write_json<T: Serialize + ?Sized>(value: &T, path: impl AsRef<Path>) -> StoreResult<()> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let payload = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    match std::fs::write(path, payload.as_bytes()) {
        Ok(()) => {
            info!(
                "event=json_write module=store status=ok bytes={} duration_ms={}",
                payload.len(),
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(source) => {
            error!(
                "event=json_write module=store status=error duration_ms={} error_code=write_failed error={}",
                started_at.elapsed().as_millis(),
                source
            );
            Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Reads and decodes one JSON document.
///
/// # Side effects
/// - Emits `json_read` logging events with duration and status.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> StoreResult<T> {
    let path = path.as_ref();
    let started_at = Instant::now();

    let payload = std::fs::read_to_string(path).map_err(|source| {
        error!(
            "event=json_read module=store status=error error_code=read_failed error={}",
            source
        );
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;

    let value = serde_json::from_str(&payload).map_err(|source| {
        error!(
            "event=json_read module=store status=error error_code=decode_failed line={} column={}",
            source.line(),
            source.column()
        );
        StoreError::Json {
            path: path.to_path_buf(),
            source,
        }
    })?;

    info!(
        "event=json_read module=store status=ok bytes={} duration_ms={}",
        payload.len(),
        started_at.elapsed().as_millis()
    );
    Ok(value)
}
