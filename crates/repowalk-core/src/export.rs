// SPDX-License-Identifier: Apache-2.0

//! JSON export of ranked repositories.
//!
//! The file is a pretty-printed array with one object per record carrying
//! every [`RepositoryRecord`] field plus the derived `popularity` score.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::Result;
use crate::error::RepowalkError;
use crate::repos::RepositoryRecord;

#[derive(Serialize)]
struct ExportRow<'a> {
    #[serde(flatten)]
    record: &'a RepositoryRecord,
    popularity: u64,
}

#[derive(Deserialize)]
struct ImportRow {
    #[serde(flatten)]
    record: RepositoryRecord,
    #[allow(dead_code)]
    popularity: u64,
}

/// Serializes records to the export JSON format.
///
/// # Errors
///
/// Returns the serializer error; records always serialize in practice.
pub fn to_export_json(records: &[RepositoryRecord]) -> serde_json::Result<String> {
    let rows: Vec<ExportRow<'_>> = records
        .iter()
        .map(|record| ExportRow {
            record,
            popularity: record.popularity(),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}

/// Writes records to `path`, replacing any existing file.
///
/// The parent directory must already exist.
///
/// # Errors
///
/// Returns `RepowalkError::Export` if the file cannot be written.
#[instrument(skip(records), fields(path = %path.display(), count = records.len()))]
pub fn write_export(path: &Path, records: &[RepositoryRecord]) -> Result<()> {
    let json = to_export_json(records).map_err(|e| RepowalkError::Export {
        path: path.to_path_buf(),
        source: std::io::Error::other(e),
    })?;
    fs::write(path, json).map_err(|source| RepowalkError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Wrote export file");
    Ok(())
}

/// Reads records back from an export file.
///
/// # Errors
///
/// Returns `RepowalkError::Export` if the file cannot be read and
/// `RepowalkError::InvalidExport` if it is not a valid export.
pub fn read_export(path: &Path) -> Result<Vec<RepositoryRecord>> {
    let content = fs::read_to_string(path).map_err(|source| RepowalkError::Export {
        path: path.to_path_buf(),
        source,
    })?;
    let rows: Vec<ImportRow> =
        serde_json::from_str(&content).map_err(|source| RepowalkError::InvalidExport {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(rows.into_iter().map(|row| row.record).collect())
}
