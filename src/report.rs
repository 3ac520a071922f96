//! Rendering and export of metadata records.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::dictionary;
use crate::record::MetadataRecord;

/// Export failure, carrying the attempted destination.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not write export to {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Render a record for display, one `Name: Value (Explanation)` line per
/// field in record order.
///
/// With `show_empty` false, fields holding the absent sentinel are skipped;
/// order is never changed otherwise. Pure function, no failure modes.
pub fn format_record(record: &MetadataRecord, show_empty: bool) -> String {
    let mut out = String::new();
    for (field, value) in record.iter() {
        if show_empty || !value.is_absent() {
            let explanation = dictionary::explanation(field.label());
            let _ = writeln!(out, "{field}: {value} ({explanation})");
        }
    }
    out
}

/// Write a record to `dest` as flat `Name: Value` lines in record order,
/// overwriting any existing file. Returns the number of lines written.
///
/// An empty record is a valid no-op: nothing is written (no file is
/// created) and `Ok(0)` tells the caller there was nothing to export.
pub fn export_record(record: &MetadataRecord, dest: &Path) -> Result<usize, ExportError> {
    if record.is_empty() {
        return Ok(0);
    }

    let mut out = String::new();
    for (field, value) in record.iter() {
        let _ = writeln!(out, "{field}: {value}");
    }
    std::fs::write(dest, &out).map_err(|source| ExportError::Io {
        path: dest.to_path_buf(),
        source,
    })?;

    Ok(record.len())
}
