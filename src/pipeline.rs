use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::exif;
use crate::record::{Field, FieldValue, MetadataRecord};

/// Extensions that get image-specific extraction and support redaction.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

/// Check if a file has a supported image extension (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Lower-cased extension including the leading dot, or an empty string.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// Extract a metadata record from an arbitrary file.
///
/// Runs three steps in order, each independently fault-tolerant: fields
/// derived from the path string, file-system stat fields, and (for supported
/// image types) image-specific fields. A failure in one step never aborts a
/// later one — the result is always a record where every attempted field is
/// either populated or [`FieldValue::Absent`].
///
/// # Example
///
/// ```rust,no_run
/// use meta_insight::pipeline::extract;
/// use meta_insight::record::Field;
///
/// let record = extract("photo.jpg".as_ref());
/// println!("{}", record.get(Field::FileSize).unwrap());
/// ```
pub fn extract(path: &Path) -> MetadataRecord {
    let mut record = MetadataRecord::new();

    // Path-derived fields. These cannot fail.
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    record.insert(Field::FileName, FieldValue::Text(file_name));
    record.insert(Field::FileType, FieldValue::Text(extension_of(path)));
    record.insert(Field::FileSize, FieldValue::Absent);
    record.insert(Field::CreatedTime, FieldValue::Absent);
    record.insert(Field::ModifiedTime, FieldValue::Absent);

    // File-system stat fields.
    match std::fs::metadata(path) {
        Ok(meta) => {
            record.insert(Field::FileSize, FieldValue::Integer(meta.len()));
            if let Ok(created) = meta.created() {
                record.insert(Field::CreatedTime, FieldValue::Text(format_timestamp(created)));
            }
            if let Ok(modified) = meta.modified() {
                record.insert(
                    Field::ModifiedTime,
                    FieldValue::Text(format_timestamp(modified)),
                );
            }
        }
        Err(e) => log::warn!("Could not stat {}: {e}", path.display()),
    }

    // Image-specific fields, only for supported image types. Unsupported
    // extensions are skipped silently — that is an expected state, not an
    // error.
    if is_supported_image(path) {
        let meta = exif::read_image_meta(path);
        record.insert(
            Field::ImageSize,
            meta.dimensions
                .map(|(w, h)| FieldValue::Dimensions(w, h))
                .unwrap_or(FieldValue::Absent),
        );
        record.insert(
            Field::ImageOrientation,
            meta.orientation
                .map(|o| FieldValue::Integer(o as u64))
                .unwrap_or(FieldValue::Absent),
        );
        record.insert(
            Field::DotsPerInch,
            meta.dpi
                .map(|(x, y)| FieldValue::Resolution(x, y))
                .unwrap_or(FieldValue::Absent),
        );
        record.insert(
            Field::GpsLatitude,
            meta.gps_latitude
                .map(|v| FieldValue::Text(format!("{v:.6}")))
                .unwrap_or(FieldValue::Absent),
        );
        record.insert(
            Field::GpsLongitude,
            meta.gps_longitude
                .map(|v| FieldValue::Text(format!("{v:.6}")))
                .unwrap_or(FieldValue::Absent),
        );
        record.insert(
            Field::GpsAltitude,
            meta.gps_altitude
                .map(|v| FieldValue::Text(format!("{v:.1}")))
                .unwrap_or(FieldValue::Absent),
        );
        record.insert(
            Field::Software,
            meta.software
                .map(FieldValue::Text)
                .unwrap_or(FieldValue::Absent),
        );
    }

    record
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` in local time.
fn format_timestamp(t: SystemTime) -> String {
    DateTime::<Local>::from(t)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}

/// Strip the brace delimiters some drag-and-drop payloads wrap around paths.
pub fn normalize_input_path(raw: &str) -> PathBuf {
    PathBuf::from(raw.trim().trim_start_matches('{').trim_end_matches('}'))
}

/// Derive the output path for a redacted copy: `<stem><marker><ext>`,
/// with a numeric suffix appended until the path does not collide.
pub fn derive_output_path(path: &Path, marker: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = extension_of(path);
    let dir = path.parent().unwrap_or_else(|| Path::new(""));

    let candidate = dir.join(format!("{stem}{marker}{ext}"));
    if !candidate.exists() {
        return candidate;
    }
    let mut n = 1;
    loop {
        let candidate = dir.join(format!("{stem}{marker}-{n}{ext}"));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Collect files to inspect from the given paths.
///
/// Explicit file paths are always included — extraction works on arbitrary
/// files, not just images. Directories are walked recursively (following
/// symlinks) and contribute only supported image files. Paths that do not
/// exist are logged and skipped.
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let p = entry.path();
                if p.is_file() && is_supported_image(p) {
                    files.push(p.to_path_buf());
                }
            }
        } else {
            log::warn!("Path does not exist: {}", path.display());
        }
    }

    files
}
