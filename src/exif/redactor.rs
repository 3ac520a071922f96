use img_parts::jpeg::Jpeg;
use img_parts::png::Png;
use img_parts::{Bytes, ImageEXIF};
use nom_exif::{ExifIter, MediaParser, MediaSource};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::pipeline::{derive_output_path, extension_of, is_supported_image};

/// The outcome of a successful redaction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redaction {
    /// EXIF data was found and a sanitized copy was written here.
    Cleared(PathBuf),
    /// No EXIF data anywhere in the file. Nothing was written.
    NoMetadata,
}

/// Why a redaction attempt failed. The original file is intact in every case.
#[derive(Debug, Error)]
pub enum RedactError {
    #[error("unsupported file type {0:?}; expected one of .jpg .jpeg .png .bmp .gif")]
    UnsupportedType(String),

    #[error("could not decode image: {0}")]
    Decode(String),

    #[error("could not re-encode image: {0}")]
    Encode(String),

    #[error("could not write redacted copy to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write an EXIF-free copy of `path`, deriving the output name from `marker`.
///
/// Two ordered detection attempts, first success wins:
///
/// 1. **Container level** — parse the file's segment structure with
///    `img-parts` and drop the EXIF segment if one is present.
/// 2. **Raw bytes** — some containers hide EXIF from the segment parser;
///    probe the file directly with `nom-exif` and, if tags turn up,
///    re-encode the pixels (which carries no metadata).
///
/// The original file is never modified or deleted. When neither attempt
/// finds tag data the call succeeds with [`Redaction::NoMetadata`] and no
/// file is written.
pub fn redact(path: &Path, marker: &str) -> Result<Redaction, RedactError> {
    if !is_supported_image(path) {
        return Err(RedactError::UnsupportedType(extension_of(path)));
    }

    let file_bytes = std::fs::read(path)?;

    // First attempt: container-level segment surgery. JPEG carries EXIF in
    // an APP1 segment, PNG in an eXIf chunk; BMP and GIF have no container
    // slot for EXIF and go straight to the raw-byte attempt.
    if let Some(cleared) = clear_container_exif(path, file_bytes) {
        let output = derive_output_path(path, marker);
        std::fs::write(&output, &cleared).map_err(|source| RedactError::Write {
            path: output.clone(),
            source,
        })?;
        return Ok(Redaction::Cleared(output));
    }

    // Second attempt: parse the raw file bytes independently of the container.
    if raw_exif_present(path) {
        log::debug!("EXIF found in {} by raw parse", path.display());
        let img = image::open(path).map_err(|e| RedactError::Decode(e.to_string()))?;
        let output = derive_output_path(path, marker);
        img.save(&output)
            .map_err(|e| RedactError::Encode(e.to_string()))?;
        return Ok(Redaction::Cleared(output));
    }

    // Neither attempt found tags. If the image does not even decode, the
    // caller asked to redact a broken file and should hear about it.
    image::image_dimensions(path).map_err(|e| RedactError::Decode(e.to_string()))?;

    Ok(Redaction::NoMetadata)
}

/// Parse the container's segment structure and, if an EXIF block is present,
/// return the re-encoded bytes with that block dropped. `None` means the
/// container had no EXIF or could not be parsed at this level.
fn clear_container_exif(path: &Path, file_bytes: Vec<u8>) -> Option<Bytes> {
    match extension_of(path).as_str() {
        ".jpg" | ".jpeg" => match Jpeg::from_bytes(Bytes::from(file_bytes)) {
            Ok(mut jpeg) => {
                let has_exif = jpeg.exif().map(|e| !e.is_empty()).unwrap_or(false);
                if !has_exif {
                    log::debug!("No EXIF segment in {}", path.display());
                    return None;
                }
                jpeg.set_exif(None);
                Some(jpeg.encoder().bytes())
            }
            Err(e) => {
                log::debug!("Segment parse of {} failed: {e}", path.display());
                None
            }
        },
        ".png" => match Png::from_bytes(Bytes::from(file_bytes)) {
            Ok(mut png) => {
                let has_exif = png.exif().map(|e| !e.is_empty()).unwrap_or(false);
                if !has_exif {
                    log::debug!("No eXIf chunk in {}", path.display());
                    return None;
                }
                png.set_exif(None);
                Some(png.encoder().bytes())
            }
            Err(e) => {
                log::debug!("Chunk parse of {} failed: {e}", path.display());
                None
            }
        },
        _ => None,
    }
}

/// Probe the file bytes for EXIF entries, independent of the container path.
fn raw_exif_present(path: &Path) -> bool {
    let mut parser = MediaParser::new();
    let Ok(ms) = MediaSource::file_path(path) else {
        return false;
    };
    if !ms.has_exif() {
        return false;
    }
    let iter: ExifIter = match parser.parse(ms) {
        Ok(iter) => iter,
        Err(_) => return false,
    };
    iter.into_iter().next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // Minimal little-endian TIFF block: one IFD0 entry, Orientation = 1.
    fn minimal_exif_tiff() -> Vec<u8> {
        vec![
            0x49, 0x49, 0x2A, 0x00, // II, magic
            0x08, 0x00, 0x00, 0x00, // IFD0 offset
            0x01, 0x00, // entry count
            0x12, 0x01, // tag 0x0112 Orientation
            0x03, 0x00, // SHORT
            0x01, 0x00, 0x00, 0x00, // count
            0x01, 0x00, 0x00, 0x00, // value 1
            0x00, 0x00, 0x00, 0x00, // next IFD
        ]
    }

    fn write_jpeg_with_exif(path: &Path) {
        let plain = path.with_extension("tmp.jpg");
        image::RgbImage::from_pixel(8, 8, image::Rgb([120, 80, 40]))
            .save(&plain)
            .unwrap();
        let bytes = fs::read(&plain).unwrap();
        let mut jpeg = Jpeg::from_bytes(Bytes::from(bytes)).unwrap();
        jpeg.set_exif(Some(Bytes::from(minimal_exif_tiff())));
        fs::write(path, jpeg.encoder().bytes()).unwrap();
        fs::remove_file(&plain).unwrap();
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = redact(Path::new("notes.txt"), "_no_metadata").unwrap_err();
        assert!(matches!(err, RedactError::UnsupportedType(ext) if ext == ".txt"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = redact(Path::new("/nonexistent/photo.jpg"), "_no_metadata").unwrap_err();
        assert!(matches!(err, RedactError::Io(_)));
    }

    #[test]
    fn garbage_image_is_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"not actually a jpeg").unwrap();

        let err = redact(&path, "_no_metadata").unwrap_err();
        assert!(matches!(err, RedactError::Decode(_)));
    }

    #[test]
    fn image_without_exif_reports_no_metadata() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.png");
        image::RgbImage::new(4, 4).save(&path).unwrap();
        let before = fs::read(&path).unwrap();

        let outcome = redact(&path, "_no_metadata").unwrap();
        assert_eq!(outcome, Redaction::NoMetadata);

        // Nothing written, original untouched.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn jpeg_with_exif_is_cleared_to_new_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        write_jpeg_with_exif(&path);
        let before = fs::read(&path).unwrap();

        let outcome = redact(&path, "_no_metadata").unwrap();
        let output = match outcome {
            Redaction::Cleared(p) => p,
            other => panic!("expected Cleared, got {other:?}"),
        };

        assert_eq!(output, dir.path().join("photo_no_metadata.jpg"));
        assert_eq!(fs::read(&path).unwrap(), before);

        // Re-parse: the sanitized copy must carry zero EXIF data.
        let redacted = Jpeg::from_bytes(Bytes::from(fs::read(&output).unwrap())).unwrap();
        assert!(redacted.exif().is_none());
    }

    #[test]
    fn repeated_redaction_does_not_collide() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        write_jpeg_with_exif(&path);

        let first = redact(&path, "_no_metadata").unwrap();
        let second = redact(&path, "_no_metadata").unwrap();

        let (Redaction::Cleared(a), Redaction::Cleared(b)) = (first, second) else {
            panic!("both runs should clear");
        };
        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
    }
}
