//! # meta-insight
//!
//! Metadata inspection and redaction for image files: read file-system and
//! embedded EXIF metadata (including GPS tags) into an ordered record,
//! render it with human-readable explanations, export it as plain text, and
//! write EXIF-free copies of images.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meta_insight::pipeline::extract;
//! use meta_insight::report::{export_record, format_record};
//! use meta_insight::exif::{redact, Redaction};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let path = Path::new("photo.jpg");
//!
//!     // 1. Extract an ordered metadata record. This never fails: fields
//!     //    that cannot be read come back as the " - " sentinel.
//!     let record = extract(path);
//!
//!     // 2. Render it for display, hiding empty fields.
//!     print!("{}", format_record(&record, false));
//!
//!     // 3. Export the flat Name: Value report.
//!     export_record(&record, Path::new("photo-metadata.txt"))?;
//!
//!     // 4. Write an EXIF-free copy. The original is never touched.
//!     match redact(path, "_no_metadata")? {
//!         Redaction::Cleared(output) => println!("Sanitized copy: {}", output.display()),
//!         Redaction::NoMetadata => println!("No metadata found."),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Behavior notes
//!
//! - Extraction is graceful by design: metadata sources are unreliable
//!   (missing EXIF, partial GPS, malformed files), so every failure inside
//!   the extractor degrades to an absent field instead of an error.
//! - Image-specific fields are only attempted for `.jpg`, `.jpeg`, `.png`,
//!   `.bmp`, and `.gif`; other files get the base file-system fields.
//! - Redaction uses two ordered detection attempts (container segment scan,
//!   then a raw-byte parse) and always writes to a fresh derived path.
//!
//! ## Modules
//!
//! - [`record`] — The ordered metadata record and its value type
//! - [`dictionary`] — Field explanations for display
//! - [`pipeline`] — Extraction, input collection, and path derivation
//! - [`exif`] — EXIF reading and redaction
//! - [`report`] — Display formatting and text export
//! - [`config`] — Configuration types and loading/saving

pub mod config;
pub mod dictionary;
pub mod exif;
pub mod pipeline;
pub mod record;
pub mod report;
