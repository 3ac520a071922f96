//! EXIF metadata reading and redaction.
//!
//! This module provides two main entry points:
//!
//! - [`read_image_meta`] — Best-effort read of image dimensions, resolution,
//!   orientation, software, and GPS tags. Never fails; missing or malformed
//!   metadata degrades to `None` per field.
//! - [`redact`] — Write an EXIF-free copy of an image at a derived path,
//!   leaving the original untouched.

mod reader;
mod redactor;

pub use reader::{read_image_meta, ImageMeta};
pub use redactor::{redact, RedactError, Redaction};
