use nom_exif::*;
use std::path::Path;

/// Image-specific metadata, read best-effort from a supported image file.
///
/// Every field is optional: a missing EXIF block, a malformed block, or a
/// truncated image leaves the corresponding fields `None` rather than
/// failing the read. The GPS coordinates degrade independently — an image
/// with latitude/longitude but no altitude still yields both coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageMeta {
    /// Declared pixel (width, height) from the container header.
    pub dimensions: Option<(u32, u32)>,
    /// (horizontal, vertical) resolution in DPI from the EXIF resolution tags.
    pub dpi: Option<(f64, f64)>,
    /// EXIF orientation tag from the primary image IFD (1-8).
    pub orientation: Option<u32>,
    /// EXIF Software tag from the primary image IFD.
    pub software: Option<String>,
    /// Decimal degrees, negative for south.
    pub gps_latitude: Option<f64>,
    /// Decimal degrees, negative for west.
    pub gps_longitude: Option<f64>,
    /// Meters, negative below sea level.
    pub gps_altitude: Option<f64>,
}

/// Read image metadata from a file, absorbing every decode and parse failure.
///
/// This is the extraction boundary: nothing that goes wrong inside — an
/// unreadable container, no EXIF block, a malformed EXIF block — escapes as
/// an error. Failures are logged and leave fields `None`.
pub fn read_image_meta(path: &Path) -> ImageMeta {
    let mut meta = ImageMeta::default();

    // Declared dimensions come from the container header, not the EXIF block,
    // so they survive a missing or broken EXIF segment.
    match image::image_dimensions(path) {
        Ok(dims) => meta.dimensions = Some(dims),
        Err(e) => log::warn!("Could not read dimensions of {}: {e}", path.display()),
    }

    let mut parser = MediaParser::new();
    let ms = match MediaSource::file_path(path) {
        Ok(ms) => ms,
        Err(e) => {
            log::debug!("No parsable metadata container in {}: {e}", path.display());
            return meta;
        }
    };
    if !ms.has_exif() {
        log::debug!("No EXIF block in {}", path.display());
        return meta;
    }

    let iter: ExifIter = match parser.parse(ms) {
        Ok(iter) => iter,
        Err(e) => {
            log::warn!("EXIF block in {} could not be parsed: {e}", path.display());
            return meta;
        }
    };

    // Parse GPS info before converting to Exif (consumes the iterator)
    let gps_info = iter.parse_gps_info().ok().flatten();
    let exif: Exif = iter.into();

    meta.orientation = exif.get(ExifTag::Orientation).and_then(entry_to_u32);
    meta.software = exif.get(ExifTag::Software).and_then(entry_to_string);

    let x_res = exif.get(ExifTag::XResolution).and_then(entry_to_f64);
    let y_res = exif.get(ExifTag::YResolution).and_then(entry_to_f64);
    meta.dpi = match (x_res, y_res) {
        (Some(x), Some(y)) => Some((x, y)),
        // Some writers omit one axis; mirror the other.
        (Some(x), None) => Some((x, x)),
        (None, Some(y)) => Some((y, y)),
        (None, None) => None,
    };

    if let Some(gps) = gps_info {
        meta.gps_latitude = Some(latlng_to_decimal(&gps.latitude, gps.latitude_ref));
        meta.gps_longitude = Some(latlng_to_decimal(&gps.longitude, gps.longitude_ref));
        meta.gps_altitude = altitude_to_meters(&gps.altitude, gps.altitude_ref);
    }

    meta
}

/// Convert an EntryValue to an Option<String>.
fn entry_to_string(val: &EntryValue) -> Option<String> {
    let s = val.to_string();
    let s = s.trim().trim_matches('"').to_string();
    if s.is_empty() { None } else { Some(s) }
}

fn entry_to_u32(val: &EntryValue) -> Option<u32> {
    val.to_string().trim().parse().ok()
}

/// Convert an EntryValue to a float. Rational entries render as
/// `num/den (decimal)`, plain numeric entries as the bare number.
fn entry_to_f64(val: &EntryValue) -> Option<f64> {
    parse_rational(&val.to_string())
}

fn parse_rational(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Some((num, rest)) = s.split_once('/') {
        let den = rest.split_whitespace().next()?;
        let n: f64 = num.trim().parse().ok()?;
        let d: f64 = den.trim().parse().ok()?;
        if d == 0.0 {
            return None;
        }
        return Some(n / d);
    }
    s.parse().ok()
}

fn ratio(r: &URational) -> Option<f64> {
    if r.1 == 0 {
        return None;
    }
    Some(r.0 as f64 / r.1 as f64)
}

/// Convert a LatLng (3 rationals: deg, min, sec) to signed decimal degrees.
fn latlng_to_decimal(latlng: &LatLng, reference: char) -> f64 {
    let degrees = ratio(&latlng.0).unwrap_or(0.0);
    let minutes = ratio(&latlng.1).unwrap_or(0.0);
    let seconds = ratio(&latlng.2).unwrap_or(0.0);

    let mut coord = degrees + minutes / 60.0 + seconds / 3600.0;

    if reference == 'S' || reference == 'W' {
        coord = -coord;
    }

    coord
}

/// Convert the GPS altitude rational to signed meters. A zero denominator
/// means the tag was not actually present.
fn altitude_to_meters(altitude: &URational, altitude_ref: u8) -> Option<f64> {
    let meters = ratio(altitude)?;
    // Reference 1 is below sea level.
    Some(if altitude_ref == 1 { -meters } else { meters })
}

#[cfg(test)]
mod tests {
    use super::*;
    use img_parts::jpeg::Jpeg;
    use img_parts::{Bytes, ImageEXIF};
    use std::fs;
    use tempfile::TempDir;

    // Little-endian TIFF block with two IFD0 entries:
    // Orientation = 1 and Software = "Acme1.0". No GPS sub-IFD.
    fn tiff_with_software() -> Vec<u8> {
        let mut tiff = vec![
            0x49, 0x49, 0x2A, 0x00, // II, magic
            0x08, 0x00, 0x00, 0x00, // IFD0 offset
            0x02, 0x00, // entry count
            0x12, 0x01, // tag 0x0112 Orientation
            0x03, 0x00, // SHORT
            0x01, 0x00, 0x00, 0x00, // count
            0x01, 0x00, 0x00, 0x00, // value 1
            0x31, 0x01, // tag 0x0131 Software
            0x02, 0x00, // ASCII
            0x08, 0x00, 0x00, 0x00, // count, incl. NUL
            0x26, 0x00, 0x00, 0x00, // value offset 38
            0x00, 0x00, 0x00, 0x00, // next IFD
        ];
        tiff.extend_from_slice(b"Acme1.0\0");
        tiff
    }

    fn write_jpeg_with_exif(path: &Path) {
        let plain = path.with_extension("tmp.jpg");
        image::RgbImage::from_pixel(200, 100, image::Rgb([10, 20, 30]))
            .save(&plain)
            .unwrap();
        let bytes = fs::read(&plain).unwrap();
        let mut jpeg = Jpeg::from_bytes(Bytes::from(bytes)).unwrap();
        jpeg.set_exif(Some(Bytes::from(tiff_with_software())));
        fs::write(path, jpeg.encoder().bytes()).unwrap();
        fs::remove_file(&plain).unwrap();
    }

    #[test]
    fn exif_jpeg_yields_orientation_and_software() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        write_jpeg_with_exif(&path);

        let meta = read_image_meta(&path);
        assert_eq!(meta.dimensions, Some((200, 100)));
        assert_eq!(meta.orientation, Some(1));
        assert_eq!(meta.software.as_deref(), Some("Acme1.0"));
        // No GPS sub-IFD and no resolution tags in the block.
        assert_eq!(meta.gps_latitude, None);
        assert_eq!(meta.gps_longitude, None);
        assert_eq!(meta.gps_altitude, None);
        assert_eq!(meta.dpi, None);
    }

    #[test]
    fn latlng_north_east() {
        let latlng: LatLng = [(43, 1), (17, 1), (2446, 100)].into();
        let dec = latlng_to_decimal(&latlng, 'N');
        assert!((dec - 43.290128).abs() < 1e-4);
    }

    #[test]
    fn latlng_south_is_negative() {
        let latlng: LatLng = [(12, 1), (30, 1), (0, 1)].into();
        let dec = latlng_to_decimal(&latlng, 'S');
        assert!((dec + 12.5).abs() < 1e-9);
    }

    #[test]
    fn latlng_zero_denominator_degrades() {
        let latlng: LatLng = [(10, 1), (1, 0), (0, 1)].into();
        let dec = latlng_to_decimal(&latlng, 'E');
        assert!((dec - 10.0).abs() < 1e-9);
    }

    #[test]
    fn altitude_below_sea_level() {
        assert_eq!(altitude_to_meters(&(425, 10).into(), 0), Some(42.5));
        assert_eq!(altitude_to_meters(&(425, 10).into(), 1), Some(-42.5));
        assert_eq!(altitude_to_meters(&(0, 0).into(), 0), None);
    }

    #[test]
    fn rational_strings() {
        assert_eq!(parse_rational("72/1 (72.0000)"), Some(72.0));
        assert_eq!(parse_rational("175/100"), Some(1.75));
        assert_eq!(parse_rational("300"), Some(300.0));
        assert_eq!(parse_rational("1/0"), None);
        assert_eq!(parse_rational("landscape"), None);
    }

    #[test]
    fn unreadable_image_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jpg");
        fs::write(&path, b"this is not a jpeg").unwrap();

        let meta = read_image_meta(&path);
        assert_eq!(meta, ImageMeta::default());
    }

    #[test]
    fn image_without_exif_has_dimensions_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.png");
        image::RgbImage::new(4, 3).save(&path).unwrap();

        let meta = read_image_meta(&path);
        assert_eq!(meta.dimensions, Some((4, 3)));
        assert_eq!(meta.orientation, None);
        assert_eq!(meta.software, None);
        assert_eq!(meta.gps_latitude, None);
    }
}
