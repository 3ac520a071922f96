use std::fmt;

/// The absent sentinel, rendered verbatim wherever a field was not found
/// or not applicable. Distinct from an empty string or zero.
pub const ABSENT: &str = " - ";

/// The known metadata fields, in the order they are extracted.
///
/// The first five are the base fields present in every record; the rest are
/// appended only for supported image types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FileName,
    FileType,
    FileSize,
    CreatedTime,
    ModifiedTime,
    ImageSize,
    ImageOrientation,
    DotsPerInch,
    GpsLatitude,
    GpsLongitude,
    GpsAltitude,
    Software,
}

impl Field {
    /// The display label used in formatted output and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Field::FileName => "File Name",
            Field::FileType => "File Type",
            Field::FileSize => "File Size (bytes)",
            Field::CreatedTime => "Created Time",
            Field::ModifiedTime => "Modified Time",
            Field::ImageSize => "Image Size",
            Field::ImageOrientation => "Image Orientation",
            Field::DotsPerInch => "Dots Per Inch",
            Field::GpsLatitude => "GPS Latitude",
            Field::GpsLongitude => "GPS Longitude",
            Field::GpsAltitude => "GPS Altitude",
            Field::Software => "Software",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single metadata value.
///
/// Metadata sources are heterogeneous, so values carry their natural shape
/// rather than being flattened to strings up front. [`FieldValue::Absent`]
/// marks a field that was looked for but not found.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
    /// Pixel (width, height) as declared by the image container.
    Dimensions(u32, u32),
    /// (horizontal, vertical) resolution in dots per inch.
    Resolution(f64, f64),
    Absent,
}

impl FieldValue {
    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Dimensions(w, h) => write!(f, "({w}, {h})"),
            FieldValue::Resolution(x, y) => write!(f, "({x}, {y})"),
            FieldValue::Absent => f.write_str(ABSENT),
        }
    }
}

/// An ordered record of extracted metadata.
///
/// Entries keep their insertion order, which is the extraction order.
/// Inserting a field that is already present overwrites the value in place
/// without moving the entry. A record is built fresh for every extraction
/// and passed around by value — there is no shared or cached state.
///
/// # Example
///
/// ```rust
/// use meta_insight::record::{Field, FieldValue, MetadataRecord};
///
/// let mut record = MetadataRecord::new();
/// record.insert(Field::FileName, FieldValue::Text("photo.jpg".into()));
/// record.insert(Field::FileSize, FieldValue::Absent);
/// record.insert(Field::FileSize, FieldValue::Integer(1024));
///
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.get(Field::FileSize), Some(&FieldValue::Integer(1024)));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataRecord {
    entries: Vec<(Field, FieldValue)>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a field. Overwrites keep the original position.
    pub fn insert(&mut self, field: Field, value: FieldValue) {
        if let Some(entry) = self.entries.iter_mut().find(|(f, _)| *f == field) {
            entry.1 = value;
        } else {
            self.entries.push((field, value));
        }
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(Field, FieldValue)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_preserved() {
        let mut record = MetadataRecord::new();
        record.insert(Field::FileName, FieldValue::Text("a.png".into()));
        record.insert(Field::FileType, FieldValue::Text(".png".into()));
        record.insert(Field::FileSize, FieldValue::Integer(42));

        let order: Vec<Field> = record.iter().map(|(f, _)| *f).collect();
        assert_eq!(order, vec![Field::FileName, Field::FileType, Field::FileSize]);
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut record = MetadataRecord::new();
        record.insert(Field::FileName, FieldValue::Text("a.png".into()));
        record.insert(Field::FileSize, FieldValue::Absent);
        record.insert(Field::ModifiedTime, FieldValue::Absent);
        record.insert(Field::FileSize, FieldValue::Integer(7));

        assert_eq!(record.len(), 3);
        let order: Vec<Field> = record.iter().map(|(f, _)| *f).collect();
        assert_eq!(
            order,
            vec![Field::FileName, Field::FileSize, Field::ModifiedTime]
        );
        assert_eq!(record.get(Field::FileSize), Some(&FieldValue::Integer(7)));
    }

    #[test]
    fn get_missing_field() {
        let record = MetadataRecord::new();
        assert_eq!(record.get(Field::Software), None);
        assert!(record.is_empty());
    }

    #[test]
    fn absent_renders_as_sentinel() {
        assert_eq!(FieldValue::Absent.to_string(), " - ");
        assert!(FieldValue::Absent.is_absent());
        assert!(!FieldValue::Integer(0).is_absent());
    }

    #[test]
    fn value_display() {
        assert_eq!(FieldValue::Text("Acme1.0".into()).to_string(), "Acme1.0");
        assert_eq!(FieldValue::Integer(1024).to_string(), "1024");
        assert_eq!(FieldValue::Dimensions(200, 100).to_string(), "(200, 100)");
        assert_eq!(FieldValue::Resolution(72.0, 72.0).to_string(), "(72, 72)");
    }
}
