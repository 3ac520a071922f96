//! Static dictionary of human-readable field explanations.

/// Look up the explanation for a field label.
///
/// Unknown labels yield the empty string, never an error — the formatter
/// appends whatever comes back without caring whether the field is known.
pub fn explanation(label: &str) -> &'static str {
    match label {
        "File Name" => "Name of the file",
        "File Type" => "Type of the file, e.g., .jpg, .png",
        "File Size (bytes)" => "Size of the file in bytes",
        "Image Size" => "Dimensions of the image in pixels",
        "Image Orientation" => "Orientation of the image, e.g., landscape, portrait",
        "Dots Per Inch" => "Dots per inch, resolution of the image",
        "Created Time" => "Date and time when the file was created",
        "Modified Time" => "Date and time when the file was last modified",
        "GPS Latitude" => "Latitude where the photo was taken",
        "GPS Longitude" => "Longitude where the photo was taken",
        "GPS Altitude" => "Altitude where the photo was taken",
        "Software" => "Software used to process the image",
        _ => "",
    }
}
