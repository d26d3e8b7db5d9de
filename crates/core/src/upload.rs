//! Image upload constraints.

use crate::error::CoreError;

/// Multipart field name carrying image files.
pub const IMAGE_FIELD: &str = "images";

/// Maximum number of files in a single upload request.
pub const MAX_FILES_PER_UPLOAD: usize = 10;

/// Accepted image content types and the extension stored on disk.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/jpg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

/// Map an uploaded file's content type onto the stored file extension.
pub fn extension_for(content_type: &str) -> Result<&'static str, CoreError> {
    let ct = content_type.trim().to_ascii_lowercase();
    ALLOWED_TYPES
        .iter()
        .find(|(t, _)| *t == ct)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Unsupported image type '{content_type}'. Use JPEG, PNG or WebP"
            ))
        })
}

/// Guess a content type from a file name when the client omitted one.
pub fn content_type_from_name(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}
