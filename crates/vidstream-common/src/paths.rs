//! Path utilities for recognising servable video files.
//!
//! [`DEFAULT_ALLOWED_EXTENSIONS`] seeds the configurable allow-list; the MIME
//! table is wider so that extensions enabled in config still get a real type.

use std::path::Path;

/// Known video extensions and their MIME types.
const VIDEO_MIME_TYPES: &[(&str, &str)] = &[
    ("mp4", "video/mp4"),
    ("webm", "video/webm"),
    ("ogg", "video/ogg"),
    ("avi", "video/x-msvideo"),
    ("mov", "video/quicktime"),
    ("wmv", "video/x-ms-wmv"),
    ("flv", "video/x-flv"),
    ("mkv", "video/x-matroska"),
];

/// Extensions streamed when the config does not list its own.
pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["mp4", "webm", "ogg"];

/// Fallback MIME type for unknown extensions.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Map a file extension (any case, no leading dot) to its MIME type.
///
/// # Examples
///
/// ```
/// use vidstream_common::paths::mime_for_extension;
///
/// assert_eq!(mime_for_extension("mp4"), "video/mp4");
/// assert_eq!(mime_for_extension("Mov"), "video/quicktime");
/// assert_eq!(mime_for_extension("xyz"), "application/octet-stream");
/// ```
pub fn mime_for_extension(ext: &str) -> &'static str {
    let ext = ext.to_ascii_lowercase();
    VIDEO_MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, mime)| *mime)
        .unwrap_or(OCTET_STREAM)
}

/// Lowercased extension of `path`, if it has a UTF-8 one.
pub fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}
