//! Vidstream-Common: shared error type and media path utilities.
//!
//! - **Error Handling**: [`StreamError`] with its HTTP status mapping
//! - **Path Utilities**: video extension allow-list and MIME lookup
//!
//! # Examples
//!
//! ```
//! use vidstream_common::paths::{mime_for_extension, DEFAULT_ALLOWED_EXTENSIONS};
//! use vidstream_common::StreamError;
//!
//! assert!(DEFAULT_ALLOWED_EXTENSIONS.contains(&"webm"));
//! assert_eq!(mime_for_extension("MKV"), "video/x-matroska");
//! assert_eq!(StreamError::not_found("clip.mp4").http_status(), 404);
//! ```

pub mod error;
pub mod paths;

pub use error::{Result, StreamError};
