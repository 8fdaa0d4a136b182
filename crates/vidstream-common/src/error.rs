//! Failure kinds produced while resolving and streaming a video file.
//!
//! Every variant maps onto exactly one HTTP status via
//! [`StreamError::http_status`]. None of them are retried server-side.

/// Error type for a single stream request.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// No file identifier was supplied.
    #[error("Video file not specified")]
    MissingIdentifier,

    /// The resolved path does not exist or is not a regular file.
    #[error("Video file not found: {0}")]
    NotFound(String),

    /// The file extension is not in the allow-list.
    #[error("Invalid video file type: {0}")]
    InvalidType(String),

    /// A `Range` header was present but did not match `bytes=<start>-<end?>`.
    #[error("Malformed range header: {0}")]
    MalformedRange(String),

    /// The range parsed but falls outside the file.
    #[error("Requested range not satisfiable for size {size}")]
    UnsatisfiableRange {
        /// Size of the file in bytes, echoed in `Content-Range: bytes */size`.
        size: u64,
    },

    /// Reading the file failed before any byte was sent.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StreamError {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new InvalidType error.
    pub fn invalid_type<S: Into<String>>(name: S) -> Self {
        Self::InvalidType(name.into())
    }

    /// Create a new MalformedRange error.
    pub fn malformed_range<S: Into<String>>(header: S) -> Self {
        Self::MalformedRange(header.into())
    }

    /// Map this error to the HTTP status code sent to the client.
    pub fn http_status(&self) -> u16 {
        match self {
            StreamError::MissingIdentifier => 400,
            StreamError::NotFound(_) => 404,
            StreamError::InvalidType(_) => 400,
            StreamError::MalformedRange(_) => 400,
            StreamError::UnsatisfiableRange { .. } => 416,
            StreamError::Io(_) => 500,
        }
    }

    /// Whether the response carries the JSON error object.
    ///
    /// Range failures answer with an empty body, as browsers expect.
    pub fn has_json_body(&self) -> bool {
        !matches!(
            self,
            StreamError::MalformedRange(_) | StreamError::UnsatisfiableRange { .. }
        )
    }

    /// Message placed in the JSON error body.
    ///
    /// Unlike `Display`, this never leaks OS error details for I/O failures.
    pub fn public_message(&self) -> String {
        match self {
            StreamError::Io(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias using [`StreamError`].
pub type Result<T> = std::result::Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            StreamError::MissingIdentifier.to_string(),
            "Video file not specified"
        );
        assert_eq!(
            StreamError::not_found("a.mp4").to_string(),
            "Video file not found: a.mp4"
        );
        assert_eq!(
            StreamError::invalid_type("notes.txt").to_string(),
            "Invalid video file type: notes.txt"
        );
        assert_eq!(
            StreamError::UnsatisfiableRange { size: 100 }.to_string(),
            "Requested range not satisfiable for size 100"
        );
    }

    #[test]
    fn test_http_status_mapping() {
        assert_eq!(StreamError::MissingIdentifier.http_status(), 400);
        assert_eq!(StreamError::not_found("x").http_status(), 404);
        assert_eq!(StreamError::invalid_type("x").http_status(), 400);
        assert_eq!(StreamError::malformed_range("x").http_status(), 400);
        assert_eq!(StreamError::UnsatisfiableRange { size: 1 }.http_status(), 416);

        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(StreamError::from(io_err).http_status(), 500);
    }

    #[test]
    fn test_range_errors_have_no_json_body() {
        assert!(!StreamError::malformed_range("bytes=x").has_json_body());
        assert!(!StreamError::UnsatisfiableRange { size: 5 }.has_json_body());
        assert!(StreamError::MissingIdentifier.has_json_body());
        assert!(StreamError::not_found("x").has_json_body());
    }

    #[test]
    fn test_io_message_is_generic() {
        let err = StreamError::from(std::io::Error::other("disk on fire"));
        assert_eq!(err.public_message(), "Internal server error");
        assert!(err.to_string().contains("disk on fire"));
    }
}
