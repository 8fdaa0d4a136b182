//! Range-aware file streamer.
//!
//! [`RangeStreamer::handle`] takes one [`StreamRequest`] through
//! resolve → validate → range parse → response, and never fails: every
//! [`StreamError`] becomes a status code plus a minimal body.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{header, StatusCode};
use chrono::{Duration, Utc};
use vidstream_common::paths::{extension_lowercase, mime_for_extension};
use vidstream_common::{Result, StreamError};

use super::body::ChunkStream;
use super::range::{resolve_range, ByteRange};
use super::response::{ResponseBody, StreamResponse};
use crate::config::StreamingConfig;

/// `Expires` is never pushed further out than a year.
const MAX_EXPIRES_SECS: u64 = 365 * 24 * 60 * 60;

/// One incoming stream request.
#[derive(Debug, Clone, Default)]
pub struct StreamRequest {
    /// File name relative to the content root, as supplied by the caller.
    pub file_identifier: String,
    /// Raw `Range` header value, if any.
    pub range_header: Option<String>,
}

impl StreamRequest {
    pub fn new(file_identifier: impl Into<String>) -> Self {
        Self {
            file_identifier: file_identifier.into(),
            range_header: None,
        }
    }

    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range_header = Some(range.into());
        self
    }
}

/// A validated file inside the content root.
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub size: u64,
    pub mime_type: &'static str,
}

/// Stateless streamer over an immutable [`StreamingConfig`].
///
/// Cheap to clone; concurrent calls share nothing mutable.
#[derive(Debug, Clone)]
pub struct RangeStreamer {
    config: Arc<StreamingConfig>,
}

impl RangeStreamer {
    pub fn new(config: StreamingConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    /// Produce the response for `request`.
    pub async fn handle(&self, request: StreamRequest) -> StreamResponse {
        match self.try_handle(&request).await {
            Ok(response) => response,
            Err(err) => {
                if err.http_status() >= 500 {
                    tracing::error!(
                        file = %request.file_identifier,
                        error = %err,
                        "Video streaming error"
                    );
                } else {
                    tracing::debug!(
                        file = %request.file_identifier,
                        status = err.http_status(),
                        "Rejected stream request: {err}"
                    );
                }
                StreamResponse::from_error(&err)
            }
        }
    }

    async fn try_handle(&self, request: &StreamRequest) -> Result<StreamResponse> {
        let file = self.resolve(&request.file_identifier).await?;

        match request.range_header.as_deref() {
            None => self.full_content(&file).await,
            Some(value) => {
                let range = resolve_range(value, file.size)?;
                self.partial_content(&file, range).await
            }
        }
    }

    /// Resolve `identifier` to a regular, allow-listed file under the root.
    ///
    /// Only the last path component is used, so the result can never leave
    /// the content root.
    pub async fn resolve(&self, identifier: &str) -> Result<ResolvedFile> {
        let name = base_name(identifier).ok_or(StreamError::MissingIdentifier)?;
        if name == "." || name == ".." {
            return Err(StreamError::not_found(name));
        }

        let path = self.config.content_root.join(name);
        let metadata = match tokio::fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StreamError::not_found(name));
            }
            Err(e) => return Err(StreamError::Io(e)),
        };
        if !metadata.is_file() {
            return Err(StreamError::not_found(name));
        }

        let ext = extension_lowercase(Path::new(name)).unwrap_or_default();
        if !self.config.allows_extension(&ext) {
            return Err(StreamError::invalid_type(name));
        }

        Ok(ResolvedFile {
            path,
            size: metadata.len(),
            mime_type: mime_for_extension(&ext),
        })
    }

    async fn full_content(&self, file: &ResolvedFile) -> Result<StreamResponse> {
        let stream = ChunkStream::open(&file.path, 0, file.size, self.config.chunk_size).await?;

        Ok(self
            .success_headers(StatusCode::OK, file, file.size)
            .body(ResponseBody::Chunks(stream)))
    }

    async fn partial_content(&self, file: &ResolvedFile, range: ByteRange) -> Result<StreamResponse> {
        let stream =
            ChunkStream::open(&file.path, range.start, range.len(), self.config.chunk_size).await?;

        Ok(self
            .success_headers(StatusCode::PARTIAL_CONTENT, file, range.len())
            .header(header::CONTENT_RANGE, range.content_range(file.size))
            .body(ResponseBody::Chunks(stream)))
    }

    fn success_headers(&self, status: StatusCode, file: &ResolvedFile, length: u64) -> StreamResponse {
        let max_age = self.config.cache_max_age_secs;
        let expires = Utc::now() + Duration::seconds(max_age.min(MAX_EXPIRES_SECS) as i64);

        StreamResponse::new(status)
            .header(header::CONTENT_TYPE, file.mime_type)
            .header(header::ACCEPT_RANGES, "bytes")
            .header(header::CONTENT_LENGTH, length.to_string())
            .header(header::CACHE_CONTROL, format!("public, max-age={max_age}"))
            .header(header::EXPIRES, http_date(expires))
    }
}

/// Last path component of `identifier`, splitting on both `/` and `\`.
///
/// Trailing separators are ignored (`dir/` names `dir`) and the name is
/// otherwise kept verbatim, whitespace included.
fn base_name(identifier: &str) -> Option<&str> {
    identifier
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
}

/// IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`.
fn http_date(at: chrono::DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
