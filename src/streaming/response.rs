//! Transport-neutral stream response and its axum conversion.

use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use vidstream_common::StreamError;

use super::body::ChunkStream;

/// Body of a [`StreamResponse`].
pub enum ResponseBody {
    Empty,
    Json(serde_json::Value),
    Chunks(ChunkStream),
}

impl std::fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseBody::Empty => f.write_str("Empty"),
            ResponseBody::Json(value) => f.debug_tuple("Json").field(value).finish(),
            ResponseBody::Chunks(stream) => f
                .debug_struct("Chunks")
                .field("len", &stream.expected_len())
                .finish(),
        }
    }
}

/// Status, ordered headers and a lazy body.
///
/// Headers are kept in insertion order, which is also the order they are
/// written on the wire.
#[derive(Debug)]
pub struct StreamResponse {
    pub status: StatusCode,
    pub headers: Vec<(HeaderName, HeaderValue)>,
    pub body: ResponseBody,
}

impl StreamResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: ResponseBody::Empty,
        }
    }

    /// Append a header. Values that are not valid header text are skipped.
    pub fn header(mut self, name: HeaderName, value: impl AsRef<str>) -> Self {
        match HeaderValue::from_str(value.as_ref()) {
            Ok(v) => self.headers.push((name, v)),
            Err(_) => tracing::warn!("Dropping invalid value for header {name}"),
        }
        self
    }

    pub fn body(mut self, body: ResponseBody) -> Self {
        self.body = body;
        self
    }

    /// First value of header `name`, as text.
    pub fn header_value(&self, name: &HeaderName) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.to_str().ok())
    }

    /// Build the failure response for `err`.
    ///
    /// JSON kinds get `{ "error": true, "message", "code" }`; range failures
    /// get an empty body, with `Content-Range: bytes */size` on 416.
    pub fn from_error(err: &StreamError) -> Self {
        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = Self::new(status);

        if let StreamError::UnsatisfiableRange { size } = err {
            response = response.header(header::CONTENT_RANGE, format!("bytes */{size}"));
        }

        if err.has_json_body() {
            response = response
                .header(header::CONTENT_TYPE, "application/json")
                .body(ResponseBody::Json(json!({
                    "error": true,
                    "message": err.public_message(),
                    "code": status.as_u16(),
                })));
        }

        response
    }
}

impl IntoResponse for StreamResponse {
    fn into_response(self) -> Response {
        let body = match self.body {
            ResponseBody::Empty => Body::empty(),
            ResponseBody::Json(value) => Body::from(value.to_string()),
            ResponseBody::Chunks(stream) => Body::from_stream(stream),
        };

        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        for (name, value) in self.headers {
            headers.append(name, value);
        }
        response
    }
}
