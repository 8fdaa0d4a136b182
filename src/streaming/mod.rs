//! Video streaming module.
//!
//! Serves files from the configured content root with HTTP range request
//! support, so browsers can seek and resume playback.
//!
//! # Routes
//!
//! - `GET /stream?file={name}` - Stream by query parameter
//! - `GET /stream/{name}` - Stream by path segment
//!
//! Both honour `Range: bytes=START-END` and answer `HEAD` without a body.

mod body;
mod range;
mod response;
mod streamer;

pub use body::ChunkStream;
pub use range::{parse_range_header, resolve_range, ByteRange};
pub use response::{ResponseBody, StreamResponse};
pub use streamer::{RangeStreamer, ResolvedFile, StreamRequest};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    routing::get,
    Extension, Router,
};
use serde::Deserialize;

use crate::server::request_id::RequestId;
use crate::server::AppContext;

/// Create the streaming router.
pub fn stream_router() -> Router<AppContext> {
    Router::new()
        .route("/", get(stream_by_query))
        .route("/:file", get(stream_by_path))
}

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub file: Option<String>,
}

/// Stream the file named by the `file` query parameter.
pub async fn stream_by_query(
    State(ctx): State<AppContext>,
    request_id: Option<Extension<RequestId>>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> StreamResponse {
    let file = query.file.unwrap_or_default();
    serve(&ctx, request_id.map(|Extension(id)| id), file, &headers).await
}

/// Stream the file named by the last path segment.
pub async fn stream_by_path(
    State(ctx): State<AppContext>,
    request_id: Option<Extension<RequestId>>,
    Path(file): Path<String>,
    headers: HeaderMap,
) -> StreamResponse {
    serve(&ctx, request_id.map(|Extension(id)| id), file, &headers).await
}

async fn serve(
    ctx: &AppContext,
    request_id: Option<RequestId>,
    file: String,
    headers: &HeaderMap,
) -> StreamResponse {
    // Routers built without the middleware still get an id in the log line.
    let request_id = request_id.unwrap_or_else(RequestId::generate);
    if !file.is_empty() {
        tracing::info!(request_id = %request_id, "Video requested: {}", file);
    }

    // Non-UTF-8 values are kept (lossily) so they fail range parsing as
    // malformed instead of being ignored.
    let range_header = headers
        .get(header::RANGE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    let request = StreamRequest {
        file_identifier: file,
        range_header,
    };

    ctx.streamer.handle(request).await
}
