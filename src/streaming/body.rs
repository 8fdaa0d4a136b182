//! Lazy, bounded-chunk file body.
//!
//! [`ChunkStream`] owns the open file handle. The handle is closed when the
//! stream reaches its byte count, fails, or is dropped early because hyper
//! discarded the body after the client went away.

use std::io::{self, SeekFrom};
use std::path::Path;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt, Take};
use tokio_util::io::ReaderStream;

/// Finite, non-restartable sequence of file chunks.
///
/// Yields at most `chunk_size` bytes per item and exactly `len` bytes in
/// total; the final chunk is clipped to the remaining count.
pub struct ChunkStream {
    inner: ReaderStream<Take<File>>,
    pending: Option<Bytes>,
    chunk_size: usize,
    expected: u64,
    emitted: u64,
    finished: bool,
    label: String,
}

impl ChunkStream {
    /// Open `path`, seek to `offset` and prepare to emit `len` bytes.
    pub async fn open(path: &Path, offset: u64, len: u64, chunk_size: usize) -> io::Result<Self> {
        let mut file = File::open(path).await?;
        if offset > 0 {
            file.seek(SeekFrom::Start(offset)).await?;
        }

        let chunk_size = chunk_size.max(1);
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            inner: ReaderStream::with_capacity(file.take(len), chunk_size),
            pending: None,
            chunk_size,
            expected: len,
            emitted: 0,
            finished: len == 0,
            label,
        })
    }

    /// Total number of bytes this stream will emit.
    pub fn expected_len(&self) -> u64 {
        self.expected
    }

    /// Bytes emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    fn emit(&mut self, mut chunk: Bytes) -> Bytes {
        if chunk.len() > self.chunk_size {
            let head = chunk.split_to(self.chunk_size);
            self.pending = Some(chunk);
            chunk = head;
        }
        self.emitted += chunk.len() as u64;
        if self.emitted >= self.expected {
            self.finished = true;
        }
        chunk
    }
}

impl Stream for ChunkStream {
    type Item = io::Result<Bytes>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if let Some(rest) = this.pending.take() {
            return Poll::Ready(Some(Ok(this.emit(rest))));
        }
        if this.finished {
            return Poll::Ready(None);
        }

        match Pin::new(&mut this.inner).poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => Poll::Ready(Some(Ok(this.emit(chunk)))),
            Poll::Ready(Some(Err(e))) => {
                this.finished = true;
                tracing::warn!(
                    file = %this.label,
                    emitted = this.emitted,
                    expected = this.expected,
                    "Read failed mid-stream: {e}"
                );
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.finished = true;
                if this.emitted < this.expected {
                    // File shrank after it was stat-ed; Content-Length can no
                    // longer be honoured.
                    tracing::warn!(
                        file = %this.label,
                        emitted = this.emitted,
                        expected = this.expected,
                        "File ended before the advertised length"
                    );
                    return Poll::Ready(Some(Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "file truncated while streaming",
                    ))));
                }
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for ChunkStream {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(
                file = %self.label,
                emitted = self.emitted,
                expected = self.expected,
                "Stream dropped before completion; releasing file handle"
            );
        } else {
            tracing::trace!(file = %self.label, bytes = self.emitted, "Stream complete");
        }
    }
}
