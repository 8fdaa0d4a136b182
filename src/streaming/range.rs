//! `Range: bytes=START-END` parsing against a known file size.
//!
//! The header must start (after optional whitespace) with
//! `bytes=<digits>-<digits?>`. Whatever follows that prefix is ignored, so
//! for a range list only the first entry is served. Suffix ranges
//! (`bytes=-500`) do not match and are malformed.

use vidstream_common::StreamError;

/// Inclusive byte range inside a file, `start <= end < size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered, `end - start + 1`. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` value for a 206 response.
    pub fn content_range(&self, size: u64) -> String {
        format!("bytes {}-{}/{}", self.start, self.end, size)
    }
}

/// Syntactic parse of a `Range` header value.
///
/// Returns `(start, Option<end>)` where `end` is `None` when no digits follow
/// the dash, as in `bytes=500-`. Values too large for `u64` saturate, so they
/// fail the bounds check later instead of being reported as malformed.
pub fn parse_range_header(value: &str) -> Option<(u64, Option<u64>)> {
    let rest = value.trim_start().strip_prefix("bytes=")?;

    let (start, rest) = take_digits(rest);
    let start = start?;
    let rest = rest.strip_prefix('-')?;
    let (end, _ignored) = take_digits(rest);

    Some((start, end))
}

/// Split off the leading ASCII digit run of `s` and parse it.
fn take_digits(s: &str) -> (Option<u64>, &str) {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return (None, s);
    }
    let (digits, rest) = s.split_at(len);
    (Some(digits.parse().unwrap_or(u64::MAX)), rest)
}

/// Parse `value` and check it against a file of `size` bytes.
///
/// An `end` equal to `size` is rejected rather than clamped to `size - 1`.
pub fn resolve_range(value: &str, size: u64) -> Result<ByteRange, StreamError> {
    let (start, end) =
        parse_range_header(value).ok_or_else(|| StreamError::malformed_range(value))?;

    let unsatisfiable = StreamError::UnsatisfiableRange { size };
    if size == 0 || start >= size {
        return Err(unsatisfiable);
    }

    let end = end.unwrap_or(size - 1);
    if start > end || end >= size {
        return Err(unsatisfiable);
    }

    Ok(ByteRange { start, end })
}
