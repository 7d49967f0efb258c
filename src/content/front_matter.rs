//! Front matter extraction.
//!
//! A source document begins with a `+++` marker line, followed by TOML
//! metadata, a second `+++` marker line, then the markdown body running to
//! end of input. The split is line-based: find the opening marker, then scan
//! for the next marker line. Marker-like text later in the body is inert.

use thiserror::Error;

/// The front matter delimiter, on its own line.
const MARKER: &str = "+++";

/// A document whose front matter block is missing or unterminated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedDocument {
    #[error("document does not begin with a `+++` delimiter line")]
    MissingOpeningDelimiter,

    #[error("front matter block is never closed by a `+++` delimiter line")]
    MissingClosingDelimiter,
}

/// Raw document text split at the front matter delimiters.
#[derive(Debug, PartialEq, Eq)]
pub struct RawDocument<'a> {
    /// Text between the two delimiter lines.
    pub front_matter: &'a str,
    /// Everything after the closing delimiter line. May be empty.
    pub body: &'a str,
}

/// Split a document into its front matter block and markdown body.
///
/// The first line must be the opening marker; the next marker line closes
/// the block. An empty body is valid. Delimiter lines may carry a trailing
/// `\r` so CRLF sources work unchanged.
pub fn extract(raw: &str) -> Result<RawDocument<'_>, MalformedDocument> {
    let after_open = strip_opening_marker(raw).ok_or(MalformedDocument::MissingOpeningDelimiter)?;

    let mut offset = 0;
    loop {
        let line_end = after_open[offset..].find('\n').map(|pos| offset + pos);
        let line = match line_end {
            Some(end) => &after_open[offset..end],
            None => &after_open[offset..],
        };

        if is_marker_line(line) {
            let front_matter = &after_open[..offset];
            let body = match line_end {
                Some(end) => &after_open[end + 1..],
                None => "",
            };
            return Ok(RawDocument { front_matter, body });
        }

        match line_end {
            Some(end) => offset = end + 1,
            None => return Err(MalformedDocument::MissingClosingDelimiter),
        }
    }
}

/// Return the text after the opening marker line, or `None` if the document
/// does not start with one.
fn strip_opening_marker(raw: &str) -> Option<&str> {
    match raw.find('\n') {
        Some(end) if is_marker_line(&raw[..end]) => Some(&raw[end + 1..]),
        // A document that is exactly `+++` opens a block that is never closed.
        None if is_marker_line(raw) => Some(""),
        _ => None,
    }
}

#[inline]
fn is_marker_line(line: &str) -> bool {
    line.strip_suffix('\r').unwrap_or(line) == MARKER
}
