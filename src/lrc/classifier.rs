/*!
 * Line classification for LRC content.
 *
 * Splits raw lyric text into lines and decides what each one is before any
 * timestamp parsing happens. Metadata recognition runs first so that tag
 * lines like `[ar:...]` are never mistaken for malformed lyric timestamps.
 */

use crate::lrc::timestamp::{METADATA_REGEX, extract_tokens};

/// Classification of a single trimmed line of LRC content
#[derive(Debug, Clone, PartialEq)]
pub enum LineClass {
    /// Empty after trimming
    Blank,
    /// A `[tag:value]` metadata line (ti, ar, al, length, offset)
    Metadata,
    /// A line carrying one or more bracket timestamp tokens
    Timestamped(Vec<String>),
    /// Non-empty text with no timestamps
    Plain,
}

/// Classify one line of LRC content. The caller is expected to have
/// trimmed the line already.
pub fn classify(line: &str) -> LineClass {
    if line.is_empty() {
        return LineClass::Blank;
    }

    // Metadata check must precede timestamp extraction
    if METADATA_REGEX.is_match(line) {
        return LineClass::Metadata;
    }

    let tokens = extract_tokens(line);
    if tokens.is_empty() {
        LineClass::Plain
    } else {
        LineClass::Timestamped(tokens)
    }
}
