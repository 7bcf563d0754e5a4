/*!
 * Timestamp codec for LRC lyric lines.
 *
 * Handles the bracketed `[mm:ss.xx]` / `[mm:ss.xxx]` tokens that prefix
 * synchronized lyric lines. All timing math in the crate is done in whole
 * milliseconds; three-digit fractional parts are rounded to the nearest
 * 10 ms on parse so that duplicate detection and sorting key on the same
 * value the formatter re-emits.
 */

use anyhow::{Result, anyhow};
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches every bracket timestamp token on a line (global scan)
pub static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[(\d{1,2}):(\d{2})\.(\d{2,3})\]").unwrap()
});

/// Matches ELRC word-level timing tokens embedded in lyric text
pub static WORD_TIMING_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\d{1,2}:\d{2}\.\d{2,3}>").unwrap()
});

/// Strict shape of a well-formed single-timestamp lyric line
pub static STRICT_LINE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\d{1,2}:\d{2}\.\d{2,3}\].*$").unwrap()
});

/// Metadata tag lines recognised by the LRC format
pub static METADATA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\[(ti|ar|al|length|offset):").unwrap()
});

/// Parse a bracket timestamp token to a millisecond offset.
///
/// Accepts `[mm:ss.xx]` and `[mm:ss.xxx]`; a three-digit fraction is
/// rounded to the nearest 10 ms before conversion. The return type is
/// signed so callers can keep a defensive negative check, even though the
/// digit-only token pattern cannot produce one.
pub fn parse_timestamp(token: &str) -> Result<i64> {
    let caps = TIMESTAMP_REGEX
        .captures(token)
        .ok_or_else(|| anyhow!("Invalid timestamp token: {}", token))?;

    let minutes: i64 = caps[1].parse()?;
    let seconds: i64 = caps[2].parse()?;
    let fraction = &caps[3];

    if seconds >= 60 {
        return Err(anyhow!("Seconds out of range in timestamp: {}", token));
    }

    let hundredths = normalize_fraction(fraction)?;

    Ok(minutes * 60_000 + seconds * 1_000 + hundredths * 10)
}

/// Convert a 2- or 3-digit fractional part to hundredths of a second,
/// rounding three-digit values to the nearest 10 ms.
fn normalize_fraction(fraction: &str) -> Result<i64> {
    match fraction.len() {
        2 => Ok(fraction.parse()?),
        3 => {
            let millis: i64 = fraction.parse()?;
            Ok((millis + 5) / 10)
        }
        _ => Err(anyhow!("Invalid fractional part: {}", fraction)),
    }
}

/// Format a millisecond offset as a canonical `mm:ss.xx` timestamp body
/// (no brackets, two-digit fraction).
pub fn format_timestamp(ms: i64) -> String {
    let ms = ms.max(0);
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let hundredths = (ms % 1_000) / 10;

    format!("{:02}:{:02}.{:02}", minutes, seconds, hundredths)
}

/// Extract all bracket timestamp tokens on a line, in order of appearance.
pub fn extract_tokens(line: &str) -> Vec<String> {
    TIMESTAMP_REGEX
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Check whether a line carries embedded ELRC word timings.
pub fn has_word_timing(line: &str) -> bool {
    WORD_TIMING_REGEX.is_match(line)
}
