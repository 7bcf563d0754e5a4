/*!
 * Normalization of non-standard LRC content.
 *
 * The normalizer expands multi-timestamp lines (a compact notation marking
 * several occurrences of a repeated lyric) into one line per timestamp and
 * re-emits every touched token with a canonical two-digit fraction. It also
 * extracts the plain-text lyric track used for the unsynchronized field of
 * a publish request.
 */

use crate::lrc::classifier::{LineClass, classify};
use crate::lrc::timestamp::{METADATA_REGEX, TIMESTAMP_REGEX, format_timestamp, parse_timestamp};

/// Outcome of a normalization pass
#[derive(Debug, Clone)]
pub struct NormalizationResult {
    /// The normalized synced-lyrics text
    pub normalized: String,
    /// Plain lyric track extracted from the normalized text
    pub plain_lyrics: String,
    /// Number of source lines that were rewritten
    pub changes: usize,
    /// Total output lines produced from those rewrites
    pub expanded_lines: usize,
}

/// Normalize LRC content. Blank, metadata, and single-timestamp lines pass
/// through unchanged; a line with N > 1 timestamp tokens is expanded into N
/// lines, each carrying the text that followed the last token on the
/// original line. Text before or between earlier tokens is discarded.
pub fn normalize(content: &str) -> NormalizationResult {
    let mut output: Vec<String> = Vec::new();
    let mut changes = 0;
    let mut expanded_lines = 0;

    for raw_line in content.lines() {
        // Classification ignores surrounding whitespace, but untouched
        // lines are emitted byte-identically
        let line = raw_line.trim();

        let tokens = match classify(line) {
            LineClass::Timestamped(tokens) if tokens.len() > 1 => tokens,
            _ => {
                output.push(raw_line.to_string());
                continue;
            }
        };

        let last_end = TIMESTAMP_REGEX
            .find_iter(line)
            .last()
            .map(|m| m.end())
            .unwrap_or(0);
        let lyric_text = &line[last_end..];

        for token in &tokens {
            output.push(format!("[{}]{}", canonical_body(token), lyric_text));
        }

        changes += 1;
        expanded_lines += tokens.len();
    }

    let normalized = output.join("\n");
    let plain_lyrics = extract_plain_lyrics(&normalized);

    NormalizationResult {
        normalized,
        plain_lyrics,
        changes,
        expanded_lines,
    }
}

/// Canonical `mm:ss.xx` body for a matched token, rounding three-digit
/// fractions to the nearest 10 ms. Falls back to the original body when the
/// token does not parse.
fn canonical_body(token: &str) -> String {
    match parse_timestamp(token) {
        Ok(ms) => format_timestamp(ms),
        Err(_) => token.trim_matches(['[', ']']).to_string(),
    }
}

/// Extract the plain lyric track: metadata lines and timestamp prefixes are
/// stripped, lines left empty are dropped, and the rest joined with
/// newlines in document order.
pub fn extract_plain_lyrics(content: &str) -> String {
    content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty() && !METADATA_REGEX.is_match(l))
        .map(|l| TIMESTAMP_REGEX.replace_all(l, "").trim().to_string())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
