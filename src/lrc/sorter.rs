/*!
 * Chronological reordering of LRC content.
 *
 * Metadata lines stay first, timestamped lines are stably sorted by their
 * millisecond value, and remaining non-empty text keeps its first-seen
 * order at the end. The combined normalize-and-sort pipeline re-derives the
 * plain lyric track from the sorted text, since sorting can reorder the
 * source of the extraction.
 */

use crate::lrc::classifier::{LineClass, classify};
use crate::lrc::normalizer::{NormalizationResult, extract_plain_lyrics, normalize};
use crate::lrc::timestamp::parse_timestamp;

/// Sort LRC content: metadata first, timestamped lines in chronological
/// order (stable on ties), then other non-empty lines.
pub fn sort(content: &str) -> String {
    let mut metadata: Vec<String> = Vec::new();
    let mut timed: Vec<(i64, String)> = Vec::new();
    let mut other: Vec<String> = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();

        match classify(line) {
            LineClass::Blank => {}
            LineClass::Metadata => metadata.push(line.to_string()),
            LineClass::Plain => other.push(line.to_string()),
            LineClass::Timestamped(tokens) => match parse_timestamp(&tokens[0]) {
                Ok(ms) => timed.push((ms, line.to_string())),
                Err(_) => other.push(line.to_string()),
            },
        }
    }

    timed.sort_by_key(|(ms, _)| *ms);

    metadata
        .into_iter()
        .chain(timed.into_iter().map(|(_, line)| line))
        .chain(other)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Normalize, then sort, then re-extract the plain lyric track from the
/// sorted result. `changes` and `expanded_lines` come from the
/// normalization pass.
pub fn normalize_and_sort(content: &str) -> NormalizationResult {
    let normalized = normalize(content);
    let sorted = sort(&normalized.normalized);
    let plain_lyrics = extract_plain_lyrics(&sorted);

    NormalizationResult {
        normalized: sorted,
        plain_lyrics,
        changes: normalized.changes,
        expanded_lines: normalized.expanded_lines,
    }
}
