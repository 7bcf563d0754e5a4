/*!
 * Tests for normalization and plain-lyrics extraction
 */

use lrcpress::lrc::{self, validate};

use crate::common;

/// Expansion law: N timestamps with text T become N lines `[ts_i] T`
#[test]
fn test_normalize_expansionLaw_shouldProduceOneLinePerTimestamp() {
    let result = lrc::normalize("[00:10.00][00:45.00][01:20.00][02:00.00]Take me home");

    let lines: Vec<&str> = result.normalized.lines().collect();
    assert_eq!(lines.len(), 4);
    for line in &lines {
        assert!(line.ends_with("Take me home"));
    }
    assert_eq!(result.changes, 1);
    assert_eq!(result.expanded_lines, 4);
}

/// Normalizing the multi-timestamp sample resolves its validation warning
#[test]
fn test_normalize_thenValidate_shouldClearMultiTimestampFlag() {
    let before = validate(common::multi_timestamp_lrc());
    assert!(before.has_multi_timestamps);

    let normalized = lrc::normalize_and_sort(common::multi_timestamp_lrc());
    let after = validate(&normalized.normalized);

    assert!(!after.has_multi_timestamps);
    assert!(after.is_valid);
}

/// Idempotence: already-normalized, already-sorted content is returned
/// byte-identical with zero changes
#[test]
fn test_normalizeAndSort_onNormalizedInput_shouldBeIdentity() {
    let first = lrc::normalize_and_sort(common::multi_timestamp_lrc());
    let second = lrc::normalize_and_sort(&first.normalized);

    assert_eq!(second.normalized, first.normalized);
    assert_eq!(second.changes, 0);
    assert_eq!(second.expanded_lines, 0);
}

/// Round-trip: plain lyrics of the normalized+sorted output carry only the
/// timed lyric text, chronologically, without metadata or empty lines
#[test]
fn test_extractPlainLyrics_afterPipeline_shouldBeChronological() {
    let content = "\
[ti:Song]
[00:30.00]Third
[00:10.00][00:40.00]Hook
[00:20.00]Second

[00:50.00]";
    let result = lrc::normalize_and_sort(content);

    assert_eq!(result.plain_lyrics, "Hook\nSecond\nThird\nHook");
}

/// Three-digit fractions on rewritten lines are rounded to two digits
#[test]
fn test_normalize_multiTimestampWithMillis_shouldRoundFractions() {
    let result = lrc::normalize("[00:10.456][00:20.004]Line");

    assert_eq!(result.normalized, "[00:10.46]Line\n[00:20.00]Line");
}

/// Metadata lines survive normalization untouched
#[test]
fn test_normalize_shouldPreserveMetadataLines() {
    let result = lrc::normalize(common::sample_lrc());

    assert!(result.normalized.contains("[ti:Test Song]"));
    assert!(result.normalized.contains("[ar:Test Artist]"));
    assert_eq!(result.changes, 0);
}
