/*!
 * Tests for the LRC validation rule set
 */

use lrcpress::lrc::{self, IssueType, Severity};

use crate::common;

/// A clean document produces no issues and correct counters
#[test]
fn test_validate_withSampleDocument_shouldBeValid() {
    let result = lrc::validate(common::sample_lrc());

    assert!(result.is_valid);
    assert!(!result.has_errors);
    assert!(!result.has_warnings);
    assert_eq!(result.total_lines, 7);
    assert_eq!(result.affected_lines, 0);
}

/// A document mixing several problems reports them all, in detection order
#[test]
fn test_validate_withMixedProblems_shouldReportAllInOrder() {
    let content = "\
[ti:Messy]
[00:10.00]Fine line
[00:05.00]Goes backwards
[00:05.00]Duplicate
[00:07.00][00:50.00]Multi
garbage[00:08.00]stray prefix
";
    let result = lrc::validate(content);

    assert!(!result.is_valid);
    assert!(result.has_errors);
    assert!(result.has_warnings);
    assert!(result.has_multi_timestamps);

    // Per-line issues come before the cross-line passes
    let types: Vec<IssueType> = result.issues.iter().map(|i| i.issue_type).collect();
    let multi_pos = types.iter().position(|t| *t == IssueType::MultiTimestamp).unwrap();
    let ooo_pos = types.iter().position(|t| *t == IssueType::OutOfOrder).unwrap();
    assert!(multi_pos < ooo_pos);

    assert_eq!(result.issues_by_type[&IssueType::DuplicateTimestamp], 1);
    assert_eq!(result.issues_by_type[&IssueType::InvalidFormat], 1);
}

/// Monotonic-order property from adjacent timed lines
#[test]
fn test_validate_outOfOrderPair_shouldWarnExactlyOnce() {
    let result = lrc::validate("[00:10.00]A\n[00:05.00]B");

    let ooo: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.issue_type == IssueType::OutOfOrder)
        .collect();
    assert_eq!(ooo.len(), 1);
    assert_eq!(ooo[0].line, 2);
    assert_eq!(ooo[0].severity, Severity::Warning);
}

/// Two lines sharing millisecond value 5000 reference the first occurrence
#[test]
fn test_validate_duplicateAt5000Ms_shouldReferenceFirstLine() {
    let result = lrc::validate("[00:05.00]first\n[00:05.00]second");

    let dup = result
        .issues
        .iter()
        .find(|i| i.issue_type == IssueType::DuplicateTimestamp)
        .expect("duplicate issue missing");
    assert_eq!(dup.line, 2);
    assert!(dup.message.contains("line 1"));
}

/// Gap between 0 ms and 35000 ms is reported with the rounded "35s" value
#[test]
fn test_validate_gapOf35Seconds_shouldIncludeRoundedSeconds() {
    let result = lrc::validate("[00:00.00]start\n[00:35.00]late");

    let gap = result
        .issues
        .iter()
        .find(|i| i.issue_type == IssueType::ExcessiveGap)
        .expect("gap issue missing");
    assert!(gap.message.contains("35s"));
    assert_eq!(gap.severity, Severity::Warning);
}

/// Non-empty content without any valid timestamp is a single error
#[test]
fn test_validate_contentWithoutTimestamps_shouldEmitOneError() {
    let result = lrc::validate("hello\nworld\nno timing here");

    assert!(!result.is_valid);
    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].issue_type, IssueType::NoTimestamps);
    assert_eq!(result.issues[0].severity, Severity::Error);
}

/// ELRC word timing is an error even when the bracket timestamp is valid
#[test]
fn test_validate_elrcLine_shouldFlagButStillTimeTheLine() {
    let content = "[00:05.00]<00:05.20>word <00:05.60>timing\n[00:10.00]normal";
    let result = lrc::validate(content);

    assert!(result.has_elrc);
    assert_eq!(result.issues_by_type[&IssueType::ElrcWordTiming], 1);
    // The line still participates in ordering checks, so a clean
    // follow-up line produces no out-of-order warning
    assert_eq!(result.issues_by_type[&IssueType::OutOfOrder], 0);
}

/// Multi-timestamp issues carry the matched tokens for the caller
#[test]
fn test_validate_multiTimestampIssue_shouldCarryTokens() {
    let result = lrc::validate(common::multi_timestamp_lrc());

    let issue = result
        .issues
        .iter()
        .find(|i| i.issue_type == IssueType::MultiTimestamp)
        .expect("multi-timestamp issue missing");
    let tokens = issue.timestamps.as_ref().unwrap();
    assert_eq!(tokens, &vec!["[00:10.00]".to_string(), "[00:40.00]".to_string()]);
}

/// Validation works the same on content read back from disk
#[test]
fn test_validate_fileFromDisk_shouldMatchInMemoryResult() {
    let temp_dir = common::create_temp_dir().unwrap();
    let path = common::create_test_lrc(&temp_dir.path().to_path_buf(), "song.lrc").unwrap();

    let from_disk = lrc::validate(&std::fs::read_to_string(&path).unwrap());
    let in_memory = lrc::validate(common::sample_lrc());

    assert_eq!(from_disk.is_valid, in_memory.is_valid);
    assert_eq!(from_disk.total_lines, in_memory.total_lines);
}

/// The JSON rendering uses the kebab-case public identifiers
#[test]
fn test_validationResult_jsonOutput_shouldUseKebabCaseTypes() {
    let result = lrc::validate("[00:05.00]A\n[00:05.00]B");
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["issues"][0]["type"], "duplicate-timestamp");
    assert_eq!(json["issues"][0]["severity"], "warning");
    assert_eq!(json["isValid"], false);
    assert_eq!(json["issuesByType"]["duplicate-timestamp"], 1);
}
