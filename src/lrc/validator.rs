/*!
 * Validation for synchronized LRC lyrics.
 *
 * The validator consumes raw lyric text and produces a complete, ordered
 * list of diagnostics rather than failing on the first problem. Issues are
 * data, classified as errors or warnings, and the caller decides what to do
 * with them. Three cross-line passes (ordering, gaps, near-overlaps) run
 * after the per-line pass, over adjacent pairs of successfully timed lines.
 */

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::lrc::classifier::{LineClass, classify};
use crate::lrc::timestamp::{
    STRICT_LINE_REGEX, WORD_TIMING_REGEX, has_word_timing, parse_timestamp,
};

/// Largest tolerated gap between adjacent timed lines before a warning
pub const MAX_GAP_MS: i64 = 30_000;

/// Adjacent lines closer than this (but not equal) are flagged as overlapping
pub const OVERLAP_WINDOW_MS: i64 = 100;

/// Maximum characters of content echoed in the no-timestamps diagnostic
const PREVIEW_LEN: usize = 100;

/// The closed set of diagnostics the validator can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IssueType {
    /// More than one bracket timestamp on a single line
    MultiTimestamp,
    /// Embedded `<mm:ss.xx>` word-level timing (ELRC)
    ElrcWordTiming,
    /// Bracket token present but unparseable
    InvalidTimestamp,
    /// Timestamp resolved to a negative offset (defensive; the digit-only
    /// token pattern cannot actually produce one)
    NegativeTimestamp,
    /// Millisecond value already used by an earlier line
    DuplicateTimestamp,
    /// Line has a parseable timestamp but does not match the strict
    /// `[mm:ss.xx]text` shape
    InvalidFormat,
    /// Timestamp earlier than the immediately preceding timed line
    OutOfOrder,
    /// Adjacent gap larger than [`MAX_GAP_MS`]
    ExcessiveGap,
    /// Adjacent gap strictly between zero and [`OVERLAP_WINDOW_MS`]
    TimestampOverlap,
    /// Non-empty content with no successfully timed lines at all
    NoTimestamps,
}

impl IssueType {
    /// Every member of the enum, in a stable order. Used to zero-initialize
    /// the per-type counters so absent types still appear with a count of 0.
    pub const ALL: [IssueType; 10] = [
        IssueType::MultiTimestamp,
        IssueType::ElrcWordTiming,
        IssueType::InvalidTimestamp,
        IssueType::NegativeTimestamp,
        IssueType::DuplicateTimestamp,
        IssueType::InvalidFormat,
        IssueType::OutOfOrder,
        IssueType::ExcessiveGap,
        IssueType::TimestampOverlap,
        IssueType::NoTimestamps,
    ];

    /// Kebab-case identifier used in reports and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::MultiTimestamp => "multi-timestamp",
            IssueType::ElrcWordTiming => "elrc-word-timing",
            IssueType::InvalidTimestamp => "invalid-timestamp",
            IssueType::NegativeTimestamp => "negative-timestamp",
            IssueType::DuplicateTimestamp => "duplicate-timestamp",
            IssueType::InvalidFormat => "invalid-format",
            IssueType::OutOfOrder => "out-of-order",
            IssueType::ExcessiveGap => "excessive-gap",
            IssueType::TimestampOverlap => "timestamp-overlap",
            IssueType::NoTimestamps => "no-timestamps",
        }
    }
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single diagnostic, immutable once created
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// 1-based line number in the input
    pub line: usize,
    /// Which rule fired
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    /// Error or warning
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// Original line text
    pub raw: String,
    /// Matched timestamp tokens, where relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Vec<String>>,
    /// Suggested fix, where one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// A line that parsed to a single valid timestamp. Internal to the
/// cross-line passes; not part of the public result.
#[derive(Debug, Clone)]
struct TimedLine {
    timestamp_ms: i64,
    source_line: usize,
}

/// Complete outcome of validating one piece of content. Derived once,
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// True iff no issues were found
    pub is_valid: bool,
    /// All issues, in detection order
    pub issues: Vec<ValidationIssue>,
    /// At least one multi-timestamp line was seen
    pub has_multi_timestamps: bool,
    /// At least one ELRC word-timing line was seen
    pub has_elrc: bool,
    /// At least one error-severity issue is present
    pub has_errors: bool,
    /// At least one warning-severity issue is present
    pub has_warnings: bool,
    /// Count of non-blank input lines
    pub total_lines: usize,
    /// Number of issues reported
    pub affected_lines: usize,
    /// Per-type counts over the full enum, zero-initialized
    pub issues_by_type: HashMap<IssueType, usize>,
}

impl ValidationResult {
    /// Build the derived result from the accumulated issue list
    fn from_issues(issues: Vec<ValidationIssue>, total_lines: usize) -> Self {
        let mut issues_by_type: HashMap<IssueType, usize> =
            IssueType::ALL.iter().map(|t| (*t, 0)).collect();
        let mut has_errors = false;
        let mut has_warnings = false;

        for issue in &issues {
            *issues_by_type.entry(issue.issue_type).or_insert(0) += 1;
            match issue.severity {
                Severity::Error => has_errors = true,
                Severity::Warning => has_warnings = true,
            }
        }

        let has_multi_timestamps = issues_by_type[&IssueType::MultiTimestamp] > 0;
        let has_elrc = issues_by_type[&IssueType::ElrcWordTiming] > 0;
        let affected_lines = issues.len();

        ValidationResult {
            is_valid: issues.is_empty(),
            issues,
            has_multi_timestamps,
            has_elrc,
            has_errors,
            has_warnings,
            total_lines,
            affected_lines,
            issues_by_type,
        }
    }
}

/// Validate LRC content, returning the full list of diagnostics and the
/// aggregate flags derived from it.
pub fn validate(content: &str) -> ValidationResult {
    let mut issues: Vec<ValidationIssue> = Vec::new();
    let mut timed: Vec<TimedLine> = Vec::new();
    let mut first_seen: HashMap<i64, usize> = HashMap::new();
    let mut total_lines = 0;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();

        let tokens = match classify(line) {
            LineClass::Blank => continue,
            LineClass::Metadata => {
                total_lines += 1;
                continue;
            }
            LineClass::Plain => {
                total_lines += 1;
                // ELRC tokens can appear without any bracket timestamp
                if has_word_timing(line) {
                    issues.push(elrc_issue(line_no, line));
                }
                continue;
            }
            LineClass::Timestamped(tokens) => {
                total_lines += 1;
                tokens
            }
        };

        // Word-level timing is reported but does not stop timestamp checks
        if has_word_timing(line) {
            issues.push(elrc_issue(line_no, line));
        }

        if tokens.len() > 1 {
            issues.push(ValidationIssue {
                line: line_no,
                issue_type: IssueType::MultiTimestamp,
                severity: Severity::Warning,
                message: format!(
                    "Line carries {} timestamps; the standard format allows one",
                    tokens.len()
                ),
                raw: line.to_string(),
                timestamps: Some(tokens),
                suggestion: Some(
                    "Normalize the file to expand it into one line per timestamp".to_string(),
                ),
            });
            // Excluded from ordering, gap, and duplicate checks
            continue;
        }

        let token = &tokens[0];
        let ms = match parse_timestamp(token) {
            Ok(ms) => ms,
            Err(_) => {
                issues.push(ValidationIssue {
                    line: line_no,
                    issue_type: IssueType::InvalidTimestamp,
                    severity: Severity::Error,
                    message: format!("Could not parse timestamp token {}", token),
                    raw: line.to_string(),
                    timestamps: Some(tokens.clone()),
                    suggestion: Some("Use the [mm:ss.xx] timestamp format".to_string()),
                });
                continue;
            }
        };

        if ms < 0 {
            issues.push(ValidationIssue {
                line: line_no,
                issue_type: IssueType::NegativeTimestamp,
                severity: Severity::Error,
                message: format!("Timestamp {} resolves to a negative offset", token),
                raw: line.to_string(),
                timestamps: Some(tokens.clone()),
                suggestion: None,
            });
            continue;
        }

        if let Some(&first_line) = first_seen.get(&ms) {
            issues.push(ValidationIssue {
                line: line_no,
                issue_type: IssueType::DuplicateTimestamp,
                severity: Severity::Warning,
                message: format!("Timestamp {} already used on line {}", token, first_line),
                raw: line.to_string(),
                timestamps: Some(tokens.clone()),
                suggestion: None,
            });
        } else {
            first_seen.insert(ms, line_no);
        }

        timed.push(TimedLine {
            timestamp_ms: ms,
            source_line: line_no,
        });

        // Stray characters around an otherwise valid token
        if !STRICT_LINE_REGEX.is_match(line) {
            issues.push(ValidationIssue {
                line: line_no,
                issue_type: IssueType::InvalidFormat,
                severity: Severity::Error,
                message: "Line does not match the [mm:ss.xx]text shape".to_string(),
                raw: line.to_string(),
                timestamps: Some(tokens.clone()),
                suggestion: Some("Remove any text before the opening bracket".to_string()),
            });
        }
    }

    // Cross-line passes over adjacent pairs of timed lines
    for pair in timed.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let gap = cur.timestamp_ms - prev.timestamp_ms;

        if gap < 0 {
            issues.push(ValidationIssue {
                line: cur.source_line,
                issue_type: IssueType::OutOfOrder,
                severity: Severity::Warning,
                message: format!(
                    "Timestamp is earlier than line {} before it",
                    prev.source_line
                ),
                raw: String::new(),
                timestamps: None,
                suggestion: Some("Sort the file to restore chronological order".to_string()),
            });
        } else if gap > MAX_GAP_MS {
            let secs = ((gap as f64) / 1000.0).round() as i64;
            issues.push(ValidationIssue {
                line: cur.source_line,
                issue_type: IssueType::ExcessiveGap,
                severity: Severity::Warning,
                message: format!("Gap of {}s since line {}", secs, prev.source_line),
                raw: String::new(),
                timestamps: None,
                suggestion: None,
            });
        } else if gap > 0 && gap < OVERLAP_WINDOW_MS {
            issues.push(ValidationIssue {
                line: cur.source_line,
                issue_type: IssueType::TimestampOverlap,
                severity: Severity::Warning,
                message: format!("Only {}ms after line {}", gap, prev.source_line),
                raw: String::new(),
                timestamps: None,
                suggestion: None,
            });
        }
    }

    // Content present but nothing timed at all
    if total_lines > 0 && timed.is_empty() {
        issues.push(ValidationIssue {
            line: 1,
            issue_type: IssueType::NoTimestamps,
            severity: Severity::Error,
            message: "No synchronized timestamps found in content".to_string(),
            raw: preview(content),
            timestamps: None,
            suggestion: Some("Prefix each lyric line with a [mm:ss.xx] timestamp".to_string()),
        });
    }

    ValidationResult::from_issues(issues, total_lines)
}

fn elrc_issue(line_no: usize, line: &str) -> ValidationIssue {
    let word_tokens: Vec<String> = WORD_TIMING_REGEX
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .collect();
    ValidationIssue {
        line: line_no,
        issue_type: IssueType::ElrcWordTiming,
        severity: Severity::Error,
        message: "ELRC word-level timing is not supported".to_string(),
        raw: line.to_string(),
        timestamps: Some(word_tokens),
        suggestion: Some("Remove the <mm:ss.xx> word timing tokens".to_string()),
    }
}

/// First 100 characters of the content, with an ellipsis when truncated
fn preview(content: &str) -> String {
    let truncated: String = content.chars().take(PREVIEW_LEN).collect();
    if content.chars().count() > PREVIEW_LEN {
        format!("{}...", truncated)
    } else {
        truncated
    }
}
