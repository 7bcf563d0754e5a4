/*!
 * Synced-lyrics integrity engine.
 *
 * This module implements the LRC processing pipeline:
 * - Classification of raw lines (blank, metadata, timestamped, plain)
 * - Timestamp parsing and canonical formatting
 * - Validation producing ordered diagnostics and aggregate flags
 * - Normalization of non-standard multi-timestamp lines
 * - Chronological sorting
 *
 * # Architecture
 *
 * - `timestamp`: bracket token codec and the shared regexes
 * - `classifier`: line classification, run before timestamp extraction
 * - `validator`: rule set over classified lines
 * - `normalizer`: multi-timestamp expansion and plain-lyrics extraction
 * - `sorter`: chronological reorder and the combined pipeline
 *
 * All functions here are pure and synchronous; they hold no shared state
 * and can be called concurrently from independent callers.
 */

pub mod timestamp;
pub mod classifier;
pub mod validator;
pub mod normalizer;
pub mod sorter;

// Re-export main types
pub use classifier::LineClass;
pub use normalizer::{NormalizationResult, extract_plain_lyrics, normalize};
pub use sorter::{normalize_and_sort, sort};
pub use validator::{IssueType, Severity, ValidationIssue, ValidationResult, validate};
