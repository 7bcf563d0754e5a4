/*!
 * # lrcpress - LRC validation and publishing
 *
 * A Rust library and CLI for validating, normalizing, and publishing
 * synchronized lyrics (LRC files) to a public lyrics database.
 *
 * ## Features
 *
 * - Validate synced lyrics against the LRC format, producing ordered
 *   diagnostics rather than hard failures
 * - Normalize non-standard multi-timestamp lines into one line per
 *   timestamp
 * - Sort lyric lines chronologically, keeping metadata first
 * - Solve the database's proof-of-work publish challenge on a dedicated
 *   worker with cancellation and progress reporting
 * - Publish submissions over HTTP with the solved token
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `lrc`: the synced-lyrics integrity engine:
 *   - `lrc::timestamp`: bracket timestamp codec
 *   - `lrc::classifier`: line classification
 *   - `lrc::validator`: the validation rule set
 *   - `lrc::normalizer`: multi-timestamp expansion and plain lyrics
 *   - `lrc::sorter`: chronological reordering
 * - `challenge`: proof-of-work solver and its event protocol
 * - `client`: HTTP client for the lyrics database
 * - `live`: debounced re-validation for interactive editing
 * - `app_config`: configuration management
 * - `app_controller`: main application controller
 * - `file_utils`: file system operations
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod challenge;
pub mod client;
pub mod errors;
pub mod file_utils;
pub mod live;
pub mod lrc;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, TrackMetadata};
pub use challenge::{Challenge, SolveEvent, SolverConfig, SolverHandle};
pub use client::{LyricsDbClient, PublishRequest};
pub use errors::{ApiError, AppError, SolverError};
pub use lrc::{NormalizationResult, ValidationIssue, ValidationResult};
