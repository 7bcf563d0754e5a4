/*!
 * Common test utilities for the lrcpress test suite
 */

use std::fs;
use std::path::PathBuf;
use std::sync::Once;

use anyhow::Result;
use tempfile::TempDir;

static INIT_LOGGING: Once = Once::new();

/// Initializes logging for tests, honoring RUST_LOG. Safe to call from
/// every test; only the first call has any effect.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates a well-formed sample LRC file for testing
pub fn create_test_lrc(dir: &PathBuf, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, sample_lrc())
}

/// A well-formed LRC document with metadata and ordered timestamps
pub fn sample_lrc() -> &'static str {
    "[ti:Test Song]\n\
     [ar:Test Artist]\n\
     [al:Test Album]\n\
     [00:12.00]First verse line\n\
     [00:17.20]Second verse line\n\
     [00:21.10]Third verse line\n\
     [00:24.00]Chorus starts here\n"
}

/// An LRC document using the non-standard multi-timestamp notation
pub fn multi_timestamp_lrc() -> &'static str {
    "[ti:Repeats]\n\
     [00:05.00]Verse\n\
     [00:10.00][00:40.00]Chorus\n\
     [00:20.00]Bridge\n"
}
