use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

// @module: File utilities for LRC content

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence - used by tests and external consumers
    #[allow(dead_code)]
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @reads: Whole file as UTF-8 text
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        let path = path.as_ref();
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    // @writes: Text content, creating parent directories if needed
    pub fn write_string<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))
    }

    // @generates: Output path with a suffix inserted before the extension
    // @example: song.lrc + "normalized" -> song.normalized.lrc
    pub fn suffixed_output_path<P: AsRef<Path>>(input_file: P, suffix: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default();
        let extension = input_file
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_else(|| "lrc".to_string());

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(suffix);
        output_filename.push('.');
        output_filename.push_str(&extension);

        input_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(output_filename)
    }
}
