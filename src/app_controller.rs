use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};

use crate::app_config::Config;
use crate::challenge::{self, SolveEvent};
use crate::client::{LyricsDbClient, PublishRequest};
use crate::file_utils::FileManager;
use crate::live::LiveValidator;
use crate::lrc::{self, Severity, ValidationResult};

// @module: Application controller for the validate/normalize/publish flows

/// Track metadata accompanying a publish request
#[derive(Debug, Clone)]
pub struct TrackMetadata {
    /// Track title
    pub track_name: String,
    /// Artist name
    pub artist_name: String,
    /// Album name, if known
    pub album_name: Option<String>,
    /// Duration in seconds, if known
    pub duration: Option<u32>,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
    // @field: Lyrics database client
    client: LyricsDbClient,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        let client = LyricsDbClient::with_timeout(config.api.endpoint.clone(), config.api.timeout_secs);
        Ok(Self { config, client })
    }

    /// Debounced validator configured with this controller's idle window,
    /// for callers re-validating content while it is being edited.
    pub fn live_validator(
        &self,
    ) -> (LiveValidator, tokio::sync::mpsc::Receiver<ValidationResult>) {
        LiveValidator::new(Duration::from_millis(self.config.live.idle_window_ms))
    }

    /// Validate an LRC file and print a report. Returns the full result so
    /// the caller can decide the exit status.
    pub fn run_validate(&self, input: &Path, json: bool) -> Result<ValidationResult> {
        let content = FileManager::read_to_string(input)?;
        let result = lrc::validate(&content);

        if json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            Self::print_report(input, &result);
        }

        Ok(result)
    }

    /// Normalize and sort an LRC file, writing the result next to the
    /// input unless an explicit output path is given.
    pub fn run_normalize(&self, input: &Path, output: Option<PathBuf>) -> Result<()> {
        let content = FileManager::read_to_string(input)?;
        let result = lrc::normalize_and_sort(&content);

        let output = output.unwrap_or_else(|| FileManager::suffixed_output_path(input, "normalized"));
        FileManager::write_string(&output, &result.normalized)?;

        if result.changes > 0 {
            info!(
                "Rewrote {} multi-timestamp line(s) into {} line(s)",
                result.changes, result.expanded_lines
            );
        } else {
            info!("No multi-timestamp lines to rewrite");
        }
        info!("Wrote normalized lyrics to {}", output.display());

        Ok(())
    }

    /// Sort an LRC file chronologically without normalizing it.
    pub fn run_sort(&self, input: &Path, output: Option<PathBuf>) -> Result<()> {
        let content = FileManager::read_to_string(input)?;
        let sorted = lrc::sort(&content);

        let output = output.unwrap_or_else(|| FileManager::suffixed_output_path(input, "sorted"));
        FileManager::write_string(&output, &sorted)?;
        info!("Wrote sorted lyrics to {}", output.display());

        Ok(())
    }

    /// Full publish flow: validate, gate, normalize, solve the
    /// proof-of-work challenge, and submit.
    pub async fn run_publish(&self, input: &Path, metadata: TrackMetadata, force: bool) -> Result<()> {
        let content = FileManager::read_to_string(input)?;
        let result = lrc::validate(&content);

        if !result.is_valid {
            Self::print_report(input, &result);
        }

        // The gate inspects only the multi-timestamp flag; other
        // error-severity diagnostics are advisory
        if result.has_multi_timestamps && !force {
            return Err(anyhow!(
                "Submission blocked: {} multi-timestamp line(s) present. \
                 Normalize the file first, or pass --force to continue anyway",
                result.issues_by_type[&lrc::IssueType::MultiTimestamp]
            ));
        }

        if !result.is_valid {
            warn!(
                "Proceeding with {} unresolved issue(s)",
                result.issues.len()
            );
        }

        let pipeline = lrc::normalize_and_sort(&content);
        if pipeline.changes > 0 {
            info!(
                "Normalized {} multi-timestamp line(s) before publishing",
                pipeline.changes
            );
        }

        info!("Requesting publish challenge from {}", self.client.endpoint());
        let challenge = self.client.request_challenge().await?;
        debug!("Challenge prefix {} target {}", challenge.prefix, challenge.target);

        let prefix = challenge.prefix.clone();
        let nonce = self.solve_with_progress(challenge).await?;
        let token = challenge::build_token(&prefix, nonce);

        let request = PublishRequest {
            track_name: metadata.track_name,
            artist_name: metadata.artist_name,
            album_name: metadata.album_name,
            duration: metadata.duration,
            plain_lyrics: pipeline.plain_lyrics,
            synced_lyrics: pipeline.normalized,
        };

        self.client.publish(&request, &token).await?;
        info!("Lyrics published successfully");

        Ok(())
    }

    /// Drive the solver to completion while feeding a progress spinner.
    async fn solve_with_progress(&self, challenge: challenge::Challenge) -> Result<u64> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Solving proof-of-work challenge...");

        let mut handle = challenge::spawn(challenge, self.config.solver_config());

        let outcome = loop {
            match handle.recv().await {
                Some(SolveEvent::Progress(progress)) => {
                    let elapsed = handle.started().elapsed().as_secs_f64();
                    let rate = if elapsed > 0.0 {
                        progress.attempts as f64 / elapsed
                    } else {
                        0.0
                    };
                    spinner.set_message(format!(
                        "Solving challenge: {} attempts ({:.0}/s)",
                        progress.attempts, rate
                    ));
                }
                Some(SolveEvent::Solved { nonce }) => break Ok(nonce),
                Some(SolveEvent::Failed { message }) => break Err(anyhow!(message)),
                None => break Err(anyhow!("Challenge solve was cancelled")),
            }
        };

        match &outcome {
            Ok(nonce) => spinner.finish_with_message(format!("Challenge solved (nonce {})", nonce)),
            Err(_) => spinner.finish_with_message("Challenge solve failed"),
        }

        outcome
    }

    /// Human-readable validation report on stdout
    fn print_report(input: &Path, result: &ValidationResult) {
        if result.is_valid {
            println!(
                "{}: OK ({} non-blank line(s), no issues)",
                input.display(),
                result.total_lines
            );
            return;
        }

        println!(
            "{}: {} issue(s) across {} non-blank line(s)",
            input.display(),
            result.issues.len(),
            result.total_lines
        );

        for issue in &result.issues {
            println!(
                "  line {:>4}  {:<7}  {}: {}",
                issue.line,
                issue.severity.to_string(),
                issue.issue_type,
                issue.message
            );
            if let Some(suggestion) = &issue.suggestion {
                println!("             hint: {}", suggestion);
            }
        }

        let errors = result
            .issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        let warnings = result.issues.len() - errors;
        println!("  {} error(s), {} warning(s)", errors, warnings);
    }
}
