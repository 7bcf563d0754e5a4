/*!
 * Debounced re-validation for interactive editing.
 *
 * When content is being edited, every revision reschedules a pending
 * validation run; the validator only actually executes after an idle
 * window with no further revisions. At most one validation is in flight
 * per scheduler, and a superseded run is aborted before its result is
 * delivered.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::lrc::{ValidationResult, validate};

/// Default idle window before a scheduled validation runs
pub const DEFAULT_IDLE_WINDOW: Duration = Duration::from_millis(1000);

/// Debouncing scheduler around the validator
pub struct LiveValidator {
    idle_window: Duration,
    results: mpsc::Sender<ValidationResult>,
    // Bumped on every submit and cancel; a run only delivers its result
    // while its generation is still the latest. Abort alone is not enough:
    // a run already past its sleep cannot be stopped mid-validation.
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl LiveValidator {
    /// Create a scheduler with the given idle window, returning it
    /// together with the receiving side of the result channel.
    pub fn new(idle_window: Duration) -> (Self, mpsc::Receiver<ValidationResult>) {
        let (tx, rx) = mpsc::channel(4);
        (
            Self {
                idle_window,
                results: tx,
                generation: Arc::new(AtomicU64::new(0)),
                pending: None,
            },
            rx,
        )
    }

    /// Create a scheduler with the default one-second idle window - used
    /// by external consumers
    #[allow(dead_code)]
    pub fn with_default_window() -> (Self, mpsc::Receiver<ValidationResult>) {
        Self::new(DEFAULT_IDLE_WINDOW)
    }

    /// Submit the latest content revision. Any pending run is cancelled
    /// and a new one is scheduled after the idle window.
    pub fn submit(&mut self, content: String) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        let latest = Arc::clone(&self.generation);
        let tx = self.results.clone();
        let window = self.idle_window;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            let result = validate(&content);
            // A newer revision may have arrived while we were validating
            if latest.load(Ordering::Acquire) == generation {
                let _ = tx.send(result).await;
            }
        }));
    }

    /// Cancel any pending run without scheduling a new one
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::AcqRel);
    }
}

impl Drop for LiveValidator {
    fn drop(&mut self) {
        self.cancel();
    }
}
