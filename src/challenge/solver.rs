/*!
 * Proof-of-work challenge solver.
 *
 * The lyrics database throttles automated submissions by issuing a puzzle
 * `{prefix, target}`: the client must find a nonce such that
 * `SHA-256(prefix ++ nonce)`, read as a big-endian unsigned integer, is at
 * or below the target. Smaller targets are exponentially harder.
 *
 * The search runs on a dedicated blocking task and communicates with its
 * caller exclusively through an event channel: zero or more progress
 * snapshots followed by exactly one terminal event. Progress events are
 * advisory and may be dropped when the channel is full; only the terminal
 * event is load-bearing and is delivered with a blocking send. The caller
 * can cancel at any time through the handle, after which no further events
 * are observed.
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use log::debug;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tokio::sync::mpsc;

use crate::errors::SolverError;

/// Buffered progress events before the transport starts dropping them
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Default number of attempts between progress snapshots
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 50_000;

/// A server-issued proof-of-work puzzle. Immutable and single-use.
#[derive(Debug, Clone, Deserialize)]
pub struct Challenge {
    /// Opaque string issued by the server
    pub prefix: String,
    /// Difficulty threshold as a 64-character hex string
    pub target: String,
}

/// Progress snapshot emitted periodically during a solve
#[derive(Debug, Clone, Copy)]
pub struct SolveProgress {
    /// Monotonically increasing attempt counter
    pub attempts: u64,
    /// Last nonce candidate tried
    pub last_nonce: u64,
}

/// Events delivered over the solver's channel
#[derive(Debug, Clone)]
pub enum SolveEvent {
    /// Advisory progress snapshot; may be coalesced or dropped
    Progress(SolveProgress),
    /// Terminal: a satisfying nonce was found
    Solved {
        /// The winning nonce
        nonce: u64,
    },
    /// Terminal: the search failed (bad target, ceiling reached)
    Failed {
        /// Human-readable failure description
        message: String,
    },
}

/// Tuning knobs for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Attempts between progress snapshots
    pub progress_interval: u64,
    /// Optional attempt ceiling; the default search is unbounded
    pub max_attempts: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_attempts: None,
        }
    }
}

/// Handle to a running solve: an event stream plus a cancel operation
pub struct SolverHandle {
    events: mpsc::Receiver<SolveEvent>,
    cancelled: Arc<AtomicBool>,
    started: Instant,
}

impl SolverHandle {
    /// Receive the next event, or `None` once the stream is finished
    pub async fn recv(&mut self) -> Option<SolveEvent> {
        self.events.recv().await
    }

    /// Stop the search. The worker observes the flag on its next
    /// iteration; any events still buffered in the channel are discarded
    /// so the caller sees nothing after cancellation.
    /// Used by tests and external consumers
    #[allow(dead_code)]
    pub fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::Relaxed);
        self.events.close();
        while self.events.try_recv().is_ok() {}
    }

    /// Wall-clock instant the search started
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Drive the solve to completion, discarding progress events, and
    /// return the winning nonce.
    pub async fn solve(mut self) -> Result<u64, SolverError> {
        while let Some(event) = self.recv().await {
            match event {
                SolveEvent::Progress(_) => {}
                SolveEvent::Solved { nonce } => return Ok(nonce),
                SolveEvent::Failed { message } => return Err(SolverError::Failed(message)),
            }
        }
        Err(SolverError::Cancelled)
    }
}

/// Spawn the search on a dedicated blocking task and return its handle.
pub fn spawn(challenge: Challenge, config: SolverConfig) -> SolverHandle {
    let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let cancelled = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancelled);

    tokio::task::spawn_blocking(move || run_search(challenge, config, tx, flag));

    SolverHandle {
        events: rx,
        cancelled,
        started: Instant::now(),
    }
}

/// The brute-force loop. Runs until a nonce satisfies the target, the
/// optional ceiling is reached, or the caller cancels.
fn run_search(
    challenge: Challenge,
    config: SolverConfig,
    tx: mpsc::Sender<SolveEvent>,
    cancelled: Arc<AtomicBool>,
) {
    let target = match decode_target(&challenge.target) {
        Ok(target) => target,
        Err(e) => {
            let _ = tx.blocking_send(SolveEvent::Failed {
                message: e.to_string(),
            });
            return;
        }
    };

    let interval = config.progress_interval.max(1);
    let mut nonce: u64 = 0;
    let mut attempts: u64 = 0;

    loop {
        if cancelled.load(Ordering::Relaxed) {
            debug!("Challenge solve cancelled after {} attempts", attempts);
            return;
        }

        if let Some(max) = config.max_attempts {
            if attempts >= max {
                let _ = tx.blocking_send(SolveEvent::Failed {
                    message: SolverError::AttemptsExhausted { attempts }.to_string(),
                });
                return;
            }
        }

        let digest = fingerprint(&challenge.prefix, nonce);
        attempts += 1;

        if meets_target(&digest, &target) {
            debug!("Found nonce {} after {} attempts", nonce, attempts);
            let _ = tx.blocking_send(SolveEvent::Solved { nonce });
            return;
        }

        if attempts % interval == 0 {
            // Advisory only; drop the snapshot if the caller is behind
            let _ = tx.try_send(SolveEvent::Progress(SolveProgress {
                attempts,
                last_nonce: nonce,
            }));
        }

        nonce += 1;
    }
}

/// SHA-256 fingerprint of the prefix concatenated with the decimal nonce
pub fn fingerprint(prefix: &str, nonce: u64) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(nonce.to_string().as_bytes());
    hasher.finalize().into()
}

/// Decode the 64-character hex target into its 32-byte form
fn decode_target(target: &str) -> Result<[u8; 32], SolverError> {
    let bytes = hex::decode(target)
        .map_err(|e| SolverError::InvalidTarget(format!("{}: {}", target, e)))?;
    bytes
        .try_into()
        .map_err(|_| SolverError::InvalidTarget(format!("expected 32 bytes: {}", target)))
}

/// Big-endian unsigned comparison: the digest satisfies the puzzle when it
/// is numerically at or below the target.
pub fn meets_target(digest: &[u8; 32], target: &[u8; 32]) -> bool {
    digest <= target
}

/// Check a nonce against a challenge without running the search - used by
/// tests and external consumers
#[allow(dead_code)]
pub fn verify_nonce(prefix: &str, nonce: u64, target: &str) -> Result<bool, SolverError> {
    let target = decode_target(target)?;
    Ok(meets_target(&fingerprint(prefix, nonce), &target))
}

/// Combine a prefix and a winning nonce into the opaque publish token
pub fn build_token(prefix: &str, nonce: u64) -> String {
    format!("{}:{}", prefix, nonce)
}
