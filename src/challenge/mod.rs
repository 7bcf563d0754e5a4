/*!
 * Proof-of-work challenge subsystem.
 *
 * - `solver`: the cancellable concurrent nonce search and its event protocol
 */

pub mod solver;

// Re-export main types
pub use solver::{
    Challenge, SolveEvent, SolveProgress, SolverConfig, SolverHandle, build_token, spawn,
    verify_nonce,
};
