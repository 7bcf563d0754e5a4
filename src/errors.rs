/*!
 * Error types for the lrcpress application.
 *
 * This module contains custom error types for different parts of the
 * application, using the thiserror crate for ergonomic error definitions.
 * Validation diagnostics are deliberately NOT represented here: they are
 * data returned by the validator, never errors.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the lyrics database API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Error when making an HTTP request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),
}

/// Errors that can occur while solving a proof-of-work challenge
#[derive(Error, Debug)]
pub enum SolverError {
    /// The server-issued target could not be decoded
    #[error("Invalid challenge target: {0}")]
    InvalidTarget(String),

    /// The configured attempt ceiling was reached without a solution
    #[error("Gave up after {attempts} attempts without finding a nonce")]
    AttemptsExhausted {
        /// Number of attempts made before giving up
        attempts: u64,
    },

    /// The search was cancelled before completing
    #[error("Challenge solve was cancelled")]
    Cancelled,

    /// The worker reported a failure
    #[error("Challenge solve failed: {0}")]
    Failed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from the lyrics database API
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Error from the challenge solver
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
