use std::fmt;

/// Why a summary could not be produced.
#[derive(Debug)]
pub enum SummaryFailure {
    /// The completion endpoint answered but returned no choices.
    EmptyResponse,
    /// The request itself failed or returned a non-success status.
    Transport(String),
}

/// Failure taxonomy for one orchestration run. Every step is pass-through:
/// the first error halts the flow and surfaces here, nothing is retried and
/// no partial state is rolled back.
#[derive(Debug)]
pub enum ServiceError {
    /// No credential on file for the athlete.
    CredentialUnavailable(String),
    /// The stored credential had expired and the refresh round-trip failed.
    CredentialRefreshFailed(String),
    WorkoutFetchFailed { status: u16, body: String },
    SummaryGenerationFailed(SummaryFailure),
    WorkoutUpdateFailed { status: u16 },
    /// Malformed caller input, rejected before any downstream call.
    InvalidInput(String),
    /// Credential store access failed.
    Store(String),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::CredentialUnavailable(msg) => {
                write!(f, "No credential available: {msg}")
            }
            ServiceError::CredentialRefreshFailed(msg) => {
                write!(f, "Failed to refresh expired credential: {msg}")
            }
            ServiceError::WorkoutFetchFailed { status, body } => {
                write!(f, "Workout fetch failed with status {status}: {body}")
            }
            ServiceError::SummaryGenerationFailed(SummaryFailure::EmptyResponse) => {
                write!(f, "Summarizer returned no choices")
            }
            ServiceError::SummaryGenerationFailed(SummaryFailure::Transport(msg)) => {
                write!(f, "Summarizer request failed: {msg}")
            }
            ServiceError::WorkoutUpdateFailed { status } => {
                write!(f, "Workout update failed with status {status}")
            }
            ServiceError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            ServiceError::Store(msg) => write!(f, "Credential store error: {msg}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<rusqlite::Error> for ServiceError {
    fn from(err: rusqlite::Error) -> Self {
        ServiceError::Store(err.to_string())
    }
}
