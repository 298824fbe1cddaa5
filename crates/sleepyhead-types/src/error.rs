use thiserror::Error;

/// Failures talking to the remote chat service.
///
/// The chat controller collapses every variant into the same fallback reply;
/// the distinction only shows up in logs and in the `sentiment` command.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {code}: {body}")]
    Status { code: u16, body: String },

    #[error("malformed response: {0}")]
    Decode(String),

    #[error("no response within {0} seconds")]
    Timeout(u64),

    #[error("request cancelled")]
    Cancelled,
}

/// Errors from key-value storage operations (used by the `KvStore` port).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("query error: {0}")]
    Query(String),
}

/// Failures handing a document to the platform print facility.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("failed to launch '{command}': {reason}")]
    Launch { command: String, reason: String },

    #[error("'{command}' exited with status {status}")]
    Failed { command: String, status: i32 },
}

/// Errors related to journal operations.
#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal is empty")]
    EmptyInput,

    #[error("clear was not confirmed")]
    ConfirmationDeclined,

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),

    #[error("print error: {0}")]
    Print(#[from] PrintError),
}
