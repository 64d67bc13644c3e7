use thiserror::Error;

/// Errors surfaced by a ledger relay implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// The transport failed (connection refused, timeout, …).
    #[error("relay transport failure: {0}")]
    Transport(String),

    /// The relay processed the request and rejected the block.
    #[error("relay rejected the block: {0}")]
    Rejected(String),

    /// The relay answered with something the core cannot interpret.
    #[error("malformed relay response: {0}")]
    InvalidResponse(String),
}
