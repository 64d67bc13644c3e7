use thiserror::Error;

/// Errors from work validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkError {
    #[error("work value {value:#018x} is below the threshold {threshold:#018x}")]
    BelowThreshold { value: u64, threshold: u64 },

    #[error("work was computed against a root the chain has moved past")]
    Stale,
}
