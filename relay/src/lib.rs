//! Interfaces to the external ledger relay.
//!
//! The core never performs network I/O. A *relay* — some ledger node the
//! caller talks to over whatever transport it likes — is modeled as a trait
//! the caller implements; this crate consumes the capability and adds the
//! one piece of policy the core owns: a block goes out only after its
//! signature and work verify locally.
//!
//! Transport-level retries and backoff belong to the relay implementation,
//! not here.

pub mod broadcaster;
pub mod error;
pub mod traits;

pub use broadcaster::{BroadcastError, Broadcaster};
pub use error::RelayError;
pub use traits::{account_state, ConfirmationEvent, FrontierInfo, LedgerRelay, WorkSource};
