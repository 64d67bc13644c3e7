//! Payment observation.
//!
//! Reconciles a relay's hybrid push/poll reality into one primitive: block
//! until a matching incoming payment is confirmed, the timeout elapses, or
//! the caller cancels. Relays with a confirmation feed are subscribed to;
//! relays without one degrade transparently to polling the pending set.

pub mod cancel;
pub mod watcher;

pub use cancel::CancelToken;
pub use watcher::{PaymentWatcher, WatchOutcome, WatchRequest, WatcherConfig};
