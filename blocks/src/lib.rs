//! Block construction for the block-lattice.
//!
//! Every account owns one linear chain of state blocks; each block carries
//! the full account state after its transition (balance, representative) plus
//! a link whose meaning depends on the transition kind. This crate builds,
//! canonically hashes and signs those blocks, and tracks the per-account
//! frontier record the builders consume.
//!
//! Everything here is pure and synchronous. Broadcasting and observation
//! live behind the relay traits.

pub mod block;
pub mod builder;
pub mod chain;
pub mod error;
pub mod pending;
pub mod state;

pub use block::{Link, StateBlock, Subtype, UnsignedBlock};
pub use builder::{change, receive, send};
pub use chain::Chain;
pub use error::BlockError;
pub use pending::PendingSet;
pub use state::AccountState;
