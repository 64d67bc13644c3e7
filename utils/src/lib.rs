//! Shared utilities for nanolattice binaries and tests.

pub mod logging;

pub use logging::init_tracing;
