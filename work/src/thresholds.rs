//! Per-subtype difficulty defaults.
//!
//! Receive and open blocks clear a *lower* bar than sends: receiving is how
//! spam victims clean up, so the network keeps it cheap, while sends carry
//! the full cost. These are the published network defaults only — the live
//! threshold is variable and relays report the value actually required, so
//! validation sites always take the threshold as a parameter.

use nanolattice_blocks::Subtype;

/// Published mainnet send/change threshold.
const SEND_THRESHOLD: u64 = 0xFFFF_FFF8_0000_0000;
/// Published mainnet receive/open threshold.
const RECEIVE_THRESHOLD: u64 = 0xFFFF_FE00_0000_0000;

/// Default difficulty thresholds per block subtype.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkThresholds {
    pub send: u64,
    pub receive: u64,
}

impl WorkThresholds {
    /// The published mainnet defaults.
    pub const fn mainnet() -> Self {
        Self {
            send: SEND_THRESHOLD,
            receive: RECEIVE_THRESHOLD,
        }
    }

    /// Custom thresholds (tests, low-difficulty devnets).
    pub const fn with(send: u64, receive: u64) -> Self {
        Self { send, receive }
    }

    /// The default threshold for a block subtype.
    pub fn threshold_for(&self, subtype: Subtype) -> u64 {
        match subtype {
            Subtype::Send | Subtype::Change => self.send,
            Subtype::Receive => self.receive,
        }
    }
}

impl Default for WorkThresholds {
    fn default() -> Self {
        Self::mainnet()
    }
}
