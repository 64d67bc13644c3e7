//! Account address type with `nano_` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A textual account address: `nano_` + 52 base-32 characters of public key
/// + 8 base-32 checksum characters, 65 characters in total.
///
/// This type only guards the prefix; full checksum validation and the
/// public-key round-trip live in `nanolattice_crypto::address`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    /// The standard address prefix.
    pub const PREFIX: &'static str = "nano_";

    /// Legacy prefix still accepted on decode.
    pub const LEGACY_PREFIX: &'static str = "xrb_";

    /// Create an address from a raw string.
    ///
    /// # Panics
    /// Panics if the string carries neither the standard nor the legacy
    /// prefix.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(
            s.starts_with(Self::PREFIX) || s.starts_with(Self::LEGACY_PREFIX),
            "address must start with nano_ or xrb_"
        );
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The base-32 payload (public key + checksum) with the prefix stripped.
    pub fn encoded_part(&self) -> &str {
        self.0
            .strip_prefix(Self::PREFIX)
            .or_else(|| self.0.strip_prefix(Self::LEGACY_PREFIX))
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Address {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_both_prefixes() {
        let a = Address::new("nano_abc");
        assert_eq!(a.encoded_part(), "abc");
        let b = Address::new("xrb_abc");
        assert_eq!(b.encoded_part(), "abc");
    }

    #[test]
    #[should_panic(expected = "address must start with")]
    fn rejects_foreign_prefix() {
        Address::new("ban_abc");
    }
}
