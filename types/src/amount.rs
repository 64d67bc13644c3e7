//! Currency amounts in raw units.
//!
//! Amounts are fixed-point integers (u128) to avoid floating-point errors.
//! The smallest indivisible unit is 1 raw; the balance field on the wire is
//! exactly 16 bytes, so u128 represents every expressible balance. Named
//! denominations are decimal powers of raw.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use thiserror::Error;

/// Named denominations of the currency, each a decimal power of raw.
///
/// `Mnano` (displayed as "NANO") is the reference unit wallets show to
/// people; everything below it exists for historical and micro-payment use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// 10^33 raw.
    Gnano,
    /// 10^30 raw — the reference unit, displayed as "NANO".
    Mnano,
    /// 10^27 raw.
    Knano,
    /// 10^24 raw, the historical base unit.
    Nano,
    /// 10^21 raw.
    Millinano,
    /// 10^18 raw.
    Micronano,
    /// 1 raw.
    Raw,
}

impl Unit {
    /// Decimal exponent of this unit relative to raw.
    pub const fn exponent(self) -> u32 {
        match self {
            Unit::Gnano => 33,
            Unit::Mnano => 30,
            Unit::Knano => 27,
            Unit::Nano => 24,
            Unit::Millinano => 21,
            Unit::Micronano => 18,
            Unit::Raw => 0,
        }
    }

    /// Number of raw per one of this unit.
    pub const fn scale(self) -> u128 {
        10u128.pow(self.exponent())
    }

    /// Conventional ticker label.
    pub const fn symbol(self) -> &'static str {
        match self {
            Unit::Gnano => "Gnano",
            Unit::Mnano => "NANO",
            Unit::Knano => "knano",
            Unit::Nano => "nano",
            Unit::Millinano => "mnano",
            Unit::Micronano => "unano",
            Unit::Raw => "raw",
        }
    }
}

/// Errors from amount arithmetic and decimal conversion.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount underflow: cannot subtract {subtrahend} raw from {minuend} raw")]
    Underflow { minuend: u128, subtrahend: u128 },

    #[error("amount overflow")]
    Overflow,

    #[error("invalid decimal amount {input:?}")]
    InvalidDecimal { input: String },

    #[error("{input:?} has more fractional digits than {unit} can represent")]
    PrecisionLoss { input: String, unit: &'static str },
}

/// An exact currency amount, stored in raw units.
///
/// Immutable value type; arithmetic produces new values and never touches
/// floating point. Subtraction below zero is an error, not a wrap.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(u128::MAX);

    pub const fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Addition that surfaces overflow as an error.
    pub fn try_add(self, other: Self) -> Result<Self, AmountError> {
        self.checked_add(other).ok_or(AmountError::Overflow)
    }

    /// Subtraction that surfaces going below zero as [`AmountError::Underflow`].
    pub fn try_sub(self, other: Self) -> Result<Self, AmountError> {
        self.checked_sub(other).ok_or(AmountError::Underflow {
            minuend: self.0,
            subtrahend: other.0,
        })
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    pub fn checked_mul(self, factor: u128) -> Option<Self> {
        self.0.checked_mul(factor).map(Self)
    }

    /// Integer division, truncating toward zero.
    ///
    /// The remainder is discarded, so this is lossy; money-moving code paths
    /// must not divide amounts.
    pub fn checked_div(self, divisor: u128) -> Option<Self> {
        self.0.checked_div(divisor).map(Self)
    }

    /// Parse an exact decimal string denominated in `unit`.
    ///
    /// Accepts `"12"`, `"12.5"`, `".5"` and `"12."`. Fractional digits beyond
    /// the unit's scale are rejected unless they are zeros, since raw cannot
    /// represent them.
    pub fn from_decimal_str(input: &str, unit: Unit) -> Result<Self, AmountError> {
        let invalid = || AmountError::InvalidDecimal {
            input: input.to_string(),
        };

        let s = input.trim();
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let exponent = unit.exponent() as usize;
        let (kept, excess) = frac_part.split_at(frac_part.len().min(exponent));
        if excess.bytes().any(|b| b != b'0') {
            return Err(AmountError::PrecisionLoss {
                input: input.to_string(),
                unit: unit.symbol(),
            });
        }

        let int_val: u128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| AmountError::Overflow)?
        };

        // Right-pad the kept fractional digits to the full scale. The padded
        // value is < 10^33 and always fits u128.
        let mut frac_val: u128 = 0;
        if exponent > 0 {
            for b in kept.bytes() {
                frac_val = frac_val * 10 + u128::from(b - b'0');
            }
            frac_val *= 10u128.pow((exponent - kept.len()) as u32);
        }

        int_val
            .checked_mul(unit.scale())
            .and_then(|v| v.checked_add(frac_val))
            .map(Self)
            .ok_or(AmountError::Overflow)
    }

    /// Render as an exact decimal string denominated in `unit`.
    ///
    /// The fractional part is zero-padded to the unit's full scale — never
    /// scientific notation, never floating-point rounding.
    pub fn to_decimal_string(&self, unit: Unit) -> String {
        let scale = unit.scale();
        if scale == 1 {
            return self.0.to_string();
        }
        let width = unit.exponent() as usize;
        format!("{}.{:0width$}", self.0 / scale, self.0 % scale)
    }
}

impl Add for Amount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Amount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u128> for Amount {
    type Output = Self;
    fn mul(self, rhs: u128) -> Self {
        Self(self.0 * rhs)
    }
}

impl Div<u128> for Amount {
    type Output = Self;
    fn div(self, rhs: u128) -> Self {
        Self(self.0 / rhs)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({} raw)", self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} raw", self.0)
    }
}
