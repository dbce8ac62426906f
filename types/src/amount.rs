//! Exact fixed-point amounts.
//!
//! Amounts are represented as integer counts of the smallest unit
//! (1e-8 of a coin) to avoid floating-point errors. Every derived quantity
//! truncates toward zero; nothing in this module ever rounds up.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use crate::error::AmountError;

/// Number of fractional digits carried by every amount.
pub const DECIMALS: u32 = 8;

/// Units in one whole coin.
pub const UNITS_PER_COIN: u64 = 100_000_000;

/// A non-negative decimal amount with exactly 8 fractional digits.
///
/// Internally stored as raw units (u64) for precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExactAmount(u64);

impl ExactAmount {
    pub const ZERO: Self = Self(0);

    /// The smallest representable non-zero amount (`0.00000001`).
    pub const UNIT: Self = Self(1);

    pub const MAX: Self = Self(u64::MAX);

    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Whole coins, or `None` if the amount does not fit.
    pub fn from_coins(coins: u64) -> Option<Self> {
        coins.checked_mul(UNITS_PER_COIN).map(Self)
    }

    pub fn units(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Multiply by a plain count, e.g. `destinations * min_output`.
    pub fn checked_mul(self, count: u64) -> Option<Self> {
        self.0.checked_mul(count).map(Self)
    }

    /// Multiply by a count, clamping at [`ExactAmount::MAX`].
    pub fn saturating_mul(self, count: u64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// `truncate8(self * percent / 100)`.
    ///
    /// Both operands are exact, so the only loss is the final truncation.
    /// Returns `None` when the result does not fit (only possible for
    /// percentages above 100).
    pub fn percent(self, percent: ExactAmount) -> Option<Self> {
        let scaled = u128::from(self.0) * u128::from(percent.0);
        let divisor = 100 * u128::from(UNITS_PER_COIN);
        u64::try_from(scaled / divisor).ok().map(Self)
    }

    /// Sum a sequence of amounts, `None` on overflow.
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, |acc, amount| acc.checked_add(amount))
    }
}

impl Add for ExactAmount {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for ExactAmount {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for ExactAmount {
    /// Plain decimal notation with trailing zeros trimmed: `9.999`, `1`,
    /// `0.00000001`. Never scientific notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / UNITS_PER_COIN;
        let frac = self.0 % UNITS_PER_COIN;
        if frac == 0 {
            return write!(f, "{whole}");
        }
        let digits = format!("{frac:08}");
        write!(f, "{whole}.{}", digits.trim_end_matches('0'))
    }
}

impl FromStr for ExactAmount {
    type Err = AmountError;

    /// Parse decimal text. Digits past the eighth fractional place are
    /// truncated.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('+').unwrap_or(s);
        if s.starts_with('-') {
            return Err(AmountError::Negative(s.to_string()));
        }

        let (whole, frac) = match s.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (s, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(AmountError::Empty);
        }
        if let Some(c) = whole.chars().chain(frac.chars()).find(|c| !c.is_ascii_digit()) {
            return Err(AmountError::InvalidCharacter {
                input: s.to_string(),
                found: c,
            });
        }

        let overflow = || AmountError::Overflow(s.to_string());

        let whole_units = if whole.is_empty() {
            0
        } else {
            whole
                .parse::<u64>()
                .map_err(|_| overflow())?
                .checked_mul(UNITS_PER_COIN)
                .ok_or_else(overflow)?
        };

        let kept: String = frac.chars().take(DECIMALS as usize).collect();
        let frac_units = if kept.is_empty() {
            0
        } else {
            let padded = format!("{kept:0<8}");
            padded.parse::<u64>().map_err(|_| overflow())?
        };

        whole_units
            .checked_add(frac_units)
            .map(Self)
            .ok_or_else(overflow)
    }
}

impl Serialize for ExactAmount {
    /// Serializes as a bare JSON number in plain decimal notation, so that
    /// tiny amounts never come out as `1e-8`.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let raw = RawValue::from_string(self.to_string()).map_err(serde::ser::Error::custom)?;
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ExactAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ExactAmountVisitor)
    }
}

struct ExactAmountVisitor;

impl<'de> Visitor<'de> for ExactAmountVisitor {
    type Value = ExactAmount;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-negative decimal amount as a number or string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        ExactAmount::from_coins(v).ok_or_else(|| E::custom(AmountError::Overflow(v.to_string())))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        let coins = u64::try_from(v).map_err(|_| E::custom(AmountError::Negative(v.to_string())))?;
        self.visit_u64(coins)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        if !v.is_finite() {
            return Err(E::custom(format!("amount must be finite, got {v}")));
        }
        // `Display` for f64 yields the shortest text that round-trips and
        // never uses an exponent.
        format!("{v}").parse().map_err(E::custom)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.parse().map_err(E::custom)
    }
}
