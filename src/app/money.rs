//! Integer money amounts
//!
//! All prices are held in cents so that `rate × nights × rooms` is exact.
//! Only the display layer turns an amount into a currency string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A monetary value in the smallest currency unit (cents)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

/// Error returned when a decimal amount cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoneyError {
    input: String,
}

impl fmt::Display for ParseMoneyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a valid amount (expected digits with up to two decimals)",
            self.input
        )
    }
}

impl std::error::Error for ParseMoneyError {}

impl Money {
    /// Creates a value from cents
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Value in cents
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole-unit part
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Cents part, always 0-99
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Zero amount
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// True when strictly greater than zero
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies by a count, returning `None` on overflow
    pub fn checked_mul(self, factor: i64) -> Option<Self> {
        self.0.checked_mul(factor).map(Money)
    }

    /// Adds two amounts, returning `None` on overflow
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parses `"180"`, `"180.5"` or `"180.00"`; at most two decimals
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoneyError {
            input: s.to_string(),
        };
        let trimmed = s.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let (major_str, minor_str) = match digits.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (digits, ""),
        };

        if major_str.is_empty()
            || minor_str.len() > 2
            || !major_str.bytes().all(|b| b.is_ascii_digit())
            || !minor_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(err());
        }

        let major: i64 = major_str.parse().map_err(|_| err())?;
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| err())? * 10,
            _ => minor_str.parse().map_err(|_| err())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(err)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Plain decimal rendering (`1234.50`); currency symbols belong to the display layer
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}
