//! Fixed-point amounts used throughout the optimizer.
//!
//! * [`Money`] counts cents: 1 unit = 0.01 currency.
//! * [`ProfitRate`] counts basis points: 1 unit = 0.01 %.
//! * [`Profit`] counts micro-units: 1 unit = 0.000001 currency.
//!
//! `cents * basis_points` lands exactly on micro-units, so the absolute profit
//! of an item never needs rounding. Only display rounds.

use crate::utils::error::{OptimizerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CENTS_PER_UNIT: i64 = 100;
pub const BASIS_POINTS_PER_PERCENT: u32 = 100;
pub const MICROS_PER_CENT: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfitRate(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profit(u64);

/// Splits `"12.5"` into (negative, whole, fraction scaled to two digits).
fn parse_two_decimals(raw: &str) -> Result<(bool, u64, u64)> {
    let invalid = |reason: &str| OptimizerError::InvalidAmount {
        value: raw.to_string(),
        reason: reason.to_string(),
    };

    let s = raw.trim();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid("no digits"));
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("not a decimal number"));
    }
    if fraction.len() > 2 {
        return Err(invalid("more than two fractional digits cannot be represented exactly"));
    }

    let whole_value = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().map_err(|_| invalid("value out of range"))?
    };
    let fraction_value = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<u64>().map_err(|_| invalid("value out of range"))? * 10,
        _ => fraction.parse::<u64>().map_err(|_| invalid("value out of range"))?,
    };

    Ok((negative, whole_value, fraction_value))
}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Budgets may be zero but never negative.
    pub fn ensure_non_negative(self) -> Result<Self> {
        if self.is_negative() {
            return Err(OptimizerError::InvalidAmount {
                value: self.to_string(),
                reason: "budget cannot be negative".to_string(),
            });
        }
        Ok(self)
    }

    /// Parses a decimal currency amount such as `"20"`, `"20.5"` or `"-3.25"`.
    pub fn parse(raw: &str) -> Result<Self> {
        let (negative, whole, fraction) = parse_two_decimals(raw)?;
        let cents = whole
            .checked_mul(CENTS_PER_UNIT as u64)
            .and_then(|c| c.checked_add(fraction))
            .and_then(|c| i64::try_from(c).ok())
            .ok_or_else(|| OptimizerError::InvalidAmount {
                value: raw.to_string(),
                reason: "value out of range".to_string(),
            })?;
        Ok(Money(if negative { -cents } else { cents }))
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:02}",
            sign,
            abs / CENTS_PER_UNIT as u64,
            abs % CENTS_PER_UNIT as u64
        )
    }
}

impl ProfitRate {
    pub const fn from_basis_points(bp: u32) -> Self {
        ProfitRate(bp)
    }

    pub const fn basis_points(self) -> u32 {
        self.0
    }

    /// Parses a percentage such as `"20"`, `"5.25"` or `"7.5%"`.
    ///
    /// Negative rates are rejected here since they are a domain error.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
        let (negative, whole, fraction) = parse_two_decimals(trimmed)?;
        if negative && (whole > 0 || fraction > 0) {
            return Err(OptimizerError::InvalidAmount {
                value: raw.to_string(),
                reason: "profit rate cannot be negative".to_string(),
            });
        }
        whole
            .checked_mul(BASIS_POINTS_PER_PERCENT as u64)
            .and_then(|bp| bp.checked_add(fraction))
            .and_then(|bp| u32::try_from(bp).ok())
            .map(ProfitRate)
            .ok_or_else(|| OptimizerError::InvalidAmount {
                value: raw.to_string(),
                reason: "value out of range".to_string(),
            })
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Absolute profit of `cost` at this rate. `None` on overflow or negative cost.
    pub fn profit_on(self, cost: Money) -> Option<Profit> {
        let cents = u64::try_from(cost.cents()).ok()?;
        cents.checked_mul(self.0 as u64).map(Profit)
    }
}

impl fmt::Display for ProfitRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / BASIS_POINTS_PER_PERCENT,
            self.0 % BASIS_POINTS_PER_PERCENT
        )
    }
}

impl Profit {
    pub const ZERO: Profit = Profit(0);

    pub const fn from_micros(micros: u64) -> Self {
        Profit(micros)
    }

    pub const fn micros(self) -> u64 {
        self.0
    }

    pub fn checked_add(self, other: Profit) -> Option<Profit> {
        self.0.checked_add(other.0).map(Profit)
    }

    /// Rounds half-up to whole cents for display.
    pub fn to_money(self) -> Money {
        let cents = self.0.saturating_add(MICROS_PER_CENT / 2) / MICROS_PER_CENT;
        Money(i64::try_from(cents).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for Profit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_money().fmt(f)
    }
}
