//! Money type for representing currency amounts
//!
//! Amounts are stored as whole currency units (i64). Rupiah has no subunit in
//! day-to-day use, so fractional values only exist inside engine arithmetic and
//! are rounded into `Money` once, at the point of display or storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Represents a monetary amount in whole currency units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from whole units
    ///
    /// # Examples
    /// ```
    /// use overhead_cli::models::Money;
    /// let amount = Money::from_units(1_500_000);
    /// assert_eq!(amount.to_string(), "Rp 1.500.000");
    /// ```
    pub const fn from_units(units: i64) -> Self {
        Self(units)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in whole units
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Get the amount as a float for engine arithmetic
    pub fn as_f64(&self) -> f64 {
        self.0 as f64
    }

    /// Round a fractional engine value to the nearest whole unit
    ///
    /// Halves round away from zero, so 10705.5 becomes 10706.
    ///
    /// # Examples
    /// ```
    /// use overhead_cli::models::Money;
    /// assert_eq!(Money::round_from(1234.56).units(), 1235);
    /// assert_eq!(Money::round_from(1234.44).units(), 1234);
    /// ```
    pub fn round_from(value: f64) -> Self {
        Self(value.round() as i64)
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is positive
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "1500000", "1.500.000", "1,500,000", "Rp 1.500.000",
    /// "-25000". A `.` or `,` followed by exactly three digits groups digits;
    /// a final one followed by one or two digits starts a decimal part, which
    /// is rounded to whole units ("1500000.00", "25.000,50", "1.5").
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.to_string());
        let trimmed = s.trim();

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped.trim_start())
        } else {
            (false, trimmed)
        };

        let rest = rest
            .strip_prefix("Rp")
            .or_else(|| rest.strip_prefix("rp"))
            .or_else(|| rest.strip_prefix("IDR"))
            .unwrap_or(rest);

        let body: String = rest.chars().filter(|c| !matches!(c, '_' | ' ')).collect();
        let is_separator = |c: char| c == '.' || c == ',';

        let (whole, fraction) = match body.rfind(is_separator) {
            Some(pos) if (1..=2).contains(&(body.len() - pos - 1)) => {
                (&body[..pos], Some(&body[pos + 1..]))
            }
            _ => (body.as_str(), None),
        };

        let mut digits = String::with_capacity(whole.len());
        for (i, group) in whole.split(is_separator).enumerate() {
            let sized = if i == 0 { !group.is_empty() } else { group.len() == 3 };
            if !sized || !group.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            digits.push_str(group);
        }

        let mut units: i64 = digits.parse().map_err(|_| invalid())?;
        if let Some(fraction) = fraction {
            if !fraction.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            let decimals: f64 = fraction.parse().map_err(|_| invalid())?;
            let scale = 10f64.powi(fraction.len() as i32);
            units = Self::round_from(units as f64 + decimals / scale).units();
        }

        Ok(Self(if negative { -units } else { units }))
    }

    /// Format with a currency symbol and dot digit grouping
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let grouped = group_digits(self.0.unsigned_abs());
        if self.is_negative() {
            format!("-{} {}", symbol, grouped)
        } else {
            format!("{} {}", symbol, grouped)
        }
    }
}

/// Insert a dot between every group of three digits
fn group_digits(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_symbol("Rp"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

/// Granularity used when presenting rounded currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingRule {
    /// Nearest whole unit
    #[default]
    Unit,
    /// Nearest 50
    Fifty,
    /// Nearest 100
    Hundred,
}

impl RoundingRule {
    /// The step this rule rounds to
    pub const fn step(&self) -> i64 {
        match self {
            Self::Unit => 1,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    /// Round a fractional value according to this rule
    pub fn apply(&self, value: f64) -> Money {
        let step = self.step() as f64;
        Money::from_units(((value / step).round() * step) as i64)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_units(1_500_000).to_string(), "Rp 1.500.000");
        assert_eq!(Money::from_units(0).to_string(), "Rp 0");
        assert_eq!(Money::from_units(730).to_string(), "Rp 730");
        assert_eq!(Money::from_units(-25_000).to_string(), "-Rp 25.000");
        assert_eq!(Money::from_units(1000).format_with_symbol("IDR"), "IDR 1.000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1000);
        let b = Money::from_units(500);

        assert_eq!((a + b).units(), 1500);
        assert_eq!((a - b).units(), 500);
        assert_eq!((-a).units(), -1000);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("1500000").unwrap().units(), 1_500_000);
        assert_eq!(Money::parse("1.500.000").unwrap().units(), 1_500_000);
        assert_eq!(Money::parse("1,500,000").unwrap().units(), 1_500_000);
        assert_eq!(Money::parse("Rp 690.000").unwrap().units(), 690_000);
        assert_eq!(Money::parse("-25000").unwrap().units(), -25_000);
        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("12a").is_err());
    }

    #[test]
    fn test_parse_decimal_part() {
        assert_eq!(Money::parse("1500000.00").unwrap().units(), 1_500_000);
        assert_eq!(Money::parse("1,500,000.40").unwrap().units(), 1_500_000);
        assert_eq!(Money::parse("25.000,50").unwrap().units(), 25_001);
        assert_eq!(Money::parse("1.5").unwrap().units(), 2);
        assert_eq!(Money::parse("-12.5").unwrap().units(), -13);
        assert_eq!(Money::parse("Rp 690.000").unwrap().units(), 690_000);
    }

    #[test]
    fn test_parse_rejects_ambiguous_grouping() {
        assert!(Money::parse("1.2345").is_err());
        assert!(Money::parse("15.00.000").is_err());
        assert!(Money::parse(".50").is_err());
        assert!(Money::parse("1.500.").is_err());
    }

    #[test]
    fn test_round_from() {
        assert_eq!(Money::round_from(1234.56).units(), 1235);
        assert_eq!(Money::round_from(1234.44).units(), 1234);
        assert_eq!(Money::round_from(10705.5).units(), 10706);
        assert_eq!(Money::round_from(4_000_000.0 / 3000.0).units(), 1333);
    }

    #[test]
    fn test_rounding_rules() {
        assert_eq!(RoundingRule::Unit.apply(1234.4).units(), 1234);
        assert_eq!(RoundingRule::Fifty.apply(1234.0).units(), 1250);
        assert_eq!(RoundingRule::Fifty.apply(1224.0).units(), 1200);
        assert_eq!(RoundingRule::Hundred.apply(1234.0).units(), 1200);
        assert_eq!(RoundingRule::Hundred.apply(1274.0).units(), 1300);
    }

    #[test]
    fn test_sum() {
        let total: Money = vec![
            Money::from_units(690_000),
            Money::from_units(1_500_000),
        ]
        .into_iter()
        .sum();
        assert_eq!(total.units(), 2_190_000);
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_units(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "1050");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }
}
