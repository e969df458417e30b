//! Money type for representing peso amounts
//!
//! Internally stores amounts in centavos (i64) to avoid floating-point
//! precision issues. Provides safe arithmetic operations and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Default currency symbol used by `Display`
pub const PESO_SIGN: &str = "₱";

/// A monetary amount stored as centavos (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest magnitude accepted from user input: one trillion pesos.
    /// Sums of thousands of such amounts still fit in an i64.
    pub const MAX_ABS: Money = Money(100_000_000_000_000);

    /// Create a Money amount from centavos
    ///
    /// # Examples
    /// ```
    /// use pesowise::models::Money;
    /// let amount = Money::from_cents(1050); // ₱10.50
    /// assert_eq!(amount.to_string(), "₱10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole pesos and centavos
    pub const fn from_pesos_cents(pesos: i64, cents: i64) -> Self {
        Self(pesos * 100 + cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in centavos
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole pesos (truncated toward zero)
    pub const fn pesos(&self) -> i64 {
        self.0 / 100
    }

    /// Centavos portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Subtract, flooring the result at zero
    pub fn saturating_sub_to_zero(self, other: Self) -> Self {
        Self((self.0 - other.0).max(0))
    }

    /// Amount as a floating-point number of pesos (for ratios and CSV)
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Ratio of this amount to `whole`, or `None` when `whole` is zero
    pub fn ratio_of(&self, whole: Money) -> Option<f64> {
        if whole.is_zero() {
            None
        } else {
            Some(self.0 as f64 / whole.0 as f64)
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts formats: "10.50", "-10.50", "₱1,234.50", "$10.50", "10".
    /// The only sign allowed is a leading minus, and the magnitude may not
    /// exceed [`Money::MAX_ABS`].
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s;
        let s = s.trim();

        let (negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let s = s
            .strip_prefix(PESO_SIGN)
            .or_else(|| s.strip_prefix('$'))
            .or_else(|| s.strip_prefix("PHP"))
            .unwrap_or(s)
            .trim();
        let s: String = s.chars().filter(|c| *c != ',').collect();

        let invalid = || MoneyParseError::InvalidFormat(original.to_string());
        let out_of_range = || MoneyParseError::OutOfRange(original.to_string());

        let (whole, frac) = s.split_once('.').unwrap_or((s.as_str(), ""));
        if (whole.is_empty() && frac.is_empty())
            || !whole.chars().all(|c| c.is_ascii_digit())
            || !frac.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let pesos: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| out_of_range())?
        };

        // Pad or truncate centavos to 2 digits
        let cents: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac[..2].parse().map_err(|_| invalid())?,
        };

        let total = pesos
            .checked_mul(100)
            .and_then(|c| c.checked_add(cents))
            .filter(|c| *c <= Self::MAX_ABS.0)
            .ok_or_else(out_of_range)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Format with a currency symbol and thousands separators
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(self.pesos().unsigned_abs()),
            self.cents_part()
        )
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.format_with_symbol(PESO_SIGN))
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

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
