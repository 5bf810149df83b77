//! Money type for representing currency amounts
//!
//! Internally stores amounts as an integer number of minor units (hundredths
//! of the major unit) to avoid floating-point drift. Arithmetic is exact
//! integer arithmetic; conversions from `f64` go through the shortest decimal
//! representation of the float so that `17.83` becomes exactly `1783`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use thiserror::Error;

/// Number of fractional digits stored for every amount
pub const PRECISION: u32 = 2;

/// Minor units per major unit
const SCALE: i64 = 10_i64.pow(PRECISION);

/// A signed monetary amount stored as minor units
///
/// The JSON form is a decimal string with exactly two fractional digits
/// (`"123.45"`). Both JSON numbers and decimal strings are accepted when
/// deserializing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Create an amount from raw minor units
    ///
    /// # Examples
    /// ```
    /// use budget_ledger::models::Money;
    /// assert_eq!(Money::from_minor(1050).to_string(), "10.50");
    /// ```
    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    /// Create an amount from whole major units
    pub const fn from_int(major: i64) -> Self {
        Self(major * SCALE)
    }

    /// Create an amount from a float without binary rounding artifacts
    ///
    /// The float is rendered to its shortest decimal form and parsed from
    /// there. Digits past the stored precision are truncated toward zero.
    ///
    /// # Examples
    /// ```
    /// use budget_ledger::models::Money;
    /// assert_eq!(Money::from_float(17.83).unwrap().minor(), 1783);
    /// assert_eq!(Money::from_float(-20.5).unwrap().minor(), -2050);
    /// ```
    pub fn from_float(value: f64) -> Result<Self, MoneyParseError> {
        if !value.is_finite() {
            return Err(MoneyParseError::NotFinite);
        }
        format!("{}", value).parse()
    }

    /// Raw value in minor units
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Whole major units, truncated toward zero
    pub const fn to_int(&self) -> i64 {
        self.0 / SCALE
    }

    /// Value as a float in major units
    pub fn to_float(&self) -> f64 {
        self.0 as f64 / SCALE as f64
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

    /// Divide by a positive count, truncating toward zero
    ///
    /// # Panics
    ///
    /// Panics if `n <= 0`. Dividing by a non-positive count of days is a
    /// caller bug, not a recoverable condition.
    pub fn div(self, n: i64) -> Self {
        assert!(n > 0, "money can only be divided by a positive number, got {}", n);
        Self(self.0 / n)
    }

    /// Round to whole major units, halves away from zero
    pub fn round(self) -> Self {
        let rem = self.0 % SCALE;
        let truncated = self.0 - rem;
        if rem.abs() * 2 >= SCALE {
            Self(truncated + rem.signum() * SCALE)
        } else {
            Self(truncated)
        }
    }

    /// Smallest whole major amount that is not less than `self`
    pub fn ceil(self) -> Self {
        let rem = self.0.rem_euclid(SCALE);
        if rem == 0 {
            self
        } else {
            Self(self.0 - rem + SCALE)
        }
    }

    /// Largest whole major amount that is not greater than `self`
    pub fn floor(self) -> Self {
        Self(self.0 - self.0.rem_euclid(SCALE))
    }

    /// Format with spaces between thousands groups, e.g. `-1 500 000.05`
    pub fn format_grouped(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = (abs / SCALE as u64).to_string();

        let mut grouped = String::with_capacity(major.len() + major.len() / 3);
        for (i, ch) in major.chars().enumerate() {
            if i > 0 && (major.len() - i) % 3 == 0 {
                grouped.push(' ');
            }
            grouped.push(ch);
        }

        format!(
            "{}{}.{:0width$}",
            sign,
            grouped,
            abs % SCALE as u64,
            width = PRECISION as usize
        )
    }

    /// Format followed by a currency code, e.g. `12.50 EUR`
    pub fn format_with_code(&self, code: &str) -> String {
        format!("{} {}", self.format_grouped(), code)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:0width$}",
            sign,
            abs / SCALE as u64,
            abs % SCALE as u64,
            width = PRECISION as usize
        )
    }
}

impl FromStr for Money {
    type Err = MoneyParseError;

    /// Parse a decimal string such as `"10"`, `"-10.5"` or `"0.07"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());
        let overflow = || MoneyParseError::Overflow(trimmed.to_string());

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let (int_part, frac_part) = match rest.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (rest, ""),
        };

        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (int_part.is_empty() && frac_part.is_empty())
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(invalid());
        }

        let major: i64 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().map_err(|_| overflow())?
        };

        // Keep the stored digits, pad short fractions, drop the rest
        let mut minor_digits: String = frac_part.chars().take(PRECISION as usize).collect();
        while minor_digits.len() < PRECISION as usize {
            minor_digits.push('0');
        }
        let minor: i64 = minor_digits.parse().map_err(|_| invalid())?;

        let total = major
            .checked_mul(SCALE)
            .and_then(|v| v.checked_add(minor))
            .ok_or_else(overflow)?;

        Ok(Self(if negative { -total } else { total }))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal string or a number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(SCALE)
            .map(Money)
            .ok_or_else(|| E::custom(MoneyParseError::Overflow(v.to_string())))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(SCALE))
            .map(Money)
            .ok_or_else(|| E::custom(MoneyParseError::Overflow(v.to_string())))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        Money::from_float(v).map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
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
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("empty amount")]
    Empty,
    #[error("invalid money format: {0}")]
    InvalidFormat(String),
    #[error("amount too large: {0}")]
    Overflow(String),
    #[error("amount is not a finite number")]
    NotFinite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_conversions() {
        for (input, minor) in [(-20, -2000), (0, 0), (15, 1500), (1_000_000, 100_000_000)] {
            let m = Money::from_int(input);
            assert_eq!(m.minor(), minor);
            assert_eq!(m.to_int(), input);
        }
    }

    #[test]
    fn test_float_conversions() {
        let cases = [
            (-20.50, -2050),
            (0.0, 0),
            (0.75, 75),
            (15.30, 1530),
            (1_000_000.87, 100_000_087),
            (69.99, 6999),
            (17.83, 1783),
        ];
        for (input, minor) in cases {
            let m = Money::from_float(input).unwrap();
            assert_eq!(m.minor(), minor, "from_float({})", input);
            assert_eq!(m.to_float(), input);
        }
    }

    #[test]
    fn test_float_to_int_truncates() {
        assert_eq!(Money::from_float(-20.5).unwrap().to_int(), -20);
        assert_eq!(Money::from_float(0.30).unwrap().to_int(), 0);
        assert_eq!(Money::from_float(1_000_000.87).unwrap().to_int(), 1_000_000);
    }

    #[test]
    fn test_from_float_drops_extra_digits() {
        assert_eq!(Money::from_float(15.073).unwrap().minor(), 1507);
        assert_eq!(Money::from_float(15.078).unwrap().minor(), 1507);
        assert_eq!(Money::from_float(-15.078).unwrap().minor(), -1507);
    }

    #[test]
    fn test_from_float_rejects_non_finite() {
        assert_eq!(Money::from_float(f64::NAN), Err(MoneyParseError::NotFinite));
        assert_eq!(Money::from_float(f64::INFINITY), Err(MoneyParseError::NotFinite));
    }

    #[test]
    fn test_float_round_trip() {
        for minor in [-123_456_789, -1, 0, 1, 7, 99, 100, 1783, 6999, 100_000_087] {
            let m = Money::from_minor(minor);
            assert_eq!(Money::from_float(m.to_float()).unwrap(), m);
        }
    }

    #[test]
    fn test_arithmetic() {
        let origin = Money::from_int(150);
        assert_eq!(origin + Money::from_minor(2000), Money::from_minor(17000));
        assert_eq!(origin + Money::from_minor(-2000), Money::from_minor(13000));
        assert_eq!(origin - Money::from_minor(2000), Money::from_minor(13000));
        assert_eq!(origin - Money::from_minor(-2000), Money::from_minor(17000));
        assert_eq!(Money::from_int(-150) - Money::from_minor(2000), Money::from_minor(-17000));
        assert_eq!(-origin, Money::from_int(-150));
    }

    #[test]
    fn test_div() {
        assert_eq!(Money::from_int(1500).div(1), Money::from_minor(150_000));
        assert_eq!(Money::from_int(1500).div(5), Money::from_minor(30_000));

        let res = Money::from_int(1500).div(7);
        assert_eq!(res, Money::from_minor(21_428));
        assert_eq!(res.to_int(), 214);
        assert_eq!(res.to_float(), 214.28);
    }

    #[test]
    fn test_div_truncates_toward_zero() {
        assert_eq!(Money::from_minor(-1000).div(3), Money::from_minor(-333));
    }

    #[test]
    #[should_panic]
    fn test_div_by_zero_panics() {
        let _ = Money::from_minor(12050).div(0);
    }

    #[test]
    #[should_panic]
    fn test_div_by_negative_panics() {
        let _ = Money::from_minor(12050).div(-2);
    }

    #[test]
    fn test_round_ceil_floor() {
        let cases = [
            (1.0, 1, 1, 1),
            (1.4, 1, 2, 1),
            (1.5, 2, 2, 1),
            (1.6, 2, 2, 1),
            (0.0, 0, 0, 0),
            (-1.0, -1, -1, -1),
            (-1.4, -1, -1, -2),
            (-1.5, -2, -1, -2),
            (-1.6, -2, -1, -2),
        ];
        for (input, round, ceil, floor) in cases {
            let m = Money::from_float(input).unwrap();
            assert_eq!(m.round().to_int(), round, "round {}", input);
            assert_eq!(m.ceil().to_int(), ceil, "ceil {}", input);
            assert_eq!(m.floor().to_int(), floor, "floor {}", input);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_int(357).to_string(), "357.00");
        assert_eq!(Money::from_int(-357).to_string(), "-357.00");
        assert_eq!(Money::from_minor(15430).to_string(), "154.30");
        assert_eq!(Money::from_minor(7).to_string(), "0.07");
        assert_eq!(Money::from_minor(-5).to_string(), "-0.05");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(Money::from_int(1_500).format_grouped(), "1 500.00");
        assert_eq!(Money::from_int(-15_000).format_grouped(), "-15 000.00");
        assert_eq!(Money::from_int(150_000).format_grouped(), "150 000.00");
        assert_eq!(
            Money::from_minor(150_000_005).format_grouped(),
            "1 500 000.05"
        );
        assert_eq!(Money::from_minor(99).format_grouped(), "0.99");
        assert_eq!(Money::from_int(12).format_with_code("EUR"), "12.00 EUR");
    }

    #[test]
    fn test_parse() {
        assert_eq!("10.50".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("-10.50".parse::<Money>().unwrap().minor(), -1050);
        assert_eq!("+3".parse::<Money>().unwrap().minor(), 300);
        assert_eq!("10".parse::<Money>().unwrap().minor(), 1000);
        assert_eq!("10.5".parse::<Money>().unwrap().minor(), 1050);
        assert_eq!("0.05".parse::<Money>().unwrap().minor(), 5);
        assert_eq!(".5".parse::<Money>().unwrap().minor(), 50);
        assert_eq!("15.078".parse::<Money>().unwrap().minor(), 1507);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Money>(), Err(MoneyParseError::Empty));
        assert!(matches!(
            "abc".parse::<Money>(),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "1.2.3".parse::<Money>(),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "-".parse::<Money>(),
            Err(MoneyParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "99999999999999999999".parse::<Money>(),
            Err(MoneyParseError::Overflow(_))
        ));
    }

    #[test]
    fn test_sum() {
        let amounts = vec![Money::from_int(100), Money::from_int(200), Money::from_int(300)];
        let total: Money = amounts.iter().sum();
        assert_eq!(total, Money::from_int(600));
    }

    #[test]
    fn test_json_encoding() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Wrapper {
            money: Money,
        }

        let json = serde_json::to_string(&Wrapper { money: Money::from_int(357) }).unwrap();
        assert_eq!(json, r#"{"money":"357.00"}"#);

        let json = serde_json::to_string(&Wrapper { money: Money::from_minor(7) }).unwrap();
        assert_eq!(json, r#"{"money":"0.07"}"#);

        let cases = [
            (r#"{"money":357}"#, Money::from_int(357)),
            (r#"{"money":154.30}"#, Money::from_minor(15430)),
            (r#"{"money":0.07}"#, Money::from_minor(7)),
            (r#"{"money":"123.45"}"#, Money::from_minor(12345)),
            (r#"{"money":-4}"#, Money::from_int(-4)),
        ];
        for (input, want) in cases {
            let got: Wrapper = serde_json::from_str(input).unwrap();
            assert_eq!(got.money, want, "decode {}", input);
        }

        assert!(serde_json::from_str::<Wrapper>(r#"{"money":"test"}"#).is_err());
    }
}
