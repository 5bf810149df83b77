//! Input validation shared by every entity and argument type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Implemented by every value that must be checked before it is written
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Maximum length of titles and spend type names
pub const MAX_TITLE_LEN: usize = 200;

/// Validation errors for user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyField(&'static str),
    TooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    NotPositive(&'static str),
    Negative(&'static str),
    InvalidMonth(u32),
    InvalidDate { year: i32, month: u32, day: u32 },
    UnsupportedCurrency(String),
    TooPrecise { currency: &'static str, precision: u8 },
    InvalidOption { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "{} can't be empty", field),
            Self::TooLong { field, len, max } => {
                write!(f, "{} too long ({} chars, max {})", field, len, max)
            }
            Self::NotPositive(field) => write!(f, "{} must be greater than zero", field),
            Self::Negative(field) => write!(f, "{} can't be negative", field),
            Self::InvalidMonth(month) => write!(f, "invalid month number: {}", month),
            Self::InvalidDate { year, month, day } => {
                write!(f, "invalid date: {:04}-{:02}-{:02}", year, month, day)
            }
            Self::UnsupportedCurrency(code) => write!(f, "unsupported currency: {}", code),
            Self::TooPrecise {
                currency,
                precision,
            } => write!(
                f,
                "{} amounts can't have more than {} fractional digits",
                currency, precision
            ),
            Self::InvalidOption { field, value } => {
                write!(f, "invalid value for {}: {}", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Check a required title and return it trimmed
pub fn check_title(field: &'static str, title: &str) -> Result<String, ValidationError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field,
            len,
            max: MAX_TITLE_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// Check that an amount is strictly positive
pub fn check_positive(field: &'static str, amount: Money) -> Result<(), ValidationError> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(ValidationError::NotPositive(field))
    }
}

/// Which spend costs are accepted
///
/// `Signed` allows negative costs, which record refunds and cashback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendCostPolicy {
    Positive,
    NonNegative,
    #[default]
    Signed,
}

impl SpendCostPolicy {
    pub fn check(&self, cost: Money) -> Result<(), ValidationError> {
        match self {
            Self::Positive if !cost.is_positive() => Err(ValidationError::NotPositive("cost")),
            Self::NonNegative if cost.is_negative() => Err(ValidationError::Negative("cost")),
            _ => Ok(()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::NonNegative => "non_negative",
            Self::Signed => "signed",
        }
    }
}

impl fmt::Display for SpendCostPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpendCostPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "positive" => Ok(Self::Positive),
            "non_negative" => Ok(Self::NonNegative),
            "signed" => Ok(Self::Signed),
            other => Err(ValidationError::InvalidOption {
                field: "spend cost policy",
                value: other.to_string(),
            }),
        }
    }
}
