//! Supported currencies and their precision rules
//!
//! Amounts are always stored in hundredths. Currencies with fewer fractional
//! digits reject amounts that use the digits they don't have.

use std::fmt;
use std::str::FromStr;

use super::money::{Money, PRECISION};
use super::validate::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    pub code: &'static str,
    pub name: &'static str,
    /// Number of fractional digits, never more than the stored precision
    pub precision: u8,
}

const CURRENCIES: &[Currency] = &[
    Currency { code: "USD", name: "US Dollar", precision: 2 },
    Currency { code: "EUR", name: "Euro", precision: 2 },
    Currency { code: "GBP", name: "Pound Sterling", precision: 2 },
    Currency { code: "CHF", name: "Swiss Franc", precision: 2 },
    Currency { code: "RUB", name: "Russian Ruble", precision: 2 },
    Currency { code: "UAH", name: "Ukrainian Hryvnia", precision: 2 },
    Currency { code: "CNY", name: "Yuan Renminbi", precision: 1 },
    Currency { code: "JPY", name: "Yen", precision: 0 },
    Currency { code: "KRW", name: "Won", precision: 0 },
];

impl Currency {
    pub fn all() -> &'static [Currency] {
        CURRENCIES
    }

    /// Look up a currency by ISO code, case-insensitively
    pub fn find(code: &str) -> Option<Currency> {
        let code = code.trim();
        CURRENCIES
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
            .copied()
    }

    /// Reject amounts with more fractional digits than this currency has
    pub fn check_amount(&self, amount: Money) -> Result<(), ValidationError> {
        let unit = 10_i64.pow(PRECISION.saturating_sub(u32::from(self.precision)));
        if amount.minor() % unit == 0 {
            Ok(())
        } else {
            Err(ValidationError::TooPrecise {
                currency: self.code,
                precision: self.precision,
            })
        }
    }

    pub fn format(&self, amount: Money) -> String {
        amount.format_with_code(self.code)
    }
}

impl Default for Currency {
    fn default() -> Self {
        CURRENCIES[0]
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.code, self.name)
    }
}

impl FromStr for Currency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::find(s).ok_or_else(|| ValidationError::UnsupportedCurrency(s.trim().to_string()))
    }
}
