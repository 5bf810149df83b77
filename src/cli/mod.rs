//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod income;
pub mod month;
pub mod payment;
pub mod report;
pub mod search;
pub mod spend;
pub mod spend_type;

pub use audit::handle_audit_command;
pub use income::{handle_income_command, IncomeCommands};
pub use month::{handle_month_command, MonthCommands};
pub use payment::{handle_payment_command, PaymentCommands};
pub use report::{handle_report_command, ReportCommands};
pub use search::{handle_search_command, SearchCommand};
pub use spend::{handle_spend_command, SpendCommands};
pub use spend_type::{handle_spend_type_command, SpendTypeCommands};

use chrono::{Datelike, NaiveDate};

use crate::error::LedgerResult;
use crate::models::{Money, SpendTypeId, ValidationError};

/// Parse an amount such as "12", "-3.5" or "0.07"
pub(crate) fn parse_amount(s: &str) -> LedgerResult<Money> {
    Ok(s.parse::<Money>()?)
}

/// Parse a YYYY-MM-DD date
pub(crate) fn parse_date(field: &'static str, s: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidOption {
            field,
            value: format!("{} (use YYYY-MM-DD)", s),
        }
        .into()
    })
}

pub(crate) fn parse_optional_date(
    field: &'static str,
    s: Option<String>,
) -> LedgerResult<Option<NaiveDate>> {
    s.map(|s| parse_date(field, &s)).transpose()
}

/// Parse a YYYY-MM month label, defaulting to the current month
pub(crate) fn parse_month_or_current(s: Option<&str>) -> LedgerResult<(i32, u32)> {
    let Some(s) = s else {
        let today = chrono::Local::now().date_naive();
        return Ok((today.year(), today.month()));
    };

    let invalid = || ValidationError::InvalidOption {
        field: "month",
        value: format!("{} (use YYYY-MM)", s),
    };
    let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(ValidationError::InvalidMonth(month).into());
    }
    Ok((year, month))
}

/// A spend type option where 0 means "no type"
pub(crate) fn type_option(id: Option<u64>) -> Option<SpendTypeId> {
    id.map(SpendTypeId::new)
}
