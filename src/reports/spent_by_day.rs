//! Spent by Day Report
//!
//! Daily spend totals over an inclusive date range.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::display::report::{format_bar, separator};
use crate::engine::SpendQuery;
use crate::error::LedgerResult;
use crate::models::{Currency, Money, SearchSpendsArgs, SpendRow, ValidationError};
use crate::storage::Storage;

/// Total spent on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySpending {
    pub date: NaiveDate,
    pub spent: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpentByDayReport {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// One entry per day of the range, in date order
    pub days: Vec<DaySpending>,
    pub total: Money,
}

impl SpentByDayReport {
    /// Build the report from already loaded spend rows
    ///
    /// Rows dated outside the range are ignored. Days without spends are
    /// reported with zero.
    pub fn from_rows(rows: &[SpendRow], start_date: NaiveDate, end_date: NaiveDate) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();

        let mut date = start_date;
        while date <= end_date {
            by_day.insert(date, Money::ZERO);
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }

        for row in rows {
            if let Some(spent) = row.date().and_then(|d| by_day.get_mut(&d)) {
                *spent += row.cost;
            }
        }

        let days: Vec<DaySpending> = by_day
            .into_iter()
            .map(|(date, spent)| DaySpending { date, spent })
            .collect();
        let total = days.iter().map(|d| d.spent).sum();

        Self {
            start_date,
            end_date,
            days,
            total,
        }
    }

    /// Generate the report from stored spends
    pub fn generate(storage: &Storage, start_date: NaiveDate, end_date: NaiveDate) -> LedgerResult<Self> {
        if start_date > end_date {
            return Err(ValidationError::InvalidOption {
                field: "date range",
                value: format!("{} .. {}", start_date, end_date),
            }
            .into());
        }

        let query = SpendQuery::build(&SearchSpendsArgs {
            after: Some(start_date),
            before: Some(end_date),
            ..SearchSpendsArgs::default()
        });
        let rows = storage.search_spends(&query)?;

        Ok(Self::from_rows(&rows, start_date, end_date))
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &Currency) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Spent by Day: {} to {}\n",
            self.start_date, self.end_date
        ));
        output.push_str(&separator(60));
        output.push('\n');

        let max = self
            .days
            .iter()
            .map(|d| d.spent.to_float())
            .fold(0.0_f64, f64::max);

        for day in &self.days {
            output.push_str(&format!(
                "{}  {:>16}  {}\n",
                day.date,
                currency.format(day.spent),
                format_bar(day.spent.to_float(), max, 30)
            ));
        }

        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!("{:<10}  {:>16}\n", "Total", currency.format(self.total)));

        output
    }
}
