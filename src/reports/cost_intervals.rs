//! Cost Intervals Report
//!
//! A histogram of spend costs. The outer 5% on each side are left out of
//! the interval bounds so a few large purchases don't stretch every bucket.

use chrono::NaiveDate;
use serde::Serialize;

use crate::display::report::{format_bar, separator};
use crate::engine::SpendQuery;
use crate::error::LedgerResult;
use crate::models::{Currency, Money, SearchSpendsArgs, SpendRow, ValidationError};
use crate::storage::Storage;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostInterval {
    pub from: Money,
    /// Inclusive upper bound
    pub to: Money,
    pub count: usize,
    pub total: Money,
}

impl CostInterval {
    fn new(from: Money, to: Money) -> Self {
        Self {
            from,
            to,
            count: 0,
            total: Money::ZERO,
        }
    }

    pub fn contains(&self, cost: Money) -> bool {
        self.from <= cost && cost <= self.to
    }
}

/// Cost at the `p`th percentile of `sorted` (nearest-rank method)
///
/// `sorted` must be non-empty and ascending. Out of range percentiles
/// clamp to the first or last cost.
pub fn percentile(sorted: &[Money], p: i64) -> Money {
    let len = sorted.len() as i64;
    let index = ((p * len + 99).div_euclid(100) - 1).clamp(0, len - 1);
    sorted[index as usize]
}

/// Split spend costs into at most `n` intervals and count the costs in each
///
/// Bounds run from the 5th percentile floored to the 95th percentile ceiled
/// to whole units. The width is the range divided by `n`, rounded to whole
/// units and at least one unit; intervals past the upper bound are not
/// produced. Each interval ends one minor unit before the next one starts,
/// the last one ends at the upper bound. A cost is counted in the first
/// interval containing it; costs outside every interval are not counted.
pub fn cost_intervals(costs: &[Money], n: usize) -> Result<Vec<CostInterval>, ValidationError> {
    if n == 0 {
        return Err(ValidationError::NotPositive("interval count"));
    }
    if costs.is_empty() {
        return Ok(Vec::new());
    }

    let mut sorted = costs.to_vec();
    sorted.sort();

    let min = percentile(&sorted, 5).floor();
    let max = percentile(&sorted, 95).ceil();
    let delta = max - min;

    let divisor = i64::try_from(n).map_err(|_| ValidationError::InvalidOption {
        field: "interval count",
        value: n.to_string(),
    })?;
    let mut width = delta.div(divisor).round();
    if width.is_zero() {
        width = Money::from_int(1);
    }

    let needed = (delta.minor() + width.minor() - 1) / width.minor();
    let count = usize::try_from(needed).unwrap_or(n).clamp(1, n);

    let mut intervals = Vec::with_capacity(count);
    let mut next = min;
    for i in 0..count {
        let from = next;
        next += width;
        let to = if i + 1 == count {
            max
        } else {
            next - Money::from_minor(1)
        };
        intervals.push(CostInterval::new(from, to));
    }

    for &cost in costs {
        if let Some(interval) = intervals.iter_mut().find(|i| i.contains(cost)) {
            interval.count += 1;
            interval.total += cost;
        }
    }

    Ok(intervals)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostIntervalsReport {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub intervals: Vec<CostInterval>,
    /// Number of spends the intervals were built from
    pub spend_count: usize,
}

impl CostIntervalsReport {
    pub fn from_rows(rows: &[SpendRow], n: usize) -> LedgerResult<Self> {
        let costs: Vec<Money> = rows.iter().map(|r| r.cost).collect();
        Ok(Self {
            start_date: None,
            end_date: None,
            intervals: cost_intervals(&costs, n)?,
            spend_count: costs.len(),
        })
    }

    /// Generate the report from stored spends, optionally limited to a
    /// date range
    pub fn generate(
        storage: &Storage,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        n: usize,
    ) -> LedgerResult<Self> {
        let query = SpendQuery::build(&SearchSpendsArgs {
            after: start_date,
            before: end_date,
            ..SearchSpendsArgs::default()
        });
        let rows = storage.search_spends(&query)?;

        let mut report = Self::from_rows(&rows, n)?;
        report.start_date = start_date;
        report.end_date = end_date;
        Ok(report)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &Currency) -> String {
        let mut output = String::new();
        output.push_str(&format!("Cost Intervals ({} spends)\n", self.spend_count));
        output.push_str(&separator(76));
        output.push('\n');

        if self.intervals.is_empty() {
            output.push_str("No spends found.\n");
            return output;
        }

        let max_count = self.intervals.iter().map(|i| i.count).max().unwrap_or(0) as f64;
        for interval in &self.intervals {
            output.push_str(&format!(
                "{:>14} .. {:<14} {:>5}  {:>16}  {}\n",
                interval.from.format_grouped(),
                interval.to.format_grouped(),
                interval.count,
                currency.format(interval.total),
                format_bar(interval.count as f64, max_count, 16)
            ));
        }

        output
    }
}
