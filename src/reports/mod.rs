//! Reports module for the budget ledger
//!
//! Spend statistics built from search rows: daily totals, totals per spend
//! type and a histogram of spend costs.

pub mod cost_intervals;
pub mod spent_by_day;
pub mod spent_by_type;

pub use cost_intervals::{cost_intervals, percentile, CostInterval, CostIntervalsReport};
pub use spent_by_day::{DaySpending, SpentByDayReport};
pub use spent_by_type::{SpentByTypeReport, TypeSpending, NO_TYPE_NAME};
