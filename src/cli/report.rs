//! Report CLI commands
//!
//! Implements CLI commands for the spending reports: spend per day, spend
//! per type with subtype roll-up, and cost intervals.

use chrono::{Datelike, NaiveDate};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::reports::{CostIntervalsReport, SpentByDayReport, SpentByTypeReport};
use crate::services::LedgerRules;
use crate::storage::Storage;

use super::{parse_date, parse_optional_date};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Total spend for every day of a date range
    #[command(alias = "day")]
    ByDay {
        /// Start date (YYYY-MM-DD, defaults to the first of this month)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        end: Option<String>,
    },

    /// Spend per type, including the spend of its subtypes
    #[command(alias = "type")]
    ByType {
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
    },

    /// Group spends into cost intervals
    Intervals {
        /// Number of intervals
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
        /// Start date (YYYY-MM-DD)
        #[arg(short, long)]
        start: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(short, long)]
        end: Option<String>,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> LedgerResult<()> {
    let rules = LedgerRules::from_settings(settings)?;

    match cmd {
        ReportCommands::ByDay { start, end } => {
            let today = chrono::Local::now().date_naive();
            let start_date = match start {
                Some(s) => parse_date("start", &s)?,
                None => NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today),
            };
            let end_date = match end {
                Some(e) => parse_date("end", &e)?,
                None => today,
            };

            let report = SpentByDayReport::generate(storage, start_date, end_date)?;
            print!("{}", report.format_terminal(&rules.currency));
        }
        ReportCommands::ByType { start, end } => {
            let report = SpentByTypeReport::generate(
                storage,
                parse_optional_date("start", start)?,
                parse_optional_date("end", end)?,
                rules.max_spend_type_depth,
            )?;
            print!("{}", report.format_terminal(&rules.currency));
        }
        ReportCommands::Intervals { count, start, end } => {
            let report = CostIntervalsReport::generate(
                storage,
                parse_optional_date("start", start)?,
                parse_optional_date("end", end)?,
                count,
            )?;
            print!("{}", report.format_terminal(&rules.currency));
        }
    }

    Ok(())
}
