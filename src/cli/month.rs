//! Month CLI commands
//!
//! Implements CLI commands for initialising, showing and listing months.

use std::collections::HashMap;

use chrono::Datelike;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_month, format_month_list};
use crate::error::LedgerResult;
use crate::models::{MonthId, SpendType, SpendTypeId};
use crate::services::{month_label, LedgerRules, MonthService};
use crate::storage::Storage;

use super::parse_month_or_current;

/// Month subcommands
#[derive(Subcommand)]
pub enum MonthCommands {
    /// Show a month with its incomes, payments and daily saldo
    Show {
        /// Month (YYYY-MM, defaults to the current month)
        month: Option<String>,
        /// Show the month with this ID instead
        #[arg(long)]
        id: Option<MonthId>,
    },

    /// Create a month and its days
    Init {
        /// Month (YYYY-MM, defaults to the current month)
        month: Option<String>,
    },

    /// List the months of a year
    List {
        /// Year (defaults to the current year)
        #[arg(short, long)]
        year: Option<i32>,
    },
}

/// Handle month commands
pub fn handle_month_command(
    storage: &Storage,
    settings: &Settings,
    cmd: MonthCommands,
) -> LedgerResult<()> {
    let service = MonthService::new(storage);
    let rules = LedgerRules::from_settings(settings)?;

    match cmd {
        MonthCommands::Show { month, id } => {
            let month = match id {
                Some(id) => service.get(id)?,
                None => {
                    let (year, month) = parse_month_or_current(month.as_deref())?;
                    service.find(year, month)?
                }
            };
            let types = spend_type_map(storage)?;
            print!(
                "{}",
                format_month(&month, &types, &rules.currency, &settings.date_format)
            );
        }
        MonthCommands::Init { month } => {
            let (year, month) = parse_month_or_current(month.as_deref())?;
            let created = service.init(year, month)?;
            println!(
                "Month {} ready (ID: {}, {} days)",
                month_label(year, month),
                created.id,
                created.days.len()
            );
        }
        MonthCommands::List { year } => {
            let year = year.unwrap_or_else(|| chrono::Local::now().year());
            let months = service.list_year(year)?;
            print!("{}", format_month_list(&months, &rules.currency));
        }
    }

    Ok(())
}

/// All spend types keyed by ID, for labelling amounts
pub(crate) fn spend_type_map(storage: &Storage) -> LedgerResult<HashMap<SpendTypeId, SpendType>> {
    Ok(storage
        .spend_types
        .get_all()?
        .into_iter()
        .map(|t| (t.id, t))
        .collect())
}
