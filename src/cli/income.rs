//! Income CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::models::{AddIncomeArgs, EditIncomeArgs, IncomeId};
use crate::services::{month_label, IncomeService, LedgerRules, MonthService};
use crate::storage::Storage;

use super::{parse_amount, parse_month_or_current};

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Add an income to a month
    Add {
        /// Income title
        title: String,
        /// Amount (e.g., "3000" or "3000.00")
        amount: String,
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Edit an income
    Edit {
        /// Income ID
        id: IncomeId,
        /// New title
        #[arg(short, long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Remove an income
    Remove {
        /// Income ID
        id: IncomeId,
    },
}

/// Handle income commands
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    cmd: IncomeCommands,
) -> LedgerResult<()> {
    let rules = LedgerRules::from_settings(settings)?;
    let currency = rules.currency;
    let service = IncomeService::new(storage).with_rules(rules);

    match cmd {
        IncomeCommands::Add {
            title,
            amount,
            month,
            notes,
        } => {
            let amount = parse_amount(&amount)?;
            let (year, month) = parse_month_or_current(month.as_deref())?;
            let month = MonthService::new(storage).init(year, month)?;
            let income = service.add(&AddIncomeArgs {
                month_id: month.id,
                title,
                notes: notes.unwrap_or_default(),
                income: amount,
            })?;

            println!("Added income: {}", income.title);
            println!("  ID:     {}", income.id);
            println!("  Month:  {}", month_label(year, month.month));
            println!("  Amount: {}", currency.format(income.income));
        }
        IncomeCommands::Edit {
            id,
            title,
            amount,
            notes,
        } => {
            let income = service.edit(&EditIncomeArgs {
                id,
                title,
                notes,
                income: amount.as_deref().map(parse_amount).transpose()?,
            })?;
            println!(
                "Updated income {}: {} {}",
                income.id,
                income.title,
                currency.format(income.income)
            );
        }
        IncomeCommands::Remove { id } => {
            let income = service.remove(id)?;
            println!("Removed income {}: {}", income.id, income.title);
        }
    }

    Ok(())
}
