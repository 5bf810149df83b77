//! Spend CLI commands
//!
//! Adding a spend for a date in a month that doesn't exist yet creates that
//! month first.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::models::{AddSpendArgs, EditSpendArgs, SpendId};
use crate::services::{LedgerRules, MonthService, SpendService};
use crate::storage::Storage;

use super::{parse_amount, parse_date, type_option};

/// Spend subcommands
#[derive(Subcommand)]
pub enum SpendCommands {
    /// Record a spend on a day
    Add {
        /// Spend title
        title: String,
        /// Amount (negative for refunds, if allowed by the cost policy)
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Spend type ID
        #[arg(short = 't', long = "type")]
        type_id: Option<u64>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Edit a spend
    Edit {
        /// Spend ID
        id: SpendId,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,
        /// New spend type ID (0 clears the type)
        #[arg(short = 't', long = "type")]
        type_id: Option<u64>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Remove a spend
    Remove {
        /// Spend ID
        id: SpendId,
    },
}

/// Handle spend commands
pub fn handle_spend_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SpendCommands,
) -> LedgerResult<()> {
    let rules = LedgerRules::from_settings(settings)?;
    let currency = rules.currency;
    let months = MonthService::new(storage);
    let service = SpendService::new(storage).with_rules(rules);

    match cmd {
        SpendCommands::Add {
            title,
            amount,
            date,
            type_id,
            notes,
        } => {
            let date = match date {
                Some(d) => parse_date("date", &d)?,
                None => chrono::Local::now().date_naive(),
            };
            let cost = parse_amount(&amount)?;
            let day = months.day_for_date(date)?;

            let spend = service.add(&AddSpendArgs {
                day_id: day.id,
                title,
                type_id: type_option(type_id),
                notes: notes.unwrap_or_default(),
                cost,
            })?;
            let day = months.get_day(day.id)?;

            println!("Added spend: {}", spend.title);
            println!("  ID:     {}", spend.id);
            println!("  Date:   {}", date.format(&settings.date_format));
            println!("  Amount: {}", currency.format(spend.cost));
            println!("  Saldo:  {}", currency.format(day.saldo));
        }
        SpendCommands::Edit {
            id,
            title,
            amount,
            type_id,
            notes,
        } => {
            let spend = service.edit(&EditSpendArgs {
                id,
                title,
                type_id: type_option(type_id),
                notes,
                cost: amount.as_deref().map(parse_amount).transpose()?,
            })?;
            println!(
                "Updated spend {}: {} {}",
                spend.id,
                spend.title,
                currency.format(spend.cost)
            );
        }
        SpendCommands::Remove { id } => {
            let spend = service.remove(id)?;
            println!("Removed spend {}: {}", spend.id, spend.title);
        }
    }

    Ok(())
}
