//! Monthly payment CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::LedgerResult;
use crate::models::{AddMonthlyPaymentArgs, EditMonthlyPaymentArgs, MonthlyPaymentId};
use crate::services::{month_label, LedgerRules, MonthService, MonthlyPaymentService};
use crate::storage::Storage;

use super::{parse_amount, parse_month_or_current, type_option};

/// Monthly payment subcommands
#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Add a fixed monthly payment such as rent
    Add {
        /// Payment title
        title: String,
        /// Amount (e.g., "900")
        amount: String,
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
        /// Spend type ID
        #[arg(short = 't', long = "type")]
        type_id: Option<u64>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Edit a monthly payment
    Edit {
        /// Payment ID
        id: MonthlyPaymentId,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New spend type ID (0 clears the type)
        #[arg(short = 't', long = "type")]
        type_id: Option<u64>,
        /// New notes
        #[arg(short, long)]
        notes: Option<String>,
    },

    /// Remove a monthly payment
    Remove {
        /// Payment ID
        id: MonthlyPaymentId,
    },
}

/// Handle monthly payment commands
pub fn handle_payment_command(
    storage: &Storage,
    settings: &Settings,
    cmd: PaymentCommands,
) -> LedgerResult<()> {
    let rules = LedgerRules::from_settings(settings)?;
    let currency = rules.currency;
    let service = MonthlyPaymentService::new(storage).with_rules(rules);

    match cmd {
        PaymentCommands::Add {
            title,
            amount,
            month,
            type_id,
            notes,
        } => {
            let amount = parse_amount(&amount)?;
            let (year, month) = parse_month_or_current(month.as_deref())?;
            let month = MonthService::new(storage).init(year, month)?;
            let payment = service.add(&AddMonthlyPaymentArgs {
                month_id: month.id,
                title,
                type_id: type_option(type_id),
                notes: notes.unwrap_or_default(),
                cost: amount,
            })?;

            println!("Added monthly payment: {}", payment.title);
            println!("  ID:     {}", payment.id);
            println!("  Month:  {}", month_label(year, month.month));
            println!("  Amount: {}", currency.format(payment.cost));
        }
        PaymentCommands::Edit {
            id,
            title,
            amount,
            type_id,
            notes,
        } => {
            let payment = service.edit(&EditMonthlyPaymentArgs {
                id,
                title,
                type_id: type_option(type_id),
                notes,
                cost: amount.as_deref().map(parse_amount).transpose()?,
            })?;
            println!(
                "Updated monthly payment {}: {} {}",
                payment.id,
                payment.title,
                currency.format(payment.cost)
            );
        }
        PaymentCommands::Remove { id } => {
            let payment = service.remove(id)?;
            println!("Removed monthly payment {}: {}", payment.id, payment.title);
        }
    }

    Ok(())
}
