//! Spend type CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::format_spend_type_tree;
use crate::error::LedgerResult;
use crate::models::{AddSpendTypeArgs, EditSpendTypeArgs, SpendTypeId};
use crate::services::{LedgerRules, SpendTypeService};
use crate::storage::Storage;

use super::type_option;

/// Spend type subcommands
#[derive(Subcommand)]
pub enum SpendTypeCommands {
    /// Show all spend types as a tree
    #[command(alias = "ls")]
    List,

    /// Create a spend type
    Add {
        /// Type name
        name: String,
        /// Parent type ID
        #[arg(short, long)]
        parent: Option<u64>,
    },

    /// Rename or move a spend type
    Edit {
        /// Type ID
        id: SpendTypeId,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New parent type ID (0 makes it a root)
        #[arg(short, long)]
        parent: Option<u64>,
    },

    /// Delete a spend type that nothing uses
    Remove {
        /// Type ID
        id: SpendTypeId,
    },
}

/// Handle spend type commands
pub fn handle_spend_type_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SpendTypeCommands,
) -> LedgerResult<()> {
    let rules = LedgerRules::from_settings(settings)?;
    let service = SpendTypeService::new(storage).with_rules(rules);

    match cmd {
        SpendTypeCommands::List => {
            let types = service.list()?;
            print!("{}", format_spend_type_tree(&types));
        }
        SpendTypeCommands::Add { name, parent } => {
            let spend_type = service.add(&AddSpendTypeArgs {
                name,
                parent_id: type_option(parent),
            })?;
            println!("Created spend type: {}", spend_type.name);
            println!("  ID:     {}", spend_type.id);
            println!("  Parent: {}", spend_type.parent_or_none());
        }
        SpendTypeCommands::Edit { id, name, parent } => {
            let spend_type = service.edit(&EditSpendTypeArgs {
                id,
                name,
                parent_id: type_option(parent),
            })?;
            println!(
                "Updated spend type {}: {} (parent {})",
                spend_type.id,
                spend_type.name,
                spend_type.parent_or_none()
            );
        }
        SpendTypeCommands::Remove { id } => {
            let spend_type = service.remove(id)?;
            println!("Removed spend type {}: {}", spend_type.id, spend_type.name);
        }
    }

    Ok(())
}
