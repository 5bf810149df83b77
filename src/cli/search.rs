//! Spend search CLI command

use clap::Args;

use crate::config::settings::Settings;
use crate::display::format_spend_rows;
use crate::error::LedgerResult;
use crate::models::{Order, SearchSpendsArgs, SortBy, SpendTypeId};
use crate::services::{LedgerRules, SearchService};
use crate::storage::Storage;

use super::{parse_amount, parse_optional_date};

/// Spend search filters
///
/// Every filter is optional; with none given all spends are listed.
#[derive(Args)]
pub struct SearchCommand {
    /// Text the title must contain (case-insensitive)
    #[arg(long)]
    title: Option<String>,

    /// Require the title to match exactly
    #[arg(long)]
    title_exactly: bool,

    /// Text the notes must contain (case-insensitive)
    #[arg(long)]
    notes: Option<String>,

    /// Require the notes to match exactly
    #[arg(long)]
    notes_exactly: bool,

    /// Earliest date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    after: Option<String>,

    /// Latest date (YYYY-MM-DD, inclusive)
    #[arg(long)]
    before: Option<String>,

    /// Smallest cost
    #[arg(long, allow_hyphen_values = true)]
    min_cost: Option<String>,

    /// Largest cost
    #[arg(long, allow_hyphen_values = true)]
    max_cost: Option<String>,

    /// Only spends without a type
    #[arg(long, conflicts_with = "type_ids")]
    without_type: bool,

    /// Only spends of these type IDs (0 matches spends without a type)
    #[arg(short = 't', long = "type")]
    type_ids: Vec<SpendTypeId>,

    /// Sort by date, title or cost
    #[arg(short, long, default_value = "date")]
    sort: SortBy,

    /// Sort order, asc or desc
    #[arg(short, long, default_value = "asc")]
    order: Order,
}

impl SearchCommand {
    fn into_args(self) -> LedgerResult<SearchSpendsArgs> {
        Ok(SearchSpendsArgs {
            title: self.title.unwrap_or_default(),
            notes: self.notes.unwrap_or_default(),
            title_exactly: self.title_exactly,
            notes_exactly: self.notes_exactly,
            after: parse_optional_date("after", self.after)?,
            before: parse_optional_date("before", self.before)?,
            min_cost: self.min_cost.as_deref().map(parse_amount).transpose()?,
            max_cost: self.max_cost.as_deref().map(parse_amount).transpose()?,
            without_type: self.without_type,
            type_ids: self.type_ids,
            sort: self.sort,
            order: self.order,
        })
    }
}

/// Handle the search command
pub fn handle_search_command(
    storage: &Storage,
    settings: &Settings,
    cmd: SearchCommand,
) -> LedgerResult<()> {
    let rules = LedgerRules::from_settings(settings)?;
    let rows = SearchService::new(storage).search(&cmd.into_args()?)?;
    print!(
        "{}",
        format_spend_rows(&rows, &rules.currency, &settings.date_format)
    );
    Ok(())
}
