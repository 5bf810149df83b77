//! Spent by Spend Type Report
//!
//! Totals per spend type. A spend also counts towards every ancestor of its
//! type, so a parent's total covers its whole subtree.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::display::report::{format_percentage, separator};
use crate::engine::{SpendQuery, SpendTypeGraph};
use crate::error::LedgerResult;
use crate::models::{Currency, Money, SearchSpendsArgs, SpendRow, SpendType, SpendTypeId};
use crate::storage::Storage;

/// Name used for spends without a type
pub const NO_TYPE_NAME: &str = "No Type";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSpending {
    /// `None` for the "No Type" group
    pub type_id: Option<SpendTypeId>,
    pub name: String,
    pub parent_id: Option<SpendTypeId>,
    /// Spent by this type and its descendants
    pub spent: Money,
    /// Number of spends counted in `spent`
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpentByTypeReport {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Types with a non-zero total, biggest first, ties by name
    pub types: Vec<TypeSpending>,
    /// Sum of all spends, each counted once
    pub total: Money,
}

impl SpentByTypeReport {
    /// Build the report from already loaded spend rows
    ///
    /// The ancestor walk stops after `max_depth` hops. A type whose chain is
    /// malformed only counts towards itself.
    pub fn from_rows(rows: &[SpendRow], spend_types: &[SpendType], max_depth: usize) -> Self {
        let graph = SpendTypeGraph::from_spend_types(spend_types).with_max_depth(max_depth);
        let by_id: HashMap<SpendTypeId, &SpendType> = spend_types.iter().map(|t| (t.id, t)).collect();

        let mut totals: HashMap<Option<SpendTypeId>, (Money, usize)> = HashMap::new();
        let mut total = Money::ZERO;

        for row in rows {
            total += row.cost;

            let type_id = row.type_id().filter(|id| by_id.contains_key(id));
            let mut chain = vec![type_id];
            if let Some(id) = type_id {
                match graph.ancestors(id) {
                    Ok(ancestors) => chain.extend(ancestors.into_iter().map(Some)),
                    Err(e) => warn!(spend_type_id = %id, error = %e, "skipping ancestors of spend type"),
                }
            }

            for id in chain {
                let entry = totals.entry(id).or_insert((Money::ZERO, 0));
                entry.0 += row.cost;
                entry.1 += 1;
            }
        }

        let mut types: Vec<TypeSpending> = totals
            .into_iter()
            .filter(|(_, (spent, _))| !spent.is_zero())
            .map(|(type_id, (spent, count))| {
                let spend_type = type_id.and_then(|id| by_id.get(&id));
                TypeSpending {
                    type_id,
                    name: spend_type
                        .map(|t| t.name.clone())
                        .unwrap_or_else(|| NO_TYPE_NAME.to_string()),
                    parent_id: spend_type.and_then(|t| t.parent_id),
                    spent,
                    count,
                }
            })
            .collect();

        types.sort_by(|a, b| match b.spent.cmp(&a.spent) {
            Ordering::Equal => a.name.cmp(&b.name),
            other => other,
        });

        Self {
            start_date: None,
            end_date: None,
            types,
            total,
        }
    }

    /// Generate the report from stored spends, optionally limited to a
    /// date range
    pub fn generate(
        storage: &Storage,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
        max_depth: usize,
    ) -> LedgerResult<Self> {
        let query = SpendQuery::build(&SearchSpendsArgs {
            after: start_date,
            before: end_date,
            ..SearchSpendsArgs::default()
        });
        let rows = storage.search_spends(&query)?;
        let spend_types = storage.spend_types.get_all()?;

        let mut report = Self::from_rows(&rows, &spend_types, max_depth);
        report.start_date = start_date;
        report.end_date = end_date;
        Ok(report)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency: &Currency) -> String {
        let mut output = String::new();

        let range = match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => format!("{} to {}", start, end),
            (Some(start), None) => format!("since {}", start),
            (None, Some(end)) => format!("until {}", end),
            (None, None) => "all time".to_string(),
        };
        output.push_str(&format!("Spent by Spend Type: {}\n", range));
        output.push_str(&separator(70));
        output.push('\n');

        if self.types.is_empty() {
            output.push_str("No spends found.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<32} {:>18} {:>8} {:>8}\n",
            "Spend Type", "Spent", "Count", "%"
        ));

        let total = self.total.to_float();
        for entry in &self.types {
            let pct = if total == 0.0 {
                0.0
            } else {
                entry.spent.to_float() / total * 100.0
            };
            output.push_str(&format!(
                "{:<32} {:>18} {:>8} {:>8}\n",
                entry.name,
                currency.format(entry.spent),
                entry.count,
                format_percentage(pct)
            ));
        }

        output.push_str(&separator(70));
        output.push('\n');
        output.push_str(&format!("{:<32} {:>18}\n", "Total", currency.format(self.total)));

        output
    }
}
