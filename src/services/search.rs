//! Spend search service

use tracing::debug;

use crate::engine::SpendQuery;
use crate::error::LedgerResult;
use crate::models::{SearchSpendsArgs, SpendRow, ValidationError};
use crate::storage::Storage;

/// Service for searching spends across all months
pub struct SearchService<'a> {
    storage: &'a Storage,
}

impl<'a> SearchService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Find spends matching `args`
    ///
    /// An empty filter returns every spend ordered by date, then id.
    pub fn search(&self, args: &SearchSpendsArgs) -> LedgerResult<Vec<SpendRow>> {
        if let (Some(after), Some(before)) = (args.after, args.before) {
            if after > before {
                return Err(ValidationError::InvalidOption {
                    field: "date range",
                    value: format!("{} .. {}", after, before),
                }
                .into());
            }
        }

        let query = SpendQuery::build(args);
        let rows = self.storage.search_spends(&query)?;
        debug!(filters = query.filters.len(), found = rows.len(), "spend search");

        Ok(rows)
    }
}
