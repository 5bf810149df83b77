//! Storage layer for the budget ledger
//!
//! Provides JSON file storage with atomic writes, per-month write locks and
//! the audit trail. Every change to a month's rows goes through
//! `Storage::with_month_transaction`, which recomputes the month before the
//! new state becomes visible.

pub mod file_io;
pub mod months;
pub mod search;
pub mod spend_types;

pub use file_io::{read_json, write_json_atomic};
pub use months::MonthRepository;
pub use spend_types::SpendTypeRepository;

use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::config::paths::LedgerPaths;
use crate::engine::recompute;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Month, MonthId};

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: LedgerPaths,
    pub months: MonthRepository,
    pub spend_types: SpendTypeRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: LedgerPaths) -> LedgerResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            months: MonthRepository::new(paths.months_file()),
            spend_types: SpendTypeRepository::new(paths.spend_types_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Create a Storage instance and load all data from disk
    pub fn open(paths: LedgerPaths) -> LedgerResult<Self> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn paths(&self) -> &LedgerPaths {
        &self.paths
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> LedgerResult<()> {
        self.months.load()?;
        self.spend_types.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> LedgerResult<()> {
        self.months.save()?;
        self.spend_types.save()?;
        Ok(())
    }

    /// Create the month for (year, month) if it doesn't exist yet
    ///
    /// Returns the month and whether it was created by this call.
    pub fn init_month(&self, year: i32, month: u32) -> LedgerResult<(Month, bool)> {
        let (mut created, is_new) = self.months.create(year, month)?;
        if is_new {
            recompute(&mut created);
            self.months.replace(created.clone())?;
            self.months.save()?;
        }
        Ok((created, is_new))
    }

    /// Run a row mutation on one month and commit the recomputed result
    ///
    /// Writers of the same month are serialized. `f` works on a copy of the
    /// stored month; if it or the save fails, the stored month is left as it
    /// was. On success the month is recomputed, its version bumped and
    /// persisted before the lock is released.
    pub fn with_month_transaction<T, F>(&self, month_id: MonthId, f: F) -> LedgerResult<(T, Month)>
    where
        F: FnOnce(&mut Month) -> LedgerResult<T>,
    {
        let lock = self.months.month_lock(month_id)?;
        let _guard = lock
            .lock()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire month lock: {}", e)))?;

        let mut month = self
            .months
            .get(month_id)?
            .ok_or_else(|| LedgerError::month_not_found(month_id))?;

        let value = f(&mut month)?;

        recompute(&mut month);
        month.version += 1;

        let previous = self.months.replace(month.clone())?;
        if let Err(e) = self.months.save() {
            if let Some(previous) = previous {
                self.months.replace(previous)?;
            }
            return Err(e);
        }

        debug!(
            month_id = %month.id,
            version = month.version,
            daily_budget = %month.daily_budget,
            result = %month.result,
            "month recomputed"
        );

        Ok((value, month))
    }

    /// Append an entry to the audit log
    ///
    /// Runs after the change is on disk. A failed write is reported with
    /// `warn!` and leaves the change in place.
    pub fn record_audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            warn!(
                operation = %entry.operation,
                entity = %entry.entity_type,
                entity_id = entry.entity_id,
                error = %e,
                "failed to write audit entry"
            );
        }
    }
}
