//! Month repository for JSON storage
//!
//! Keeps every Month aggregate (days, incomes, payments, spends) in
//! months.json together with the id sequences of all row types.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    Day, DayId, IncomeId, Month, MonthId, MonthOverview, MonthlyPaymentId, SpendId, SpendTypeId,
};

use super::file_io::{read_json, write_json_atomic};

/// Last id handed out per row type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSequences {
    pub month: MonthId,
    pub day: DayId,
    pub income: IncomeId,
    pub monthly_payment: MonthlyPaymentId,
    pub spend: SpendId,
}

impl IdSequences {
    /// Raise every sequence to at least the highest id used by `month`
    fn cover(&mut self, month: &Month) {
        self.month = self.month.max(month.id);
        for day in &month.days {
            self.day = self.day.max(day.id);
            for spend in &day.spends {
                self.spend = self.spend.max(spend.id);
            }
        }
        for income in &month.incomes {
            self.income = self.income.max(income.id);
        }
        for payment in &month.monthly_payments {
            self.monthly_payment = self.monthly_payment.max(payment.id);
        }
    }
}

/// Serializable month data structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthData {
    #[serde(default)]
    pub sequences: IdSequences,
    #[serde(default)]
    pub months: Vec<Month>,
}

/// Repository for month persistence
pub struct MonthRepository {
    path: PathBuf,
    months: RwLock<BTreeMap<MonthId, Month>>,
    sequences: Mutex<IdSequences>,
    month_locks: Mutex<HashMap<MonthId, Arc<Mutex<()>>>>,
    save_lock: Mutex<()>,
}

fn lock_error(e: impl std::fmt::Display) -> LedgerError {
    LedgerError::Storage(format!("Failed to acquire lock: {}", e))
}

impl MonthRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            months: RwLock::new(BTreeMap::new()),
            sequences: Mutex::new(IdSequences::default()),
            month_locks: Mutex::new(HashMap::new()),
            save_lock: Mutex::new(()),
        }
    }

    /// Load months from disk
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: MonthData = read_json(&self.path)?;

        let mut months = self.months.write().map_err(lock_error)?;
        let mut sequences = self.sequences.lock().map_err(lock_error)?;

        months.clear();
        *sequences = file_data.sequences;
        for mut month in file_data.months {
            month.days.sort_by_key(|d| d.day);
            sequences.cover(&month);
            months.insert(month.id, month);
        }

        Ok(())
    }

    /// Save months to disk
    pub fn save(&self) -> LedgerResult<()> {
        let _guard = self.save_lock.lock().map_err(lock_error)?;

        let file_data = {
            let months = self.months.read().map_err(lock_error)?;
            let sequences = self.sequences.lock().map_err(lock_error)?;
            MonthData {
                sequences: *sequences,
                months: months.values().cloned().collect(),
            }
        };

        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: MonthId) -> LedgerResult<Option<Month>> {
        let months = self.months.read().map_err(lock_error)?;
        Ok(months.get(&id).cloned())
    }

    /// Get a month by year and month number
    pub fn find(&self, year: i32, month: u32) -> LedgerResult<Option<Month>> {
        let months = self.months.read().map_err(lock_error)?;
        Ok(months
            .values()
            .find(|m| m.year == year && m.month == month)
            .cloned())
    }

    /// Overviews of a year's months, ordered by month number
    pub fn list_year(&self, year: i32) -> LedgerResult<Vec<MonthOverview>> {
        let months = self.months.read().map_err(lock_error)?;
        let mut list: Vec<_> = months
            .values()
            .filter(|m| m.year == year)
            .map(Month::overview)
            .collect();
        list.sort_by_key(|m| m.month);
        Ok(list)
    }

    /// All months ordered by date
    pub fn get_all(&self) -> LedgerResult<Vec<Month>> {
        let months = self.months.read().map_err(lock_error)?;
        let mut list: Vec<_> = months.values().cloned().collect();
        list.sort_by_key(|m| (m.year, m.month));
        Ok(list)
    }

    pub fn get_day(&self, id: DayId) -> LedgerResult<Option<Day>> {
        let months = self.months.read().map_err(lock_error)?;
        Ok(months.values().find_map(|m| m.day(id)).cloned())
    }

    pub fn get_day_by_date(&self, date: NaiveDate) -> LedgerResult<Option<Day>> {
        let months = self.months.read().map_err(lock_error)?;
        Ok(months
            .values()
            .find(|m| m.contains_date(date))
            .and_then(|m| m.day_by_number(date.day()))
            .cloned())
    }

    pub fn month_of_income(&self, id: IncomeId) -> LedgerResult<Option<MonthId>> {
        let months = self.months.read().map_err(lock_error)?;
        Ok(months.values().find(|m| m.income(id).is_some()).map(|m| m.id))
    }

    pub fn month_of_monthly_payment(&self, id: MonthlyPaymentId) -> LedgerResult<Option<MonthId>> {
        let months = self.months.read().map_err(lock_error)?;
        Ok(months
            .values()
            .find(|m| m.monthly_payment(id).is_some())
            .map(|m| m.id))
    }

    pub fn month_of_spend(&self, id: SpendId) -> LedgerResult<Option<MonthId>> {
        let months = self.months.read().map_err(lock_error)?;
        Ok(months.values().find(|m| m.spend(id).is_some()).map(|m| m.id))
    }

    /// Whether any monthly payment or spend is tagged with `type_id`
    pub fn uses_spend_type(&self, type_id: SpendTypeId) -> LedgerResult<bool> {
        let months = self.months.read().map_err(lock_error)?;
        Ok(months.values().any(|m| {
            m.monthly_payments.iter().any(|p| p.type_id == Some(type_id))
                || m.spends().any(|(_, s)| s.type_id == Some(type_id))
        }))
    }

    /// Create the month with one day per calendar day unless it exists
    ///
    /// Returns the month and whether it was created by this call.
    pub fn create(&self, year: i32, month: u32) -> LedgerResult<(Month, bool)> {
        let mut months = self.months.write().map_err(lock_error)?;
        if let Some(existing) = months.values().find(|m| m.year == year && m.month == month) {
            return Ok((existing.clone(), false));
        }

        let mut sequences = self.sequences.lock().map_err(lock_error)?;
        let id = sequences.month.next();
        let created = Month::new(id, year, month, sequences.day.next())?;

        sequences.month = id;
        sequences.cover(&created);
        months.insert(id, created.clone());

        Ok((created, true))
    }

    pub fn next_income_id(&self) -> LedgerResult<IncomeId> {
        let mut sequences = self.sequences.lock().map_err(lock_error)?;
        sequences.income = sequences.income.next();
        Ok(sequences.income)
    }

    pub fn next_monthly_payment_id(&self) -> LedgerResult<MonthlyPaymentId> {
        let mut sequences = self.sequences.lock().map_err(lock_error)?;
        sequences.monthly_payment = sequences.monthly_payment.next();
        Ok(sequences.monthly_payment)
    }

    pub fn next_spend_id(&self) -> LedgerResult<SpendId> {
        let mut sequences = self.sequences.lock().map_err(lock_error)?;
        sequences.spend = sequences.spend.next();
        Ok(sequences.spend)
    }

    /// Writer lock for a single month
    pub fn month_lock(&self, id: MonthId) -> LedgerResult<Arc<Mutex<()>>> {
        let mut locks = self.month_locks.lock().map_err(lock_error)?;
        Ok(Arc::clone(locks.entry(id).or_default()))
    }

    /// Store `month`, returning the version it replaced
    pub fn replace(&self, month: Month) -> LedgerResult<Option<Month>> {
        let mut months = self.months.write().map_err(lock_error)?;
        Ok(months.insert(month.id, month))
    }

    pub fn count(&self) -> LedgerResult<usize> {
        let months = self.months.read().map_err(lock_error)?;
        Ok(months.len())
    }
}
