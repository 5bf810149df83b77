//! Month service
//!
//! Month initialisation and read access to months and days.

use chrono::{Datelike, Local, NaiveDate};
use tracing::info;

use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Day, DayId, Month, MonthId, MonthOverview, ValidationError};
use crate::storage::Storage;

/// Service for month management
pub struct MonthService<'a> {
    storage: &'a Storage,
}

/// "YYYY-MM" label used in audit entries and messages
pub fn month_label(year: i32, month: u32) -> String {
    format!("{}-{:02}", year, month)
}

impl<'a> MonthService<'a> {
    /// Create a new month service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create the month for (year, month) with all its days
    ///
    /// Calling this for an existing month returns it unchanged.
    pub fn init(&self, year: i32, month: u32) -> LedgerResult<Month> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month).into());
        }

        let (created, is_new) = self.storage.init_month(year, month)?;
        if is_new {
            self.storage.record_audit(
                AuditEntry::created(
                    EntityType::Month,
                    created.id.value(),
                    &month_label(year, month),
                    &created.overview(),
                )
                .in_month(&created),
            );
            info!(month_id = %created.id, year, month, days = created.days.len(), "month initialised");
        }

        Ok(created)
    }

    /// Initialise the month containing today's local date
    pub fn init_current(&self) -> LedgerResult<Month> {
        let today = Local::now().date_naive();
        self.init(today.year(), today.month())
    }

    pub fn get(&self, id: MonthId) -> LedgerResult<Month> {
        self.storage
            .months
            .get(id)?
            .ok_or_else(|| LedgerError::month_not_found(id))
    }

    /// Get a month by year and month number
    pub fn find(&self, year: i32, month: u32) -> LedgerResult<Month> {
        self.storage
            .months
            .find(year, month)?
            .ok_or_else(|| LedgerError::month_not_found(month_label(year, month)))
    }

    /// Overviews of every initialised month of `year`
    pub fn list_year(&self, year: i32) -> LedgerResult<Vec<MonthOverview>> {
        let months = self.storage.months.list_year(year)?;
        if months.is_empty() {
            return Err(LedgerError::month_not_found(format!("any in {}", year)));
        }
        Ok(months)
    }

    pub fn get_day(&self, id: DayId) -> LedgerResult<Day> {
        self.storage
            .months
            .get_day(id)?
            .ok_or_else(|| LedgerError::day_not_found(id))
    }

    /// Get the day for `date`; its month must already be initialised
    pub fn day_by_date(&self, date: NaiveDate) -> LedgerResult<Day> {
        self.storage
            .months
            .get_day_by_date(date)?
            .ok_or_else(|| LedgerError::day_not_found(date))
    }

    /// Get the day for `date`, initialising its month first if needed
    pub fn day_for_date(&self, date: NaiveDate) -> LedgerResult<Day> {
        self.init(date.year(), date.month())?;
        self.day_by_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::LedgerPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_init_creates_calendar_days() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MonthService::new(&storage);

        let feb = service.init(2024, 2).unwrap();
        assert_eq!(feb.days.len(), 29);
        assert_eq!(feb.days[28].day, 29);

        let again = service.init(2024, 2).unwrap();
        assert_eq!(again.id, feb.id);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entity_type, EntityType::Month);
        assert_eq!(entries[0].label, "2024-02");
        assert_eq!(entries[0].month.map(|m| m.month_id), Some(feb.id));
    }

    #[test]
    fn test_init_rejects_bad_month() {
        let (_temp_dir, storage) = create_test_storage();
        let err = MonthService::new(&storage).init(2024, 13).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_lookups() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MonthService::new(&storage);
        let april = service.init(2024, 4).unwrap();
        service.init(2024, 1).unwrap();

        assert_eq!(service.get(april.id).unwrap().id, april.id);
        assert_eq!(service.find(2024, 4).unwrap().id, april.id);
        assert!(service.find(2024, 5).unwrap_err().is_not_found());
        assert!(service.get(MonthId::new(99)).unwrap_err().is_not_found());

        let months: Vec<u32> = service.list_year(2024).unwrap().iter().map(|m| m.month).collect();
        assert_eq!(months, vec![1, 4]);
        assert!(service.list_year(2023).unwrap_err().is_not_found());
    }

    #[test]
    fn test_day_lookups() {
        let (_temp_dir, storage) = create_test_storage();
        let service = MonthService::new(&storage);
        let date = NaiveDate::from_ymd_opt(2024, 4, 15).unwrap();

        assert!(service.day_by_date(date).unwrap_err().is_not_found());

        let day = service.day_for_date(date).unwrap();
        assert_eq!(day.day, 15);
        assert_eq!(service.get_day(day.id).unwrap(), day);
        assert_eq!(service.day_by_date(date).unwrap().id, day.id);
        assert!(service.get_day(DayId::new(1000)).unwrap_err().is_not_found());
    }
}
