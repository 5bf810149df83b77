//! Month and Day aggregates
//!
//! A `Month` owns its incomes, monthly payments and one `Day` per calendar
//! day. The derived figures (`daily_budget`, `total_income`, `total_spend`,
//! `result` and every `Day::saldo`) are only ever written by the recompute
//! engine.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::ids::{DayId, IncomeId, MonthId, MonthlyPaymentId, SpendId};
use super::income::Income;
use super::money::Money;
use super::monthly_payment::MonthlyPayment;
use super::spend::Spend;
use super::validate::ValidationError;

/// Number of calendar days in a month, `None` for an invalid month number
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    pub id: DayId,
    pub month_id: MonthId,
    pub day: u32,
    #[serde(default)]
    pub saldo: Money,
    #[serde(default)]
    pub spends: Vec<Spend>,
}

impl Day {
    pub fn new(id: DayId, month_id: MonthId, day: u32) -> Self {
        Self {
            id,
            month_id,
            day,
            saldo: Money::ZERO,
            spends: Vec::new(),
        }
    }

    /// Sum of this day's spend costs
    pub fn spent(&self) -> Money {
        self.spends.iter().map(|s| s.cost).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Month {
    pub id: MonthId,
    pub year: i32,
    pub month: u32,

    /// Bumped on every committed change
    #[serde(default)]
    pub version: u64,

    #[serde(default)]
    pub daily_budget: Money,
    #[serde(default)]
    pub total_income: Money,
    #[serde(default)]
    pub total_spend: Money,
    #[serde(default)]
    pub result: Money,

    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub monthly_payments: Vec<MonthlyPayment>,
    #[serde(default)]
    pub days: Vec<Day>,
}

impl Month {
    /// Create a month with one empty day per calendar day
    ///
    /// Day ids are assigned consecutively starting at `first_day_id`.
    pub fn new(
        id: MonthId,
        year: i32,
        month: u32,
        first_day_id: DayId,
    ) -> Result<Self, ValidationError> {
        let count = days_in_month(year, month).ok_or(ValidationError::InvalidMonth(month))?;

        let mut day_id = first_day_id;
        let mut days = Vec::with_capacity(count as usize);
        for day in 1..=count {
            days.push(Day::new(day_id, id, day));
            day_id = day_id.next();
        }

        Ok(Self {
            id,
            year,
            month,
            version: 0,
            daily_budget: Money::ZERO,
            total_income: Money::ZERO,
            total_spend: Money::ZERO,
            result: Money::ZERO,
            incomes: Vec::new(),
            monthly_payments: Vec::new(),
            days,
        })
    }

    /// Calendar day count, or the number of stored days if the month number
    /// is out of range
    pub fn calendar_day_count(&self) -> usize {
        days_in_month(self.year, self.month)
            .map(|n| n as usize)
            .unwrap_or(self.days.len())
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn date_of(&self, day: &Day) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day.day)
    }

    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn day(&self, id: DayId) -> Option<&Day> {
        self.days.iter().find(|d| d.id == id)
    }

    pub fn day_mut(&mut self, id: DayId) -> Option<&mut Day> {
        self.days.iter_mut().find(|d| d.id == id)
    }

    pub fn day_by_number(&self, day: u32) -> Option<&Day> {
        self.days.iter().find(|d| d.day == day)
    }

    pub fn income(&self, id: IncomeId) -> Option<&Income> {
        self.incomes.iter().find(|i| i.id == id)
    }

    pub fn income_mut(&mut self, id: IncomeId) -> Option<&mut Income> {
        self.incomes.iter_mut().find(|i| i.id == id)
    }

    pub fn remove_income(&mut self, id: IncomeId) -> Option<Income> {
        let index = self.incomes.iter().position(|i| i.id == id)?;
        Some(self.incomes.remove(index))
    }

    pub fn monthly_payment(&self, id: MonthlyPaymentId) -> Option<&MonthlyPayment> {
        self.monthly_payments.iter().find(|p| p.id == id)
    }

    pub fn monthly_payment_mut(&mut self, id: MonthlyPaymentId) -> Option<&mut MonthlyPayment> {
        self.monthly_payments.iter_mut().find(|p| p.id == id)
    }

    pub fn remove_monthly_payment(&mut self, id: MonthlyPaymentId) -> Option<MonthlyPayment> {
        let index = self.monthly_payments.iter().position(|p| p.id == id)?;
        Some(self.monthly_payments.remove(index))
    }

    pub fn spend(&self, id: SpendId) -> Option<&Spend> {
        self.days
            .iter()
            .flat_map(|d| d.spends.iter())
            .find(|s| s.id == id)
    }

    pub fn spend_mut(&mut self, id: SpendId) -> Option<&mut Spend> {
        self.days
            .iter_mut()
            .flat_map(|d| d.spends.iter_mut())
            .find(|s| s.id == id)
    }

    pub fn remove_spend(&mut self, id: SpendId) -> Option<Spend> {
        self.days.iter_mut().find_map(|day| {
            let index = day.spends.iter().position(|s| s.id == id)?;
            Some(day.spends.remove(index))
        })
    }

    /// Iterate over every spend of the month in day order
    pub fn spends(&self) -> impl Iterator<Item = (&Day, &Spend)> {
        self.days
            .iter()
            .flat_map(|d| d.spends.iter().map(move |s| (d, s)))
    }

    pub fn overview(&self) -> MonthOverview {
        MonthOverview {
            id: self.id,
            year: self.year,
            month: self.month,
            daily_budget: self.daily_budget,
            total_income: self.total_income,
            total_spend: self.total_spend,
            result: self.result,
        }
    }
}

/// Month figures without rows, used for yearly listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthOverview {
    pub id: MonthId,
    pub year: i32,
    pub month: u32,
    pub daily_budget: Money,
    pub total_income: Money,
    pub total_spend: Money,
    pub result: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::spend::AddSpendArgs;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), Some(31));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2023, 2), Some(28));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2024, 4), Some(30));
        assert_eq!(days_in_month(2024, 12), Some(31));
        assert_eq!(days_in_month(2024, 13), None);
        assert_eq!(days_in_month(2024, 0), None);
    }

    #[test]
    fn test_new_month_creates_days() {
        let month = Month::new(MonthId::new(1), 2024, 2, DayId::new(10)).unwrap();
        assert_eq!(month.days.len(), 29);
        assert_eq!(month.days[0].id, DayId::new(10));
        assert_eq!(month.days[0].day, 1);
        assert_eq!(month.days[28].id, DayId::new(38));
        assert_eq!(month.days[28].day, 29);
        assert_eq!(month.calendar_day_count(), 29);
    }

    #[test]
    fn test_new_month_rejects_invalid_number() {
        assert_eq!(
            Month::new(MonthId::new(1), 2024, 13, DayId::new(1)),
            Err(ValidationError::InvalidMonth(13))
        );
    }

    #[test]
    fn test_remove_spend() {
        let mut month = Month::new(MonthId::new(1), 2024, 3, DayId::new(1)).unwrap();
        let day_id = month.days[4].id;
        let spend = Spend::new(
            SpendId::new(1),
            &AddSpendArgs {
                day_id,
                title: "Bread".into(),
                type_id: None,
                notes: String::new(),
                cost: Money::from_int(2),
            },
        );
        month.day_mut(day_id).unwrap().spends.push(spend);

        assert!(month.spend(SpendId::new(1)).is_some());
        assert_eq!(month.days[4].spent(), Money::from_int(2));
        assert!(month.remove_spend(SpendId::new(1)).is_some());
        assert!(month.spend(SpendId::new(1)).is_none());
        assert!(month.remove_spend(SpendId::new(1)).is_none());
    }

    #[test]
    fn test_dates() {
        let month = Month::new(MonthId::new(1), 2024, 3, DayId::new(1)).unwrap();
        let date = month.date_of(&month.days[14]).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert!(month.contains_date(date));
        assert!(!month.contains_date(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
    }
}
