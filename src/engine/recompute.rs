//! Month recomputation
//!
//! Derives a month's totals, daily budget and the running balance of every
//! day from its incomes, monthly payments and spends. The computation is a
//! pure function of the rows: running it twice yields identical figures.

use crate::models::{Money, Month};

/// Recompute `month` over its calendar day count
///
/// # Panics
///
/// Panics if the month number is out of range and no days are stored, as
/// the day count is then zero. `Month::new` refuses such months.
pub fn recompute(month: &mut Month) {
    let day_count = month.calendar_day_count();
    recompute_over(month, day_count);
}

/// Recompute `month`, spreading the budget over `day_count` days
///
/// Days are expected in ascending day order. Each day's saldo is the
/// previous day's saldo plus the daily budget minus that day's spends, so
/// truncation from the division accumulates the same way on every run.
///
/// # Panics
///
/// Panics if `day_count` is zero.
pub fn recompute_over(month: &mut Month, day_count: usize) {
    let total_income: Money = month.incomes.iter().map(|i| i.income).sum();
    let monthly_payments: Money = -month.monthly_payments.iter().map(|p| p.cost).sum::<Money>();
    let spends: Money = -month.days.iter().map(|d| d.spent()).sum::<Money>();

    let day_count = i64::try_from(day_count).unwrap_or(i64::MAX);
    let daily_budget = (total_income + monthly_payments).div(day_count);

    month.total_income = total_income;
    month.daily_budget = daily_budget;
    month.total_spend = monthly_payments + spends;
    month.result = month.total_income + month.total_spend;

    let mut saldo = daily_budget;
    for day in month.days.iter_mut() {
        day.saldo = saldo - day.spent();
        saldo = day.saldo + daily_budget;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AddIncomeArgs, AddMonthlyPaymentArgs, AddSpendArgs, DayId, Income, IncomeId, MonthId,
        MonthlyPayment, MonthlyPaymentId, Spend, SpendId,
    };

    fn money(major: i64) -> Money {
        Money::from_int(major)
    }

    /// Build a month whose first `day_costs.len()` days carry the given spends
    fn build_month(
        year: i32,
        number: u32,
        incomes: &[i64],
        payments: &[i64],
        day_costs: &[&[i64]],
    ) -> Month {
        let id = MonthId::new(1);
        let mut month = Month::new(id, year, number, DayId::new(1)).unwrap();
        month.days.truncate(day_costs.len().max(1));

        for (i, amount) in incomes.iter().enumerate() {
            month.incomes.push(Income::new(
                IncomeId::new(i as u64 + 1),
                &AddIncomeArgs {
                    month_id: id,
                    title: format!("income {}", i),
                    notes: String::new(),
                    income: money(*amount),
                },
            ));
        }
        for (i, cost) in payments.iter().enumerate() {
            month.monthly_payments.push(MonthlyPayment::new(
                MonthlyPaymentId::new(i as u64 + 1),
                &AddMonthlyPaymentArgs {
                    month_id: id,
                    title: format!("payment {}", i),
                    type_id: None,
                    notes: String::new(),
                    cost: money(*cost),
                },
            ));
        }

        let mut spend_id = SpendId::new(1);
        for (day, costs) in month.days.iter_mut().zip(day_costs) {
            for cost in costs.iter() {
                day.spends.push(Spend::new(
                    spend_id,
                    &AddSpendArgs {
                        day_id: day.id,
                        title: "spend".into(),
                        type_id: None,
                        notes: String::new(),
                        cost: money(*cost),
                    },
                ));
                spend_id = spend_id.next();
            }
        }
        month
    }

    fn saldos(month: &Month) -> Vec<Money> {
        month.days.iter().map(|d| d.saldo).collect()
    }

    #[test]
    fn test_incomes_payments_and_spends() {
        let mut month = build_month(
            2020,
            1,
            &[700, 150, 150],
            &[175, 25],
            &[&[], &[99, 1], &[12], &[]],
        );
        recompute_over(&mut month, 4);

        assert_eq!(month.daily_budget, money(200));
        assert_eq!(saldos(&month), vec![money(200), money(300), money(488), money(688)]);
        assert_eq!(month.total_income, money(1000));
        assert_eq!(month.total_spend, money(-312));
        assert_eq!(month.result, money(688));
    }

    #[test]
    fn test_cashback_offsets_spend() {
        let mut month = build_month(2020, 1, &[1000], &[], &[&[], &[99, -99], &[120], &[]]);
        recompute_over(&mut month, 4);

        assert_eq!(month.daily_budget, money(250));
        assert_eq!(saldos(&month), vec![money(250), money(500), money(630), money(880)]);
        assert_eq!(month.total_income, money(1000));
        assert_eq!(month.total_spend, money(-120));
        assert_eq!(month.result, money(880));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut month = build_month(2021, 4, &[1000, 37], &[13], &[&[5, 7], &[], &[-3]]);
        recompute(&mut month);
        let first = month.clone();
        recompute(&mut month);
        assert_eq!(month, first);
    }

    #[test]
    fn test_cascade_relation_holds_for_every_day() {
        let mut month = Month::new(MonthId::new(1), 2021, 7, DayId::new(1)).unwrap();
        month.incomes.push(Income::new(
            IncomeId::new(1),
            &AddIncomeArgs {
                month_id: month.id,
                title: "Salary".into(),
                notes: String::new(),
                income: Money::from_minor(123_457),
            },
        ));
        for (i, day) in month.days.iter_mut().enumerate().filter(|(i, _)| i % 3 == 0) {
            day.spends.push(Spend::new(
                SpendId::new(i as u64 + 1),
                &AddSpendArgs {
                    day_id: day.id,
                    title: "Lunch".into(),
                    type_id: None,
                    notes: String::new(),
                    cost: Money::from_minor(1_999 + i as i64),
                },
            ));
        }
        recompute(&mut month);

        let mut previous = Money::ZERO;
        for day in &month.days {
            assert_eq!(day.saldo, previous + month.daily_budget - day.spent());
            previous = day.saldo;
        }
    }

    #[test]
    fn test_uses_calendar_day_count() {
        let mut leap = build_month(2024, 2, &[2900], &[], &[]);
        leap.days = Month::new(leap.id, 2024, 2, DayId::new(1)).unwrap().days;
        recompute(&mut leap);
        assert_eq!(leap.daily_budget, money(100));
        assert_eq!(leap.days.last().unwrap().saldo, money(2900));

        let mut common = Month::new(MonthId::new(2), 2023, 2, DayId::new(1)).unwrap();
        common.incomes = leap.incomes.clone();
        recompute(&mut common);
        assert_eq!(common.daily_budget, Money::from_minor(10_357));
    }

    #[test]
    fn test_truncation_accumulates() {
        let mut month = Month::new(MonthId::new(1), 2021, 4, DayId::new(1)).unwrap();
        month.incomes.push(Income::new(
            IncomeId::new(1),
            &AddIncomeArgs {
                month_id: month.id,
                title: "Salary".into(),
                notes: String::new(),
                income: money(1000),
            },
        ));
        recompute(&mut month);

        assert_eq!(month.daily_budget, Money::from_minor(3_333));
        assert_eq!(month.days[29].saldo, Money::from_minor(99_990));
        assert_eq!(month.result, money(1000));
    }

    #[test]
    fn test_empty_month() {
        let mut month = build_month(2022, 5, &[], &[], &[&[10], &[], &[5]]);
        recompute_over(&mut month, 3);

        assert_eq!(month.daily_budget, Money::ZERO);
        assert_eq!(saldos(&month), vec![money(-10), money(-10), money(-15)]);
        assert_eq!(month.total_spend, money(-15));
        assert_eq!(month.result, money(-15));
    }

    #[test]
    fn test_total_income_independent_of_order() {
        let mut a = build_month(2022, 5, &[700, 150, 150], &[], &[&[]]);
        let mut b = a.clone();
        b.incomes.reverse();
        recompute_over(&mut a, 1);
        recompute_over(&mut b, 1);
        assert_eq!(a.total_income, b.total_income);
        assert_eq!(a.total_income, money(1000));
    }

    #[test]
    #[should_panic]
    fn test_month_without_calendar_or_days_panics() {
        let mut month = build_month(2022, 5, &[100], &[], &[]);
        month.month = 13;
        month.days.clear();
        recompute(&mut month);
    }

    #[test]
    #[should_panic]
    fn test_zero_day_count_panics() {
        let mut month = build_month(2022, 5, &[100], &[], &[&[]]);
        recompute_over(&mut month, 0);
    }
}
