//! Month display formatting
//!
//! Formats a month with its incomes, monthly payments and the daily saldo
//! table, and yearly month listings.

use std::collections::HashMap;

use super::report::{double_separator, separator};
use crate::models::{Currency, Month, MonthOverview, SpendType, SpendTypeId};

fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    month
        .checked_sub(1)
        .and_then(|i| NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}

fn type_label(types: &HashMap<SpendTypeId, SpendType>, type_id: Option<SpendTypeId>) -> String {
    type_id
        .and_then(|id| types.get(&id))
        .map(|t| format!(" [{}]", t.name))
        .unwrap_or_default()
}

/// Format a month for terminal display
pub fn format_month(
    month: &Month,
    types: &HashMap<SpendTypeId, SpendType>,
    currency: &Currency,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{} {} (month {}, version {})\n",
        month_name(month.month),
        month.year,
        month.id,
        month.version
    ));
    output.push_str(&double_separator(60));
    output.push('\n');
    output.push_str(&format!("  Total income:  {:>20}\n", currency.format(month.total_income)));
    output.push_str(&format!("  Total spend:   {:>20}\n", currency.format(month.total_spend)));
    output.push_str(&format!("  Daily budget:  {:>20}\n", currency.format(month.daily_budget)));
    output.push_str(&format!("  Result:        {:>20}\n", currency.format(month.result)));

    output.push_str("\nIncomes\n");
    if month.incomes.is_empty() {
        output.push_str("  (none)\n");
    }
    for income in &month.incomes {
        output.push_str(&format!(
            "  {:>5}  {:<30} {:>18}\n",
            income.id,
            income.title,
            currency.format(income.income)
        ));
    }

    output.push_str("\nMonthly Payments\n");
    if month.monthly_payments.is_empty() {
        output.push_str("  (none)\n");
    }
    for payment in &month.monthly_payments {
        output.push_str(&format!(
            "  {:>5}  {:<30} {:>18}{}\n",
            payment.id,
            payment.title,
            currency.format(payment.cost),
            type_label(types, payment.type_id)
        ));
    }

    output.push_str("\nDays\n");
    output.push_str(&separator(60));
    output.push('\n');
    for day in &month.days {
        let date = month
            .date_of(day)
            .map(|d| d.format(date_format).to_string())
            .unwrap_or_else(|| day.day.to_string());

        output.push_str(&format!(
            "{:<12} saldo {:>18}\n",
            date,
            currency.format(day.saldo)
        ));
        for spend in &day.spends {
            output.push_str(&format!(
                "    {:>5}  {:<28} {:>18}{}\n",
                spend.id,
                spend.title,
                currency.format(spend.cost),
                type_label(types, spend.type_id)
            ));
        }
    }

    output
}

/// Format the overviews of a year's months as a table
pub fn format_month_list(months: &[MonthOverview], currency: &Currency) -> String {
    if months.is_empty() {
        return "No months found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10} {:>18} {:>18} {:>16} {:>18}\n",
        "Month", "Income", "Spend", "Daily", "Result"
    ));
    output.push_str(&separator(84));
    output.push('\n');

    for m in months {
        output.push_str(&format!(
            "{:<10} {:>18} {:>18} {:>16} {:>18}\n",
            format!("{}-{:02}", m.year, m.month),
            currency.format(m.total_income),
            currency.format(m.total_spend),
            currency.format(m.daily_budget),
            currency.format(m.result)
        ));
    }

    output
}
