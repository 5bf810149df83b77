//! Spend display formatting

use crate::models::{Currency, Money, SpendRow};

use super::report::separator;

/// Format search results as a table
pub fn format_spend_rows(rows: &[SpendRow], currency: &Currency, date_format: &str) -> String {
    if rows.is_empty() {
        return "No spends found.\n".to_string();
    }

    let title_width = rows
        .iter()
        .map(|r| r.title.chars().count())
        .max()
        .unwrap_or(5)
        .clamp(5, 40);

    let mut output = String::new();
    output.push_str(&format!(
        "{:>6}  {:<12} {:<tw$} {:>16}  {}\n",
        "ID",
        "Date",
        "Title",
        "Cost",
        "Type",
        tw = title_width
    ));
    output.push_str(&separator(title_width + 56));
    output.push('\n');

    for row in rows {
        let date = row
            .date()
            .map(|d| d.format(date_format).to_string())
            .unwrap_or_else(|| format!("{}-{:02}-{:02}", row.year, row.month, row.day));
        let title: String = row.title.chars().take(title_width).collect();
        let spend_type = row.spend_type.as_ref().map(|t| t.name.as_str()).unwrap_or("-");

        output.push_str(&format!(
            "{:>6}  {:<12} {:<tw$} {:>16}  {}\n",
            row.id,
            date,
            title,
            currency.format(row.cost),
            spend_type,
            tw = title_width
        ));
    }

    let total: Money = rows.iter().map(|r| r.cost).sum();
    output.push_str(&separator(title_width + 56));
    output.push('\n');
    output.push_str(&format!(
        "{} spends, total {}\n",
        rows.len(),
        currency.format(total)
    ));

    output
}
