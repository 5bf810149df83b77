//! In-memory evaluation of spend search queries

use std::collections::HashMap;

use crate::engine::SpendQuery;
use crate::error::LedgerResult;
use crate::models::{Month, SpendRow, SpendType, SpendTypeId};

use super::Storage;

/// Flatten months into search rows, joining each spend with its type
pub fn spend_rows(months: &[Month], types: &HashMap<SpendTypeId, SpendType>) -> Vec<SpendRow> {
    months
        .iter()
        .flat_map(|month| {
            month.spends().map(move |(day, spend)| SpendRow {
                id: spend.id,
                year: month.year,
                month: month.month,
                day: day.day,
                title: spend.title.clone(),
                notes: spend.notes.clone(),
                cost: spend.cost,
                spend_type: spend.type_id.and_then(|id| types.get(&id).cloned()),
            })
        })
        .collect()
}

impl Storage {
    /// Evaluate `query` over every stored spend
    pub fn search_spends(&self, query: &SpendQuery) -> LedgerResult<Vec<SpendRow>> {
        let months = self.months.get_all()?;
        let types: HashMap<SpendTypeId, SpendType> = self
            .spend_types
            .get_all()?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        Ok(query.apply(spend_rows(&months, &types)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AddSpendArgs, DayId, Money, MonthId, Spend, SpendId};

    #[test]
    fn test_rows_carry_date_and_type() {
        let mut month = Month::new(MonthId::new(1), 2024, 5, DayId::new(1)).unwrap();
        for (index, type_id) in [(0, Some(SpendTypeId::new(1))), (9, None)] {
            let day = &mut month.days[index];
            day.spends.push(Spend::new(
                SpendId::new(index as u64 + 1),
                &AddSpendArgs {
                    day_id: day.id,
                    title: "Lunch".into(),
                    type_id,
                    notes: String::new(),
                    cost: Money::from_int(12),
                },
            ));
        }
        let types = HashMap::from([(
            SpendTypeId::new(1),
            SpendType {
                id: SpendTypeId::new(1),
                name: "Food".into(),
                parent_id: None,
            },
        )]);

        let rows = spend_rows(&[month], &types);

        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].year, rows[0].month, rows[0].day), (2024, 5, 1));
        assert_eq!(rows[0].spend_type.as_ref().unwrap().name, "Food");
        assert_eq!(rows[1].day, 10);
        assert!(rows[1].spend_type.is_none());
    }
}
