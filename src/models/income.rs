//! Income model
//!
//! An income belongs to exactly one month and feeds the month's total income
//! and daily budget.

use serde::{Deserialize, Serialize};

use super::ids::{IncomeId, MonthId};
use super::money::Money;
use super::validate::{check_positive, check_title, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub id: IncomeId,
    pub month_id: MonthId,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub income: Money,
}

impl Income {
    pub fn new(id: IncomeId, args: &AddIncomeArgs) -> Self {
        Self {
            id,
            month_id: args.month_id,
            title: args.title.trim().to_string(),
            notes: args.notes.trim().to_string(),
            income: args.income,
        }
    }

    /// Apply the fields set in `args`, leaving the rest unchanged
    pub fn apply(&mut self, args: &EditIncomeArgs) {
        if let Some(title) = &args.title {
            self.title = title.trim().to_string();
        }
        if let Some(notes) = &args.notes {
            self.notes = notes.trim().to_string();
        }
        if let Some(income) = args.income {
            self.income = income;
        }
    }
}

impl Validate for Income {
    fn validate(&self) -> Result<(), ValidationError> {
        check_title("title", &self.title)?;
        check_positive("income", self.income)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddIncomeArgs {
    pub month_id: MonthId,
    pub title: String,
    pub notes: String,
    pub income: Money,
}

impl Validate for AddIncomeArgs {
    fn validate(&self) -> Result<(), ValidationError> {
        check_title("title", &self.title)?;
        check_positive("income", self.income)
    }
}

/// Edit arguments; `None` leaves a field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditIncomeArgs {
    pub id: IncomeId,
    pub title: Option<String>,
    pub notes: Option<String>,
    pub income: Option<Money>,
}

impl Validate for EditIncomeArgs {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            check_title("title", title)?;
        }
        if let Some(income) = self.income {
            check_positive("income", income)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_args() -> AddIncomeArgs {
        AddIncomeArgs {
            month_id: MonthId::new(1),
            title: "  Salary ".into(),
            notes: String::new(),
            income: Money::from_int(1000),
        }
    }

    #[test]
    fn test_new_trims_title() {
        let income = Income::new(IncomeId::new(3), &add_args());
        assert_eq!(income.title, "Salary");
        assert_eq!(income.month_id, MonthId::new(1));
        assert!(income.validate().is_ok());
    }

    #[test]
    fn test_add_args_validation() {
        let mut args = add_args();
        assert!(args.validate().is_ok());

        args.income = Money::ZERO;
        assert_eq!(args.validate(), Err(ValidationError::NotPositive("income")));

        args.income = Money::from_int(5);
        args.title = " ".into();
        assert_eq!(args.validate(), Err(ValidationError::EmptyField("title")));
    }

    #[test]
    fn test_edit_args_validation() {
        let mut edit = EditIncomeArgs {
            id: IncomeId::new(1),
            ..Default::default()
        };
        assert!(edit.validate().is_ok());

        edit.title = Some(String::new());
        assert!(edit.validate().is_err());

        edit.title = None;
        edit.income = Some(Money::from_int(-1));
        assert!(edit.validate().is_err());
    }

    #[test]
    fn test_apply_partial_edit() {
        let mut income = Income::new(IncomeId::new(3), &add_args());
        income.apply(&EditIncomeArgs {
            id: income.id,
            notes: Some("bonus included".into()),
            ..Default::default()
        });
        assert_eq!(income.title, "Salary");
        assert_eq!(income.notes, "bonus included");
        assert_eq!(income.income, Money::from_int(1000));
    }
}
