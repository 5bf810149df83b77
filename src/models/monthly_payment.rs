//! Monthly payment model
//!
//! Recurring costs (rent, subscriptions) that are subtracted from the month's
//! income before the daily budget is derived.

use serde::{Deserialize, Serialize};

use super::ids::{MonthId, MonthlyPaymentId, SpendTypeId};
use super::money::Money;
use super::validate::{check_positive, check_title, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    pub id: MonthlyPaymentId,
    pub month_id: MonthId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<SpendTypeId>,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub cost: Money,
}

impl MonthlyPayment {
    pub fn new(id: MonthlyPaymentId, args: &AddMonthlyPaymentArgs) -> Self {
        Self {
            id,
            month_id: args.month_id,
            type_id: args.type_id.filter(|t| !t.is_none()),
            title: args.title.trim().to_string(),
            notes: args.notes.trim().to_string(),
            cost: args.cost,
        }
    }

    /// Apply the fields set in `args`; a type id of 0 clears the type
    pub fn apply(&mut self, args: &EditMonthlyPaymentArgs) {
        if let Some(title) = &args.title {
            self.title = title.trim().to_string();
        }
        if let Some(type_id) = args.type_id {
            self.type_id = Some(type_id).filter(|t| !t.is_none());
        }
        if let Some(notes) = &args.notes {
            self.notes = notes.trim().to_string();
        }
        if let Some(cost) = args.cost {
            self.cost = cost;
        }
    }
}

impl Validate for MonthlyPayment {
    fn validate(&self) -> Result<(), ValidationError> {
        check_title("title", &self.title)?;
        check_positive("cost", self.cost)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMonthlyPaymentArgs {
    pub month_id: MonthId,
    pub title: String,
    pub type_id: Option<SpendTypeId>,
    pub notes: String,
    pub cost: Money,
}

impl Validate for AddMonthlyPaymentArgs {
    fn validate(&self) -> Result<(), ValidationError> {
        check_title("title", &self.title)?;
        check_positive("cost", self.cost)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditMonthlyPaymentArgs {
    pub id: MonthlyPaymentId,
    pub title: Option<String>,
    pub type_id: Option<SpendTypeId>,
    pub notes: Option<String>,
    pub cost: Option<Money>,
}

impl Validate for EditMonthlyPaymentArgs {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            check_title("title", title)?;
        }
        if let Some(cost) = self.cost {
            check_positive("cost", cost)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_args() -> AddMonthlyPaymentArgs {
        AddMonthlyPaymentArgs {
            month_id: MonthId::new(2),
            title: "Rent".into(),
            type_id: Some(SpendTypeId::NONE),
            notes: String::new(),
            cost: Money::from_int(175),
        }
    }

    #[test]
    fn test_new_drops_reserved_type() {
        let payment = MonthlyPayment::new(MonthlyPaymentId::new(1), &add_args());
        assert_eq!(payment.type_id, None);
        assert!(payment.validate().is_ok());
    }

    #[test]
    fn test_cost_must_be_positive() {
        let mut args = add_args();
        args.cost = Money::ZERO;
        assert_eq!(args.validate(), Err(ValidationError::NotPositive("cost")));
    }

    #[test]
    fn test_apply_sets_and_clears_type() {
        let mut payment = MonthlyPayment::new(MonthlyPaymentId::new(1), &add_args());

        payment.apply(&EditMonthlyPaymentArgs {
            id: payment.id,
            type_id: Some(SpendTypeId::new(4)),
            ..Default::default()
        });
        assert_eq!(payment.type_id, Some(SpendTypeId::new(4)));

        payment.apply(&EditMonthlyPaymentArgs {
            id: payment.id,
            type_id: Some(SpendTypeId::NONE),
            ..Default::default()
        });
        assert_eq!(payment.type_id, None);
        assert_eq!(payment.title, "Rent");
    }
}
