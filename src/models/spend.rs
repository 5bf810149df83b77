//! Spend model
//!
//! A discretionary expense recorded on a single day. Negative costs record
//! refunds or cashback; whether they are accepted is decided by the
//! configured `SpendCostPolicy`.

use serde::{Deserialize, Serialize};

use super::ids::{DayId, SpendId, SpendTypeId};
use super::money::Money;
use super::validate::{check_title, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spend {
    pub id: SpendId,
    pub day_id: DayId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_id: Option<SpendTypeId>,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub cost: Money,
}

impl Spend {
    pub fn new(id: SpendId, args: &AddSpendArgs) -> Self {
        Self {
            id,
            day_id: args.day_id,
            type_id: args.type_id.filter(|t| !t.is_none()),
            title: args.title.trim().to_string(),
            notes: args.notes.trim().to_string(),
            cost: args.cost,
        }
    }

    /// Apply the fields set in `args`; a type id of 0 clears the type
    pub fn apply(&mut self, args: &EditSpendArgs) {
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

impl Validate for Spend {
    fn validate(&self) -> Result<(), ValidationError> {
        check_title("title", &self.title).map(|_| ())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSpendArgs {
    pub day_id: DayId,
    pub title: String,
    pub type_id: Option<SpendTypeId>,
    pub notes: String,
    pub cost: Money,
}

impl Validate for AddSpendArgs {
    fn validate(&self) -> Result<(), ValidationError> {
        check_title("title", &self.title).map(|_| ())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSpendArgs {
    pub id: SpendId,
    pub title: Option<String>,
    pub type_id: Option<SpendTypeId>,
    pub notes: Option<String>,
    pub cost: Option<Money>,
}

impl Validate for EditSpendArgs {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            check_title("title", title)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_spend() {
        let spend = Spend::new(
            SpendId::new(9),
            &AddSpendArgs {
                day_id: DayId::new(2),
                title: " Coffee ".into(),
                type_id: Some(SpendTypeId::new(1)),
                notes: String::new(),
                cost: Money::from_minor(350),
            },
        );
        assert_eq!(spend.title, "Coffee");
        assert_eq!(spend.type_id, Some(SpendTypeId::new(1)));
        assert!(spend.validate().is_ok());
    }

    #[test]
    fn test_negative_cost_passes_entity_validation() {
        let args = AddSpendArgs {
            day_id: DayId::new(2),
            title: "Cashback".into(),
            type_id: None,
            notes: String::new(),
            cost: Money::from_int(-99),
        };
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_edit_rejects_empty_title() {
        let edit = EditSpendArgs {
            id: SpendId::new(1),
            title: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(edit.validate(), Err(ValidationError::EmptyField("title")));
    }

    #[test]
    fn test_json_omits_missing_type() {
        let spend = Spend {
            id: SpendId::new(1),
            day_id: DayId::new(1),
            type_id: None,
            title: "Bread".into(),
            notes: String::new(),
            cost: Money::from_minor(199),
        };
        let json = serde_json::to_string(&spend).unwrap();
        assert!(!json.contains("type_id"));
        assert!(json.contains(r#""cost":"1.99""#));
    }
}
