//! Audit entries
//!
//! An entry names the row that changed, keeps a snapshot of it and, for
//! rows that live inside a month, the month figures the change produced.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::diff::{field_changes, FieldChange};
use crate::models::{Money, Month, MonthId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::Create => "CREATE",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
        };
        f.write_str(label)
    }
}

/// Kinds of ledger rows that are audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Month,
    Income,
    MonthlyPayment,
    Spend,
    SpendType,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityType::Month => "month",
            EntityType::Income => "income",
            EntityType::MonthlyPayment => "monthly payment",
            EntityType::Spend => "spend",
            EntityType::SpendType => "spend type",
        };
        f.write_str(label)
    }
}

/// Month figures right after a committed change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthImpact {
    pub month_id: MonthId,
    pub version: u64,
    pub daily_budget: Money,
    pub result: Money,
}

impl From<&Month> for MonthImpact {
    fn from(month: &Month) -> Self {
        Self {
            month_id: month.id,
            version: month.version,
            daily_budget: month.daily_budget,
            result: month.result,
        }
    }
}

/// One line of the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: u64,
    /// Title or name of the row at the time of the change
    pub label: String,
    /// The row after a create or update, before a delete
    pub snapshot: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<FieldChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthImpact>,
}

impl AuditEntry {
    fn new<T: Serialize>(
        operation: Operation,
        entity_type: EntityType,
        entity_id: u64,
        label: &str,
        row: &T,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id,
            label: label.to_string(),
            snapshot: serde_json::to_value(row).unwrap_or(Value::Null),
            changes: Vec::new(),
            month: None,
        }
    }

    pub fn created<T: Serialize>(entity_type: EntityType, entity_id: u64, label: &str, row: &T) -> Self {
        Self::new(Operation::Create, entity_type, entity_id, label, row)
    }

    /// Update entry holding the new row and the fields that changed
    pub fn updated<T: Serialize>(
        entity_type: EntityType,
        entity_id: u64,
        label: &str,
        before: &T,
        after: &T,
    ) -> Self {
        let mut entry = Self::new(Operation::Update, entity_type, entity_id, label, after);
        let before = serde_json::to_value(before).unwrap_or(Value::Null);
        entry.changes = field_changes(&before, &entry.snapshot);
        entry
    }

    pub fn removed<T: Serialize>(entity_type: EntityType, entity_id: u64, label: &str, row: &T) -> Self {
        Self::new(Operation::Delete, entity_type, entity_id, label, row)
    }

    /// Attach the figures of the month the change was committed to
    pub fn in_month(mut self, month: &Month) -> Self {
        self.month = Some(MonthImpact::from(month));
        self
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} #{} \"{}\"",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id,
            self.label
        )?;

        for change in &self.changes {
            write!(f, "\n    {}", change)?;
        }

        if let Some(month) = &self.month {
            write!(
                f,
                "\n    month {} v{}: daily budget {}, result {}",
                month.month_id, month.version, month.daily_budget, month.result
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayId;
    use serde_json::json;

    fn month_with_figures() -> Month {
        let mut month = Month::new(MonthId::new(3), 2024, 4, DayId::new(1)).unwrap();
        month.version = 5;
        month.daily_budget = Money::from_int(90);
        month.result = Money::from_int(2600);
        month
    }

    #[test]
    fn test_labels() {
        assert_eq!(Operation::Delete.to_string(), "DELETE");
        assert_eq!(EntityType::MonthlyPayment.to_string(), "monthly payment");
        assert_eq!(
            serde_json::to_string(&EntityType::SpendType).unwrap(),
            "\"spend_type\""
        );
    }

    #[test]
    fn test_created_entry_keeps_row_and_month() {
        let entry = AuditEntry::created(
            EntityType::Spend,
            12,
            "Coffee",
            &json!({"title": "Coffee", "cost": "3.50"}),
        )
        .in_month(&month_with_figures());

        assert_eq!(entry.operation, Operation::Create);
        assert_eq!(entry.entity_id, 12);
        assert_eq!(entry.snapshot["cost"], "3.50");
        assert!(entry.changes.is_empty());

        let month = entry.month.unwrap();
        assert_eq!(month.month_id, MonthId::new(3));
        assert_eq!(month.version, 5);
        assert_eq!(month.result, Money::from_int(2600));
    }

    #[test]
    fn test_updated_entry_lists_changed_fields() {
        let entry = AuditEntry::updated(
            EntityType::Income,
            3,
            "Salary",
            &json!({"title": "Salary", "income": "1000.00"}),
            &json!({"title": "Salary", "income": "1200.00"}),
        );

        assert_eq!(entry.operation, Operation::Update);
        assert_eq!(entry.snapshot["income"], "1200.00");
        assert_eq!(entry.changes.len(), 1);
        assert_eq!(entry.changes[0].field, "income");
        assert_eq!(entry.changes[0].old, Some(json!("1000.00")));
    }

    #[test]
    fn test_removed_entry_keeps_last_state() {
        let entry = AuditEntry::removed(EntityType::SpendType, 4, "Fun", &json!({"name": "Fun"}));
        assert_eq!(entry.operation, Operation::Delete);
        assert_eq!(entry.snapshot["name"], "Fun");
        assert!(entry.month.is_none());
    }

    #[test]
    fn test_display() {
        let entry = AuditEntry::updated(
            EntityType::Spend,
            7,
            "Taxi",
            &json!({"cost": "10.00"}),
            &json!({"cost": "12.00"}),
        )
        .in_month(&month_with_figures());

        let text = entry.to_string();
        assert!(text.contains("UPDATE spend #7 \"Taxi\""));
        assert!(text.contains(r#"cost: "10.00" -> "12.00""#));
        assert!(text.contains("month 3 v5: daily budget 90.00, result 2600.00"));
    }

    #[test]
    fn test_json_line_roundtrip_without_month() {
        let entry = AuditEntry::created(EntityType::SpendType, 1, "Food", &json!({"name": "Food"}));
        let line = serde_json::to_string(&entry).unwrap();
        assert!(!line.contains("\"month\""));
        assert!(!line.contains("\"changes\""));

        let parsed: AuditEntry = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed.label, "Food");
        assert!(parsed.month.is_none());
    }
}
