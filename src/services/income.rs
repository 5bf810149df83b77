//! Income service
//!
//! Adds, edits and removes incomes. Every change runs as a month
//! transaction, so the month's derived figures are recomputed with it.

use tracing::info;

use super::LedgerRules;
use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AddIncomeArgs, EditIncomeArgs, Income, IncomeId, Validate};
use crate::storage::Storage;

/// Service for income management
pub struct IncomeService<'a> {
    storage: &'a Storage,
    rules: LedgerRules,
}

impl<'a> IncomeService<'a> {
    /// Create a new income service
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            rules: LedgerRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: LedgerRules) -> Self {
        self.rules = rules;
        self
    }

    /// Add an income to a month
    pub fn add(&self, args: &AddIncomeArgs) -> LedgerResult<Income> {
        args.validate()?;
        self.rules.currency.check_amount(args.income)?;

        let id = self.storage.months.next_income_id()?;
        let income = Income::new(id, args);

        let (_, month) = self
            .storage
            .with_month_transaction(args.month_id, |month| {
                month.incomes.push(income.clone());
                Ok(())
            })?;

        self.storage.record_audit(
            AuditEntry::created(EntityType::Income, income.id.value(), &income.title, &income)
                .in_month(&month),
        );
        info!(income_id = %income.id, month_id = %month.id, amount = %income.income, "income added");

        Ok(income)
    }

    /// Get an income by id
    pub fn get(&self, id: IncomeId) -> LedgerResult<Income> {
        let month_id = self
            .storage
            .months
            .month_of_income(id)?
            .ok_or_else(|| LedgerError::income_not_found(id))?;

        self.storage
            .months
            .get(month_id)?
            .and_then(|m| m.income(id).cloned())
            .ok_or_else(|| LedgerError::income_not_found(id))
    }

    /// Edit an income; `None` fields are left unchanged
    pub fn edit(&self, args: &EditIncomeArgs) -> LedgerResult<Income> {
        args.validate()?;
        if let Some(amount) = args.income {
            self.rules.currency.check_amount(amount)?;
        }

        let month_id = self
            .storage
            .months
            .month_of_income(args.id)?
            .ok_or_else(|| LedgerError::income_not_found(args.id))?;

        let ((before, after), month) = self.storage.with_month_transaction(month_id, |month| {
            let income = month
                .income_mut(args.id)
                .ok_or_else(|| LedgerError::income_not_found(args.id))?;
            let before = income.clone();
            income.apply(args);
            income.validate()?;
            Ok((before, income.clone()))
        })?;

        self.storage.record_audit(
            AuditEntry::updated(EntityType::Income, after.id.value(), &after.title, &before, &after)
                .in_month(&month),
        );
        info!(income_id = %after.id, month_id = %month_id, "income edited");

        Ok(after)
    }

    /// Remove an income
    pub fn remove(&self, id: IncomeId) -> LedgerResult<Income> {
        let month_id = self
            .storage
            .months
            .month_of_income(id)?
            .ok_or_else(|| LedgerError::income_not_found(id))?;

        let (removed, month) = self.storage.with_month_transaction(month_id, |month| {
            month
                .remove_income(id)
                .ok_or_else(|| LedgerError::income_not_found(id))
        })?;

        self.storage.record_audit(
            AuditEntry::removed(EntityType::Income, removed.id.value(), &removed.title, &removed)
                .in_month(&month),
        );
        info!(income_id = %id, month_id = %month_id, "income removed");

        Ok(removed)
    }
}
