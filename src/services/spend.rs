//! Spend service
//!
//! Day-level spends. Costs are checked against the configured spend cost
//! policy; with the default policy a negative cost records a refund.

use tracing::info;

use super::{lock_spend_type, LedgerRules};
use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AddSpendArgs, EditSpendArgs, Spend, SpendId, Validate};
use crate::storage::Storage;

/// Service for spend management
pub struct SpendService<'a> {
    storage: &'a Storage,
    rules: LedgerRules,
}

impl<'a> SpendService<'a> {
    /// Create a new spend service
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

    /// Add a spend to a day
    pub fn add(&self, args: &AddSpendArgs) -> LedgerResult<Spend> {
        args.validate()?;
        self.rules.spend_cost_policy.check(args.cost)?;
        self.rules.currency.check_amount(args.cost)?;
        let type_guard = lock_spend_type(self.storage, args.type_id)?;

        let day = self
            .storage
            .months
            .get_day(args.day_id)?
            .ok_or_else(|| LedgerError::day_not_found(args.day_id))?;

        let id = self.storage.months.next_spend_id()?;
        let spend = Spend::new(id, args);

        let (_, month) = self.storage.with_month_transaction(day.month_id, |month| {
            month
                .day_mut(args.day_id)
                .ok_or_else(|| LedgerError::day_not_found(args.day_id))?
                .spends
                .push(spend.clone());
            Ok(())
        })?;
        drop(type_guard);

        self.storage.record_audit(
            AuditEntry::created(EntityType::Spend, spend.id.value(), &spend.title, &spend).in_month(&month),
        );
        info!(spend_id = %spend.id, day_id = %spend.day_id, cost = %spend.cost, "spend added");

        Ok(spend)
    }

    /// Get a spend by id
    pub fn get(&self, id: SpendId) -> LedgerResult<Spend> {
        let month_id = self
            .storage
            .months
            .month_of_spend(id)?
            .ok_or_else(|| LedgerError::spend_not_found(id))?;

        self.storage
            .months
            .get(month_id)?
            .and_then(|m| m.spend(id).cloned())
            .ok_or_else(|| LedgerError::spend_not_found(id))
    }

    /// Edit a spend; `None` fields are left unchanged and a type id of 0
    /// clears the type
    pub fn edit(&self, args: &EditSpendArgs) -> LedgerResult<Spend> {
        args.validate()?;
        if let Some(cost) = args.cost {
            self.rules.spend_cost_policy.check(cost)?;
            self.rules.currency.check_amount(cost)?;
        }
        let type_guard = lock_spend_type(self.storage, args.type_id)?;

        let month_id = self
            .storage
            .months
            .month_of_spend(args.id)?
            .ok_or_else(|| LedgerError::spend_not_found(args.id))?;

        let ((before, after), month) = self.storage.with_month_transaction(month_id, |month| {
            let spend = month
                .spend_mut(args.id)
                .ok_or_else(|| LedgerError::spend_not_found(args.id))?;
            let before = spend.clone();
            spend.apply(args);
            spend.validate()?;
            Ok((before, spend.clone()))
        })?;

        drop(type_guard);

        self.storage.record_audit(
            AuditEntry::updated(EntityType::Spend, after.id.value(), &after.title, &before, &after)
                .in_month(&month),
        );
        info!(spend_id = %after.id, month_id = %month_id, "spend edited");

        Ok(after)
    }

    /// Remove a spend
    pub fn remove(&self, id: SpendId) -> LedgerResult<Spend> {
        let month_id = self
            .storage
            .months
            .month_of_spend(id)?
            .ok_or_else(|| LedgerError::spend_not_found(id))?;

        let (removed, month) = self.storage.with_month_transaction(month_id, |month| {
            month
                .remove_spend(id)
                .ok_or_else(|| LedgerError::spend_not_found(id))
        })?;

        self.storage.record_audit(
            AuditEntry::removed(EntityType::Spend, removed.id.value(), &removed.title, &removed)
                .in_month(&month),
        );
        info!(spend_id = %id, month_id = %month_id, "spend removed");

        Ok(removed)
    }
}
