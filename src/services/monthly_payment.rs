//! Monthly payment service
//!
//! Recurring costs of a month, optionally tagged with a spend type.

use tracing::info;

use super::{lock_spend_type, LedgerRules};
use crate::audit::{AuditEntry, EntityType};
use crate::error::{LedgerError, LedgerResult};
use crate::models::{
    AddMonthlyPaymentArgs, EditMonthlyPaymentArgs, MonthlyPayment, MonthlyPaymentId, Validate,
};
use crate::storage::Storage;

/// Service for monthly payment management
pub struct MonthlyPaymentService<'a> {
    storage: &'a Storage,
    rules: LedgerRules,
}

impl<'a> MonthlyPaymentService<'a> {
    /// Create a new monthly payment service
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

    /// Add a monthly payment to a month
    pub fn add(&self, args: &AddMonthlyPaymentArgs) -> LedgerResult<MonthlyPayment> {
        args.validate()?;
        self.rules.currency.check_amount(args.cost)?;
        let type_guard = lock_spend_type(self.storage, args.type_id)?;

        let id = self.storage.months.next_monthly_payment_id()?;
        let payment = MonthlyPayment::new(id, args);

        let (_, month) = self
            .storage
            .with_month_transaction(args.month_id, |month| {
                month.monthly_payments.push(payment.clone());
                Ok(())
            })?;
        drop(type_guard);

        self.storage.record_audit(
            AuditEntry::created(EntityType::MonthlyPayment, payment.id.value(), &payment.title, &payment)
                .in_month(&month),
        );
        info!(
            payment_id = %payment.id,
            month_id = %payment.month_id,
            cost = %payment.cost,
            "monthly payment added"
        );

        Ok(payment)
    }

    /// Get a monthly payment by id
    pub fn get(&self, id: MonthlyPaymentId) -> LedgerResult<MonthlyPayment> {
        let month_id = self
            .storage
            .months
            .month_of_monthly_payment(id)?
            .ok_or_else(|| LedgerError::monthly_payment_not_found(id))?;

        self.storage
            .months
            .get(month_id)?
            .and_then(|m| m.monthly_payment(id).cloned())
            .ok_or_else(|| LedgerError::monthly_payment_not_found(id))
    }

    /// Edit a monthly payment; `None` fields are left unchanged and a type
    /// id of 0 clears the type
    pub fn edit(&self, args: &EditMonthlyPaymentArgs) -> LedgerResult<MonthlyPayment> {
        args.validate()?;
        if let Some(cost) = args.cost {
            self.rules.currency.check_amount(cost)?;
        }
        let type_guard = lock_spend_type(self.storage, args.type_id)?;

        let month_id = self
            .storage
            .months
            .month_of_monthly_payment(args.id)?
            .ok_or_else(|| LedgerError::monthly_payment_not_found(args.id))?;

        let ((before, after), month) = self.storage.with_month_transaction(month_id, |month| {
            let payment = month
                .monthly_payment_mut(args.id)
                .ok_or_else(|| LedgerError::monthly_payment_not_found(args.id))?;
            let before = payment.clone();
            payment.apply(args);
            payment.validate()?;
            Ok((before, payment.clone()))
        })?;

        drop(type_guard);

        self.storage.record_audit(
            AuditEntry::updated(EntityType::MonthlyPayment, after.id.value(), &after.title, &before, &after)
                .in_month(&month),
        );
        info!(payment_id = %after.id, month_id = %month_id, "monthly payment edited");

        Ok(after)
    }

    /// Remove a monthly payment
    pub fn remove(&self, id: MonthlyPaymentId) -> LedgerResult<MonthlyPayment> {
        let month_id = self
            .storage
            .months
            .month_of_monthly_payment(id)?
            .ok_or_else(|| LedgerError::monthly_payment_not_found(id))?;

        let (removed, month) = self.storage.with_month_transaction(month_id, |month| {
            month
                .remove_monthly_payment(id)
                .ok_or_else(|| LedgerError::monthly_payment_not_found(id))
        })?;

        self.storage.record_audit(
            AuditEntry::removed(EntityType::MonthlyPayment, removed.id.value(), &removed.title, &removed)
                .in_month(&month),
        );
        info!(payment_id = %id, month_id = %month_id, "monthly payment removed");

        Ok(removed)
    }
}
