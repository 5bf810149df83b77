//! Service layer for the budget ledger
//!
//! The service layer provides business logic on top of the storage layer:
//! validation, reference checks, month transactions and audit logging.

pub mod income;
pub mod month;
pub mod monthly_payment;
pub mod search;
pub mod spend;
pub mod spend_type;

pub use income::IncomeService;
pub use month::{month_label, MonthService};
pub use monthly_payment::MonthlyPaymentService;
pub use search::SearchService;
pub use spend::SpendService;
pub use spend_type::SpendTypeService;

use std::sync::MutexGuard;

use crate::config::Settings;
use crate::engine::DEFAULT_MAX_DEPTH;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Currency, SpendCostPolicy, SpendTypeId};
use crate::storage::Storage;

/// Settings that change how the row services validate input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerRules {
    pub currency: Currency,
    pub spend_cost_policy: SpendCostPolicy,
    pub max_spend_type_depth: usize,
}

impl Default for LedgerRules {
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            spend_cost_policy: SpendCostPolicy::default(),
            max_spend_type_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl LedgerRules {
    pub fn from_settings(settings: &Settings) -> LedgerResult<Self> {
        let currency = settings
            .currency()
            .map_err(|e| LedgerError::Config(e.to_string()))?;

        Ok(Self {
            currency,
            spend_cost_policy: settings.spend_cost_policy,
            max_spend_type_depth: settings.max_spend_type_depth,
        })
    }
}

/// Check that a row may reference `type_id` and keep it from being removed
///
/// Unset and the reserved "no type" id need no lock and yield `None`. For a
/// real id the spend type writer lock is taken, the type must exist, and
/// the guard is returned. Callers hold it until their month transaction has
/// committed. Lock order is spend type writer first, then the month lock.
pub(crate) fn lock_spend_type(
    storage: &Storage,
    type_id: Option<SpendTypeId>,
) -> LedgerResult<Option<MutexGuard<'_, ()>>> {
    let Some(id) = type_id.filter(|id| !id.is_none()) else {
        return Ok(None);
    };

    let guard = storage.spend_types.lock_writer()?;
    if storage.spend_types.get(id)?.is_none() {
        return Err(LedgerError::spend_type_not_found(id));
    }
    Ok(Some(guard))
}
