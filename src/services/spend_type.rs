//! Spend type service
//!
//! Manages the spend type forest. Parent changes are checked for cycles on
//! a snapshot of every type taken before the change is applied.

use tracing::{info, warn};

use super::LedgerRules;
use crate::audit::{AuditEntry, EntityType};
use crate::engine::SpendTypeGraph;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{AddSpendTypeArgs, EditSpendTypeArgs, SpendType, SpendTypeId, Validate};
use crate::storage::Storage;

/// Service for spend type management
pub struct SpendTypeService<'a> {
    storage: &'a Storage,
    rules: LedgerRules,
}

impl<'a> SpendTypeService<'a> {
    /// Create a new spend type service
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

    fn ensure_parent(&self, parent_id: Option<SpendTypeId>) -> LedgerResult<()> {
        if let Some(id) = parent_id.filter(|p| !p.is_none()) {
            if self.storage.spend_types.get(id)?.is_none() {
                return Err(LedgerError::spend_type_not_found(id));
            }
        }
        Ok(())
    }

    /// Create a spend type, optionally under an existing parent
    pub fn add(&self, args: &AddSpendTypeArgs) -> LedgerResult<SpendType> {
        args.validate()?;

        let _writer = self.storage.spend_types.lock_writer()?;
        self.ensure_parent(args.parent_id)?;

        let spend_type = SpendType::new(self.storage.spend_types.next_id()?, args);

        self.storage.spend_types.upsert_and_save(spend_type.clone())?;

        self.storage.record_audit(AuditEntry::created(
            EntityType::SpendType,
            spend_type.id.value(),
            &spend_type.name,
            &spend_type,
        ));
        info!(spend_type_id = %spend_type.id, name = %spend_type.name, "spend type added");

        Ok(spend_type)
    }

    pub fn get(&self, id: SpendTypeId) -> LedgerResult<SpendType> {
        self.storage
            .spend_types
            .get(id)?
            .ok_or_else(|| LedgerError::spend_type_not_found(id))
    }

    /// All spend types in id order
    pub fn list(&self) -> LedgerResult<Vec<SpendType>> {
        self.storage.spend_types.get_all()
    }

    /// Rename and/or reparent a spend type
    ///
    /// A parent id of 0 makes the type a root. A parent change that would
    /// close a cycle, or that meets an already malformed hierarchy, fails
    /// with a conflict before anything is written.
    pub fn edit(&self, args: &EditSpendTypeArgs) -> LedgerResult<SpendType> {
        args.validate()?;

        let _writer = self.storage.spend_types.lock_writer()?;
        let before = self.get(args.id)?;
        self.ensure_parent(args.parent_id)?;

        let mut spend_type = before.clone();
        if let Some(name) = &args.name {
            spend_type.name = name.trim().to_string();
        }

        if let Some(parent_id) = args.parent_id {
            let snapshot = self.storage.spend_types.get_all()?;
            let graph = SpendTypeGraph::from_spend_types(&snapshot)
                .with_max_depth(self.rules.max_spend_type_depth);

            match graph.has_cycle(args.id, parent_id) {
                Ok(false) => {}
                Ok(true) => {
                    warn!(spend_type_id = %args.id, parent_id = %parent_id, "spend type parent change would create a cycle");
                    return Err(LedgerError::Conflict(format!(
                        "Spend Type {} can't become a child of {}: it would create a cycle",
                        args.id, parent_id
                    )));
                }
                Err(e) => {
                    warn!(spend_type_id = %args.id, parent_id = %parent_id, error = %e, "spend type hierarchy is malformed");
                    return Err(e.into());
                }
            }

            spend_type.parent_id = Some(parent_id).filter(|p| !p.is_none());
        }

        spend_type.validate()?;

        self.storage.spend_types.upsert_and_save(spend_type.clone())?;

        self.storage.record_audit(AuditEntry::updated(
            EntityType::SpendType,
            spend_type.id.value(),
            &spend_type.name,
            &before,
            &spend_type,
        ));
        info!(spend_type_id = %spend_type.id, "spend type edited");

        Ok(spend_type)
    }

    /// Remove a spend type
    ///
    /// Refused while a monthly payment or spend is tagged with the type, or
    /// while other types still have it as their parent.
    pub fn remove(&self, id: SpendTypeId) -> LedgerResult<SpendType> {
        let _writer = self.storage.spend_types.lock_writer()?;
        let spend_type = self.get(id)?;

        if self.storage.months.uses_spend_type(id)? {
            warn!(spend_type_id = %id, "refusing to remove spend type in use");
            return Err(LedgerError::Conflict(format!(
                "Spend Type '{}' is used by monthly payments or spends",
                spend_type.name
            )));
        }

        let children = self.storage.spend_types.get_children(id)?;
        if !children.is_empty() {
            warn!(spend_type_id = %id, children = children.len(), "refusing to remove spend type with children");
            return Err(LedgerError::Conflict(format!(
                "Spend Type '{}' has {} child types",
                spend_type.name,
                children.len()
            )));
        }

        self.storage.spend_types.delete_and_save(id)?;

        self.storage.record_audit(AuditEntry::removed(
            EntityType::SpendType,
            spend_type.id.value(),
            &spend_type.name,
            &spend_type,
        ));
        info!(spend_type_id = %id, "spend type removed");

        Ok(spend_type)
    }
}
