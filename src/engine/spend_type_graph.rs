//! Spend type hierarchy checks
//!
//! Spend types link to their parent by id. Before a parent change is stored
//! the new link is checked against a snapshot of all types so that the
//! hierarchy stays a forest of bounded depth.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{SpendType, SpendTypeId};

/// Maximum number of parent hops walked before giving up
pub const DEFAULT_MAX_DEPTH: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("invalid Spend Type: {0}")]
    InvalidSpendType(SpendTypeId),
    #[error("Spend Type has too many parents or already has a cycle")]
    TooManyParents,
}

/// Parent lookup over a snapshot of spend types
#[derive(Debug, Clone)]
pub struct SpendTypeGraph {
    parents: HashMap<SpendTypeId, SpendTypeId>,
    max_depth: usize,
}

impl SpendTypeGraph {
    /// Build from `(id, parent_id)` pairs, where a parent of 0 marks a root
    pub fn new(pairs: impl IntoIterator<Item = (SpendTypeId, SpendTypeId)>) -> Self {
        Self {
            parents: pairs.into_iter().collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn from_spend_types<'a>(types: impl IntoIterator<Item = &'a SpendType>) -> Self {
        Self::new(types.into_iter().map(|t| (t.id, t.parent_or_none())))
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Whether making `proposed_parent` the parent of `subject` closes a cycle
    ///
    /// Walks up from `proposed_parent`. Reaching `subject` means a cycle,
    /// reaching a root means none. A missing type or a walk longer than the
    /// maximum depth is an error: the stored hierarchy is already malformed.
    pub fn has_cycle(
        &self,
        subject: SpendTypeId,
        proposed_parent: SpendTypeId,
    ) -> Result<bool, GraphError> {
        if proposed_parent.is_none() {
            return Ok(false);
        }

        let mut current = proposed_parent;
        for _ in 0..self.max_depth {
            let parent = *self
                .parents
                .get(&current)
                .ok_or(GraphError::InvalidSpendType(current))?;
            if current == subject {
                return Ok(true);
            }
            if parent.is_none() {
                return Ok(false);
            }
            current = parent;
        }

        Err(GraphError::TooManyParents)
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestors(&self, id: SpendTypeId) -> Result<Vec<SpendTypeId>, GraphError> {
        let mut chain = Vec::new();
        let mut current = *self
            .parents
            .get(&id)
            .ok_or(GraphError::InvalidSpendType(id))?;

        while !current.is_none() {
            if chain.len() >= self.max_depth {
                return Err(GraphError::TooManyParents);
            }
            chain.push(current);
            current = *self
                .parents
                .get(&current)
                .ok_or(GraphError::InvalidSpendType(current))?;
        }
        Ok(chain)
    }
}
