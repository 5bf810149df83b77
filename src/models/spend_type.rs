//! Spend type model
//!
//! Spend types form a forest through optional parent links and tag monthly
//! payments and spends for reporting and search.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::SpendTypeId;
use super::validate::{check_title, Validate, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendType {
    pub id: SpendTypeId,
    pub name: String,
    /// `None` for a root type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<SpendTypeId>,
}

impl SpendType {
    pub fn new(id: SpendTypeId, args: &AddSpendTypeArgs) -> Self {
        Self {
            id,
            name: args.name.trim().to_string(),
            parent_id: args.parent_id.filter(|p| !p.is_none()),
        }
    }

    /// Parent id with the root encoded as 0
    pub fn parent_or_none(&self) -> SpendTypeId {
        self.parent_id.unwrap_or(SpendTypeId::NONE)
    }
}

impl Validate for SpendType {
    fn validate(&self) -> Result<(), ValidationError> {
        check_title("name", &self.name).map(|_| ())
    }
}

impl fmt::Display for SpendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddSpendTypeArgs {
    pub name: String,
    pub parent_id: Option<SpendTypeId>,
}

impl Validate for AddSpendTypeArgs {
    fn validate(&self) -> Result<(), ValidationError> {
        check_title("name", &self.name).map(|_| ())
    }
}

/// Edit arguments; a parent id of 0 turns the type into a root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditSpendTypeArgs {
    pub id: SpendTypeId,
    pub name: Option<String>,
    pub parent_id: Option<SpendTypeId>,
}

impl Validate for EditSpendTypeArgs {
    fn validate(&self) -> Result<(), ValidationError> {
        if let Some(name) = &self.name {
            check_title("name", name)?;
        }
        Ok(())
    }
}
