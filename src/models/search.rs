//! Spend search arguments and result rows

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{SpendId, SpendTypeId};
use super::money::Money;
use super::spend_type::SpendType;
use super::validate::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Date,
    Title,
    Cost,
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "date" => Ok(Self::Date),
            "title" => Ok(Self::Title),
            "cost" => Ok(Self::Cost),
            other => Err(ValidationError::InvalidOption {
                field: "sort",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date => write!(f, "date"),
            Self::Title => write!(f, "title"),
            Self::Cost => write!(f, "cost"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl FromStr for Order {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ValidationError::InvalidOption {
                field: "order",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// Spend search filter
///
/// Every field is optional. Empty text, `None` and zero amounts mean the
/// field is not filtered on. A `SpendTypeId::NONE` entry in `type_ids`
/// matches spends without a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSpendsArgs {
    pub title: String,
    pub notes: String,
    pub title_exactly: bool,
    pub notes_exactly: bool,
    pub after: Option<NaiveDate>,
    pub before: Option<NaiveDate>,
    pub min_cost: Option<Money>,
    pub max_cost: Option<Money>,
    /// Search for spends without a type only; `type_ids` is ignored
    pub without_type: bool,
    pub type_ids: Vec<SpendTypeId>,
    pub sort: SortBy,
    pub order: Order,
}

/// A spend joined with its date and type, as returned by search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendRow {
    pub id: SpendId,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub title: String,
    #[serde(default)]
    pub notes: String,
    pub cost: Money,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub spend_type: Option<SpendType>,
}

impl SpendRow {
    pub fn type_id(&self) -> Option<SpendTypeId> {
        self.spend_type.as_ref().map(|t| t.id)
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_and_order_defaults() {
        let args = SearchSpendsArgs::default();
        assert_eq!(args.sort, SortBy::Date);
        assert_eq!(args.order, Order::Asc);
        assert_eq!("".parse::<SortBy>().unwrap(), SortBy::Date);
        assert_eq!("DESC".parse::<Order>().unwrap(), Order::Desc);
        assert!("name".parse::<SortBy>().is_err());
        assert!("up".parse::<Order>().is_err());
    }

    #[test]
    fn test_args_from_partial_json() {
        let args: SearchSpendsArgs =
            serde_json::from_str(r#"{"title":"coffee","sort":"cost","order":"desc"}"#).unwrap();
        assert_eq!(args.title, "coffee");
        assert_eq!(args.sort, SortBy::Cost);
        assert_eq!(args.order, Order::Desc);
        assert!(args.type_ids.is_empty());
    }
}
