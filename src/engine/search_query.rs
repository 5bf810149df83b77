//! Spend search query descriptor
//!
//! `SpendQuery::build` turns `SearchSpendsArgs` into a list of filters and
//! sort keys that a storage adapter can evaluate however it likes. Unset
//! fields produce no filter at all, so an empty argument set yields a query
//! that matches every spend ordered by date and id.

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

use crate::models::{Money, Order, SearchSpendsArgs, SortBy, SpendRow, SpendTypeId};

/// Date as a comparable `(year, month, day)` triple
pub type DateKey = (i32, u32, u32);

pub fn date_key(date: NaiveDate) -> DateKey {
    (date.year(), date.month(), date.day())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextMatch {
    /// Lowercased needle must appear anywhere in the lowercased field
    Contains(String),
    /// Lowercased field must equal the lowercased needle
    Exactly(String),
}

impl TextMatch {
    fn new(needle: &str, exactly: bool) -> Option<Self> {
        let needle = needle.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        Some(if exactly {
            Self::Exactly(needle)
        } else {
            Self::Contains(needle)
        })
    }

    pub fn matches(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        match self {
            Self::Contains(needle) => value.contains(needle.as_str()),
            Self::Exactly(needle) => value == *needle,
        }
    }
}

/// Inclusive range with at least one bound
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Range<T> {
    Between(T, T),
    AtLeast(T),
    AtMost(T),
}

impl<T: PartialOrd + Copy> Range<T> {
    fn new(min: Option<T>, max: Option<T>) -> Option<Self> {
        match (min, max) {
            (Some(min), Some(max)) => Some(Self::Between(min, max)),
            (Some(min), None) => Some(Self::AtLeast(min)),
            (None, Some(max)) => Some(Self::AtMost(max)),
            (None, None) => None,
        }
    }

    pub fn contains(&self, value: T) -> bool {
        match *self {
            Self::Between(min, max) => min <= value && value <= max,
            Self::AtLeast(min) => min <= value,
            Self::AtMost(max) => value <= max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeMatch {
    /// Only spends without a type
    Untyped,
    /// Spends with any of `ids`, plus untyped spends if `include_untyped`
    AnyOf {
        ids: Vec<SpendTypeId>,
        include_untyped: bool,
    },
}

impl TypeMatch {
    pub fn matches(&self, type_id: Option<SpendTypeId>) -> bool {
        match (self, type_id) {
            (Self::Untyped, type_id) => type_id.is_none(),
            (Self::AnyOf { ids, .. }, Some(id)) => ids.contains(&id),
            (Self::AnyOf { include_untyped, .. }, None) => *include_untyped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Title(TextMatch),
    Notes(TextMatch),
    Date(Range<DateKey>),
    Cost(Range<Money>),
    Type(TypeMatch),
}

impl Filter {
    pub fn matches(&self, row: &SpendRow) -> bool {
        match self {
            Self::Title(m) => m.matches(&row.title),
            Self::Notes(m) => m.matches(&row.notes),
            Self::Date(range) => range.contains((row.year, row.month, row.day)),
            Self::Cost(range) => range.contains(row.cost),
            Self::Type(m) => m.matches(row.type_id()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Year,
    Month,
    Day,
    Title,
    Cost,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub descending: bool,
}

impl SortKey {
    fn compare(&self, a: &SpendRow, b: &SpendRow) -> Ordering {
        let ordering = match self.field {
            SortField::Year => a.year.cmp(&b.year),
            SortField::Month => a.month.cmp(&b.month),
            SortField::Day => a.day.cmp(&b.day),
            SortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortField::Cost => a.cost.cmp(&b.cost),
            SortField::Id => a.id.cmp(&b.id),
        };
        if self.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Storage-agnostic description of a spend search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendQuery {
    pub filters: Vec<Filter>,
    pub sort: Vec<SortKey>,
}

impl SpendQuery {
    pub fn build(args: &SearchSpendsArgs) -> Self {
        let mut filters = Vec::new();

        if let Some(m) = TextMatch::new(&args.title, args.title_exactly) {
            filters.push(Filter::Title(m));
        }
        if let Some(m) = TextMatch::new(&args.notes, args.notes_exactly) {
            filters.push(Filter::Notes(m));
        }
        if let Some(range) = Range::new(args.after.map(date_key), args.before.map(date_key)) {
            filters.push(Filter::Date(range));
        }

        let non_zero = |m: Option<Money>| m.filter(|m| !m.is_zero());
        if let Some(range) = Range::new(non_zero(args.min_cost), non_zero(args.max_cost)) {
            filters.push(Filter::Cost(range));
        }

        if args.without_type {
            filters.push(Filter::Type(TypeMatch::Untyped));
        } else if !args.type_ids.is_empty() {
            let include_untyped = args.type_ids.iter().any(|id| id.is_none());
            let mut ids: Vec<SpendTypeId> =
                args.type_ids.iter().copied().filter(|id| !id.is_none()).collect();
            ids.sort();
            ids.dedup();

            filters.push(Filter::Type(if ids.is_empty() {
                TypeMatch::Untyped
            } else {
                TypeMatch::AnyOf {
                    ids,
                    include_untyped,
                }
            }));
        }

        let descending = args.order == Order::Desc;
        let fields: &[SortField] = match args.sort {
            SortBy::Date => &[SortField::Year, SortField::Month, SortField::Day],
            SortBy::Title => &[SortField::Title],
            SortBy::Cost => &[SortField::Cost],
        };
        let mut sort: Vec<SortKey> = fields
            .iter()
            .map(|&field| SortKey { field, descending })
            .collect();
        sort.push(SortKey {
            field: SortField::Id,
            descending: false,
        });

        Self { filters, sort }
    }

    pub fn matches(&self, row: &SpendRow) -> bool {
        self.filters.iter().all(|f| f.matches(row))
    }

    pub fn compare(&self, a: &SpendRow, b: &SpendRow) -> Ordering {
        self.sort
            .iter()
            .map(|key| key.compare(a, b))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    /// Filter and order `rows` in memory
    pub fn apply(&self, rows: impl IntoIterator<Item = SpendRow>) -> Vec<SpendRow> {
        let mut matched: Vec<SpendRow> = rows.into_iter().filter(|r| self.matches(r)).collect();
        matched.sort_by(|a, b| self.compare(a, b));
        matched
    }
}
