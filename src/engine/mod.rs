//! Pure ledger computations
//!
//! Nothing in this module performs I/O or logs. Callers own transactions and
//! persistence.

pub mod recompute;
pub mod search_query;
pub mod spend_type_graph;

pub use recompute::{recompute, recompute_over};
pub use search_query::{Filter, Range, SortField, SortKey, SpendQuery, TextMatch, TypeMatch};
pub use spend_type_graph::{GraphError, SpendTypeGraph, DEFAULT_MAX_DEPTH};
