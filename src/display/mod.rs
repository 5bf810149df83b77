//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger data for terminal display.

pub mod month;
pub mod report;
pub mod spend;
pub mod spend_type;

pub use month::{format_month, format_month_list};
pub use spend::format_spend_rows;
pub use spend_type::format_spend_type_tree;
