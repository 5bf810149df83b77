//! Budget Ledger - household budget tracking by month and day
//!
//! This library provides the core functionality for the `budget` command.
//! Every month holds its incomes, fixed monthly payments and one entry per
//! calendar day with the spends made that day. Whenever any of them change,
//! the month's daily budget, running saldo and totals are recomputed.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (months, days, spends, spend types, money)
//! - `engine`: Pure month recomputation, spend type graph and search query
//! - `storage`: JSON file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `reports`: Spending reports
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_ledger::config::{paths::LedgerPaths, settings::Settings};
//! use budget_ledger::storage::Storage;
//!
//! let paths = LedgerPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::open(paths)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{LedgerError, LedgerResult};
