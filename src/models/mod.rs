//! Core data models for the budget ledger
//!
//! This module contains the data structures that represent the ledger
//! domain: months with their days, incomes, monthly payments, spends and
//! spend types, plus the fixed-point `Money` type they all share.

pub mod currency;
pub mod ids;
pub mod income;
pub mod money;
pub mod month;
pub mod monthly_payment;
pub mod search;
pub mod spend;
pub mod spend_type;
pub mod validate;

pub use currency::Currency;
pub use ids::{DayId, IncomeId, MonthId, MonthlyPaymentId, SpendId, SpendTypeId};
pub use income::{AddIncomeArgs, EditIncomeArgs, Income};
pub use money::{Money, MoneyParseError};
pub use month::{days_in_month, Day, Month, MonthOverview};
pub use monthly_payment::{AddMonthlyPaymentArgs, EditMonthlyPaymentArgs, MonthlyPayment};
pub use search::{Order, SearchSpendsArgs, SortBy, SpendRow};
pub use spend::{AddSpendArgs, EditSpendArgs, Spend};
pub use spend_type::{AddSpendTypeArgs, EditSpendTypeArgs, SpendType};
pub use validate::{SpendCostPolicy, Validate, ValidationError};
