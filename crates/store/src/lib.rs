//! Storage layer with in-memory stores and the expense service facade.
//!
//! This crate provides:
//! - Concurrent in-memory stores for companies, users, rules, and expenses
//! - The [`ExpenseService`] facade that wires stores to the workflow engine
//!
//! # Modules
//!
//! - `directory` - Company and user store
//! - `rules` - Approval rule store
//! - `expenses` - Expense store with per-expense update locking
//! - `service` - End-to-end expense operations

pub mod directory;
pub mod expenses;
pub mod rules;
pub mod service;

pub use directory::{DirectoryError, DirectoryStore, NewCompany, NewUser};
pub use expenses::ExpenseStore;
pub use rules::RuleStore;
pub use service::ExpenseService;
