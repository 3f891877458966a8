//! Shared types and configuration for Expensa.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - ISO 4217 currency codes with parse-time validation
//! - Configuration management

pub mod config;
pub mod types;

pub use config::{AppConfig, RateSeed, WorkflowSettings};
pub use types::{CompanyId, CurrencyCode, ExpenseId, UserId};
