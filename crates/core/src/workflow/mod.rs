//! Expense approval workflow.
//!
//! Covers the full lifecycle of an expense claim: submission
//! validation, approval rule normalization, chain construction against
//! the company directory, and the decision state machine that moves an
//! expense from pending to approved or rejected.
//!
//! # Modules
//!
//! - `types`: expense, step, and status types
//! - `error`: workflow error taxonomy
//! - `rules`: per-employee approval rules
//! - `chain`: approval chain construction
//! - `engine`: decision evaluation and application

pub mod chain;
pub mod engine;
pub mod error;
pub mod rules;
pub mod types;

#[cfg(test)]
mod chain_props;
#[cfg(test)]
mod rules_props;

pub use chain::{BuiltChain, ChainBuilder};
pub use engine::{DecisionEngine, DecisionInput, DecisionOutcome};
pub use error::WorkflowError;
pub use rules::{ApprovalRule, RuleInput};
pub use types::{
    ApprovalStep, Decision, Expense, ExpenseStatus, ExpenseSubmission, StepStatus,
};
