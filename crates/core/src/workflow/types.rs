//! Workflow domain types for the expense lifecycle.
//!
//! This module defines the core types used for expense submissions,
//! approval chains, and status transitions.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use expensa_shared::{CompanyId, CurrencyCode, ExpenseId, UserId};

use crate::directory::Role;
use crate::workflow::error::WorkflowError;

/// Expense status in the approval workflow.
///
/// Expenses are created `Pending` and move forward exactly once:
/// - Pending → Approved (chain satisfied)
/// - Pending → Rejected (any single rejection)
///
/// `Approved` and `Rejected` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    /// Waiting on one or more approval steps.
    Pending,
    /// Fully approved (terminal).
    Approved,
    /// Rejected by an approver (terminal).
    Rejected,
}

impl ExpenseStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if no further decisions can be recorded.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a single approval step.
///
/// Steps move forward exactly once:
/// - NotStarted → Pending (activated by the engine)
/// - Pending → Approved | Rejected (decided by the approver)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not yet activated (later step of a sequential chain).
    NotStarted,
    /// Awaiting the approver's decision.
    Pending,
    /// Approved by the approver (terminal per step).
    Approved,
    /// Rejected by the approver (terminal per step).
    Rejected,
}

impl StepStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "not_started" => Some(Self::NotStarted),
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Returns true if the approver has already decided this step.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An approver's decision on their step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    /// Approve the step.
    Approved,
    /// Reject the step, which rejects the whole expense.
    Rejected,
}

impl Decision {
    /// Returns the string representation of the decision.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Parses a decision from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// The step status this decision records.
    #[must_use]
    pub fn as_step_status(self) -> StepStatus {
        match self {
            Self::Approved => StepStatus::Approved,
            Self::Rejected => StepStatus::Rejected,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One approver's slot in an expense's approval chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStep {
    /// The user expected to decide this step.
    pub approver_id: UserId,
    /// The approver's role, copied from the directory at chain build time.
    pub role: Role,
    /// Current step status.
    pub status: StepStatus,
    /// 1-based position in the chain; consecutive and stable.
    pub sequence: u32,
    /// Free-text comment attached with the decision.
    pub comment: Option<String>,
}

/// A new expense claim as entered by the employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseSubmission {
    /// Submitting employee.
    pub employee_id: UserId,
    /// Company the claim is charged to.
    pub company_id: CompanyId,
    /// Claimed amount in `currency`.
    pub amount: Decimal,
    /// Currency the expense was paid in.
    pub currency: CurrencyCode,
    /// Expense category (e.g. "Travel", "Meals").
    pub category: String,
    /// What the expense was for.
    pub description: String,
    /// When the expense was incurred.
    pub date: NaiveDate,
    /// How it was paid (e.g. personal funds, company card).
    pub paid_by: String,
    /// Optional remarks for the approvers.
    pub remarks: Option<String>,
}

impl ExpenseSubmission {
    /// Validates the submission fields.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::AmountNotPositive` if the amount is zero or negative
    /// * `WorkflowError::MissingField` if a required text field is empty
    pub fn validate(&self) -> Result<(), WorkflowError> {
        if self.amount <= Decimal::ZERO {
            return Err(WorkflowError::AmountNotPositive);
        }
        if self.category.trim().is_empty() {
            return Err(WorkflowError::MissingField("category"));
        }
        if self.description.trim().is_empty() {
            return Err(WorkflowError::MissingField("description"));
        }
        if self.paid_by.trim().is_empty() {
            return Err(WorkflowError::MissingField("paid_by"));
        }
        Ok(())
    }
}

/// An expense claim and its approval chain.
///
/// Only the decision engine mutates an expense after creation, and only
/// its `status` and per-step fields. `local_amount` is computed once at
/// submission and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier.
    pub id: ExpenseId,
    /// Company the claim is charged to.
    pub company_id: CompanyId,
    /// Submitting employee.
    pub employee_id: UserId,
    /// Employee display name, denormalized for approver-facing views.
    pub employee_name: String,
    /// Claimed amount in `currency`.
    pub amount: Decimal,
    /// Currency the expense was paid in.
    pub currency: CurrencyCode,
    /// Amount converted to the company's base currency at submission.
    pub local_amount: Decimal,
    /// Expense category.
    pub category: String,
    /// What the expense was for.
    pub description: String,
    /// How it was paid.
    pub paid_by: String,
    /// Optional remarks for the approvers.
    pub remarks: Option<String>,
    /// When the expense was incurred.
    pub date: NaiveDate,
    /// Current workflow status.
    pub status: ExpenseStatus,
    /// Approval steps in sequence order.
    pub approval_chain: Vec<ApprovalStep>,
    /// When the expense was submitted.
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// Creates a pending expense from a validated submission.
    #[must_use]
    pub fn from_submission(
        submission: ExpenseSubmission,
        employee_name: String,
        local_amount: Decimal,
        approval_chain: Vec<ApprovalStep>,
    ) -> Self {
        Self {
            id: ExpenseId::new(),
            company_id: submission.company_id,
            employee_id: submission.employee_id,
            employee_name,
            amount: submission.amount,
            currency: submission.currency,
            local_amount,
            category: submission.category,
            description: submission.description,
            paid_by: submission.paid_by,
            remarks: submission.remarks,
            date: submission.date,
            status: ExpenseStatus::Pending,
            approval_chain,
            created_at: Utc::now(),
        }
    }

    /// Returns the step currently awaiting `approver_id`, if any.
    #[must_use]
    pub fn pending_step_for(&self, approver_id: UserId) -> Option<&ApprovalStep> {
        self.approval_chain
            .iter()
            .find(|step| step.status == StepStatus::Pending && step.approver_id == approver_id)
    }
}
