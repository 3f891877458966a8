//! Workflow error types.

use expensa_shared::{CompanyId, ExpenseId, UserId};
use thiserror::Error;

use crate::currency::RateError;
use crate::workflow::types::ExpenseStatus;

/// Errors from expense submission, rule management, and approval decisions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// A required submission field was empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The submitted amount was zero or negative.
    #[error("Expense amount must be greater than zero")]
    AmountNotPositive,

    /// The expense does not exist.
    #[error("Expense not found: {0}")]
    ExpenseNotFound(ExpenseId),

    /// The user does not exist.
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// The company does not exist.
    #[error("Company not found: {0}")]
    CompanyNotFound(CompanyId),

    /// The expense is already approved or rejected.
    #[error("Expense {id} is not actionable (status: {status})")]
    ExpenseNotActionable {
        /// The expense acted on.
        id: ExpenseId,
        /// Its terminal status.
        status: ExpenseStatus,
    },

    /// The user has no pending step on this expense.
    #[error("User {approver_id} is not a current approver for this expense")]
    NotCurrentApprover {
        /// The user who attempted the decision.
        approver_id: UserId,
    },

    /// A rule lists the employee as their own approver.
    #[error("Employee {0} cannot approve their own expenses")]
    EmployeeIsOwnApprover(UserId),

    /// No approver could be resolved for the employee.
    #[error("No approver available for employee {0}")]
    NoApproverAvailable(UserId),

    /// An approval percentage outside 1..=100.
    #[error("Approval percentage must be between 1 and 100, got {0}")]
    InvalidPercentage(u8),

    /// Currency conversion failed at submission.
    #[error(transparent)]
    Rate(#[from] RateError),
}

impl WorkflowError {
    /// Returns a stable machine-readable error code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "MISSING_FIELD",
            Self::AmountNotPositive => "AMOUNT_NOT_POSITIVE",
            Self::ExpenseNotFound(_) => "EXPENSE_NOT_FOUND",
            Self::UserNotFound(_) => "USER_NOT_FOUND",
            Self::CompanyNotFound(_) => "COMPANY_NOT_FOUND",
            Self::ExpenseNotActionable { .. } => "EXPENSE_NOT_ACTIONABLE",
            Self::NotCurrentApprover { .. } => "NOT_CURRENT_APPROVER",
            Self::EmployeeIsOwnApprover(_) => "EMPLOYEE_IS_OWN_APPROVER",
            Self::NoApproverAvailable(_) => "NO_APPROVER_AVAILABLE",
            Self::InvalidPercentage(_) => "INVALID_PERCENTAGE",
            Self::Rate(_) => "RATE_UNAVAILABLE",
        }
    }

    /// Returns the HTTP status code this error maps to.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::MissingField(_) | Self::AmountNotPositive | Self::InvalidPercentage(_) => 400,
            Self::ExpenseNotFound(_)
            | Self::UserNotFound(_)
            | Self::CompanyNotFound(_)
            | Self::ExpenseNotActionable { .. } => 404,
            Self::NotCurrentApprover { .. } => 403,
            Self::EmployeeIsOwnApprover(_) | Self::NoApproverAvailable(_) | Self::Rate(_) => 422,
        }
    }
}
