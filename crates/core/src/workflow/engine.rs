//! Decision evaluation for pending expenses.
//!
//! The engine is split into a pure evaluation step and a small apply
//! step so callers can run evaluation, decide whether to persist, and
//! only then mutate the expense. A failed evaluation never touches the
//! expense.

use expensa_shared::UserId;

use crate::workflow::error::WorkflowError;
use crate::workflow::rules::ApprovalRule;
use crate::workflow::types::{Decision, Expense, ExpenseStatus, StepStatus};

/// An approver's decision request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionInput {
    /// The user making the decision.
    pub approver_id: UserId,
    /// Approve or reject.
    pub decision: Decision,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

/// The state changes a decision produces.
///
/// Produced by [`DecisionEngine::evaluate`] against a snapshot of the
/// expense; [`DecisionOutcome::apply`] writes it back. Apply an outcome
/// only to the expense it was evaluated against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    /// Index of the decided step in the approval chain.
    pub step_index: usize,
    /// New status for the decided step.
    pub step_status: StepStatus,
    /// Comment attached to the decided step.
    pub comment: Option<String>,
    /// Index of a sequential next step to activate, if any.
    pub activate_index: Option<usize>,
    /// New status for the expense itself.
    pub expense_status: ExpenseStatus,
}

impl DecisionOutcome {
    /// Writes the outcome back onto the expense.
    pub fn apply(self, expense: &mut Expense) {
        let step = &mut expense.approval_chain[self.step_index];
        step.status = self.step_status;
        step.comment = self.comment;
        if let Some(index) = self.activate_index {
            expense.approval_chain[index].status = StepStatus::Pending;
        }
        expense.status = self.expense_status;
    }
}

/// Evaluates approver decisions against an expense's chain and rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine;

impl DecisionEngine {
    /// Creates a new decision engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluates a decision without mutating the expense.
    ///
    /// On approval the outcome is resolved in precedence order:
    /// 1. a percentage threshold below 100% approves the expense as
    ///    soon as enough steps (including this one) are approved
    /// 2. a sequential rule activates the next step, or approves the
    ///    expense when this was the last step
    /// 3. a concurrent rule approves the expense once every step is
    ///    approved
    ///
    /// A rejection rejects the whole expense regardless of flow.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::ExpenseNotActionable` if the expense is no
    ///   longer pending
    /// * `WorkflowError::NotCurrentApprover` if the user has no
    ///   pending step
    pub fn evaluate(
        &self,
        expense: &Expense,
        rule: Option<&ApprovalRule>,
        input: &DecisionInput,
    ) -> Result<DecisionOutcome, WorkflowError> {
        if expense.status != ExpenseStatus::Pending {
            return Err(WorkflowError::ExpenseNotActionable {
                id: expense.id,
                status: expense.status,
            });
        }

        let step_index = expense
            .approval_chain
            .iter()
            .position(|step| {
                step.status == StepStatus::Pending && step.approver_id == input.approver_id
            })
            .ok_or(WorkflowError::NotCurrentApprover {
                approver_id: input.approver_id,
            })?;

        let mut outcome = DecisionOutcome {
            step_index,
            step_status: input.decision.as_step_status(),
            comment: input.comment.clone(),
            activate_index: None,
            expense_status: ExpenseStatus::Pending,
        };

        // One rejection anywhere rejects the whole expense.
        if input.decision == Decision::Rejected {
            outcome.expense_status = ExpenseStatus::Rejected;
            return Ok(outcome);
        }

        let total = expense.approval_chain.len();
        let approved = expense
            .approval_chain
            .iter()
            .filter(|step| step.status == StepStatus::Approved)
            .count()
            + 1;

        if let Some(rule) = rule
            && rule.has_percentage_threshold()
            && approved >= rule.required_approvals(total)
        {
            outcome.expense_status = ExpenseStatus::Approved;
            return Ok(outcome);
        }

        if rule.is_some_and(|r| r.is_sequential) {
            let next = step_index + 1;
            match expense.approval_chain.get(next) {
                Some(next_step) => {
                    if next_step.status == StepStatus::NotStarted {
                        outcome.activate_index = Some(next);
                    }
                }
                None => outcome.expense_status = ExpenseStatus::Approved,
            }
            return Ok(outcome);
        }

        if approved == total {
            outcome.expense_status = ExpenseStatus::Approved;
        }
        Ok(outcome)
    }
}
