//! Approval chain construction.
//!
//! At submission time the employee's rule (if any) is resolved into a
//! concrete chain of [`ApprovalStep`]s against the company directory.
//! Approvers that no longer resolve to a directory user are skipped
//! rather than failing the submission; callers get the skipped ids
//! back so they can log them.

use expensa_shared::UserId;

use crate::directory::User;
use crate::workflow::error::WorkflowError;
use crate::workflow::rules::ApprovalRule;
use crate::workflow::types::{ApprovalStep, StepStatus};

/// A freshly built approval chain plus the approver ids that could not
/// be resolved against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltChain {
    /// Steps in sequence order.
    pub steps: Vec<ApprovalStep>,
    /// Configured approvers with no matching directory user.
    pub skipped: Vec<UserId>,
}

/// Builds approval chains from rules and the company directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainBuilder;

impl ChainBuilder {
    /// Creates a new chain builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Builds the approval chain for an expense submitted by `employee`.
    ///
    /// With a usable rule, each resolvable approver becomes one step;
    /// sequential chains activate only the first step while concurrent
    /// chains activate every step. Without a rule (or when every
    /// configured approver is skipped), the chain falls back to a
    /// single step for the employee's manager, then for the configured
    /// default approver.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::EmployeeIsOwnApprover` if the rule lists the
    ///   employee as an approver
    /// * `WorkflowError::NoApproverAvailable` if the fallback resolves
    ///   no approver either
    pub fn build(
        &self,
        employee: &User,
        rule: Option<&ApprovalRule>,
        users: &[User],
        default_approver: Option<UserId>,
    ) -> Result<BuiltChain, WorkflowError> {
        let mut skipped = Vec::new();

        if let Some(rule) = rule
            && !rule.approvers.is_empty()
        {
            if rule.approvers.contains(&employee.id) {
                return Err(WorkflowError::EmployeeIsOwnApprover(employee.id));
            }

            let mut steps = Vec::with_capacity(rule.approvers.len());
            let mut sequence: u32 = 0;
            for approver_id in &rule.approvers {
                let Some(approver) = users.iter().find(|u| u.id == *approver_id) else {
                    skipped.push(*approver_id);
                    continue;
                };
                sequence += 1;
                let status = if sequence == 1 || !rule.is_sequential {
                    StepStatus::Pending
                } else {
                    StepStatus::NotStarted
                };
                steps.push(ApprovalStep {
                    approver_id: approver.id,
                    role: approver.role,
                    status,
                    sequence,
                    comment: None,
                });
            }

            if !steps.is_empty() {
                return Ok(BuiltChain { steps, skipped });
            }
            // Every configured approver was skipped: treat as no usable
            // rule and fall through to the fallback chain.
        }

        let fallback = employee
            .manager_id
            .and_then(|id| users.iter().find(|u| u.id == id))
            .or_else(|| default_approver.and_then(|id| users.iter().find(|u| u.id == id)))
            .ok_or(WorkflowError::NoApproverAvailable(employee.id))?;

        Ok(BuiltChain {
            steps: vec![ApprovalStep {
                approver_id: fallback.id,
                role: fallback.role,
                status: StepStatus::Pending,
                sequence: 1,
                comment: None,
            }],
            skipped,
        })
    }
}
