//! Per-employee approval rules.
//!
//! A rule configures who must approve an employee's expenses and how:
//! sequentially (one approver at a time) or concurrently (everyone at
//! once), optionally short-circuited by a percentage threshold.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use expensa_shared::{CompanyId, UserId};

use crate::workflow::error::WorkflowError;

/// Raw rule configuration as entered by an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleInput {
    /// The employee the rule applies to.
    pub employee_id: UserId,
    /// The company the rule belongs to.
    pub company_id: CompanyId,
    /// Whether the employee's manager is injected into the chain.
    pub is_manager_approver: bool,
    /// Sequential (true) or concurrent (false) approval flow.
    pub is_sequential: bool,
    /// Configured approvers, in admin-entered order.
    pub approvers: Vec<UserId>,
    /// Percentage of approvals that auto-approves the expense.
    /// 100 means every approver must approve.
    pub min_percentage: u8,
}

/// A normalized approval rule.
///
/// Invariants held after construction:
/// - `approvers` never contains the employee themselves
/// - `approvers` contains no duplicates (first occurrence wins)
/// - if manager injection applies, the manager leads a sequential
///   chain and is present in a concurrent one
/// - `min_percentage` is within 1..=100
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalRule {
    /// The employee the rule applies to.
    pub employee_id: UserId,
    /// The company the rule belongs to.
    pub company_id: CompanyId,
    /// Whether the employee's manager was injected into the chain.
    pub is_manager_approver: bool,
    /// Sequential (true) or concurrent (false) approval flow.
    pub is_sequential: bool,
    /// Normalized approver list.
    pub approvers: Vec<UserId>,
    /// Percentage of approvals that auto-approves the expense.
    pub min_percentage: u8,
}

impl ApprovalRule {
    /// Normalizes a raw rule input into a stored rule.
    ///
    /// Manager injection happens first so the manager participates in
    /// dedup like any other approver: for sequential flows the manager
    /// is moved to the front of the chain, for concurrent flows they
    /// are appended if absent. The employee's own id is then stripped
    /// and duplicates removed, keeping each approver's first position.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::InvalidPercentage` if `min_percentage`
    /// is 0 or greater than 100.
    pub fn from_input(
        input: RuleInput,
        manager_id: Option<UserId>,
    ) -> Result<Self, WorkflowError> {
        if input.min_percentage == 0 || input.min_percentage > 100 {
            return Err(WorkflowError::InvalidPercentage(input.min_percentage));
        }

        let mut approvers = input.approvers;

        if input.is_manager_approver
            && let Some(manager) = manager_id
        {
            if input.is_sequential {
                approvers.retain(|id| *id != manager);
                approvers.insert(0, manager);
            } else if !approvers.contains(&manager) {
                approvers.push(manager);
            }
        }

        let mut seen = HashSet::new();
        approvers.retain(|id| *id != input.employee_id && seen.insert(*id));

        Ok(Self {
            employee_id: input.employee_id,
            company_id: input.company_id,
            is_manager_approver: input.is_manager_approver,
            is_sequential: input.is_sequential,
            approvers,
            min_percentage: input.min_percentage,
        })
    }

    /// Whether the percentage threshold can approve before every
    /// approver has decided.
    #[must_use]
    pub fn has_percentage_threshold(&self) -> bool {
        self.min_percentage < 100
    }

    /// Number of approvals needed to satisfy the percentage threshold
    /// over a chain of `total` steps (rounded up).
    #[must_use]
    pub fn required_approvals(&self, total: usize) -> usize {
        (total * usize::from(self.min_percentage)).div_ceil(100)
    }
}
