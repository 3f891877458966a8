//! Approval rule store.
//!
//! Each employee has at most one rule per company; saving again
//! replaces the previous rule. New expenses pick up the rule current
//! at submission, while already-built chains keep theirs.

use dashmap::DashMap;

use expensa_core::workflow::ApprovalRule;
use expensa_shared::{CompanyId, UserId};

/// Concurrent store for per-employee approval rules.
#[derive(Debug, Default)]
pub struct RuleStore {
    rules: DashMap<(CompanyId, UserId), ApprovalRule>,
}

impl RuleStore {
    /// Creates an empty rule store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves a rule, replacing any previous rule for the employee.
    pub fn save(&self, rule: ApprovalRule) {
        self.rules
            .insert((rule.company_id, rule.employee_id), rule);
    }

    /// Returns the employee's rule, if one is configured.
    #[must_use]
    pub fn get(&self, company_id: CompanyId, employee_id: UserId) -> Option<ApprovalRule> {
        self.rules
            .get(&(company_id, employee_id))
            .map(|entry| entry.clone())
    }
}
