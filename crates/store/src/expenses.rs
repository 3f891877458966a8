//! Expense store.
//!
//! Expenses live in a concurrent map keyed by id. Decision writes go
//! through [`ExpenseStore::update`], which holds the entry for the
//! whole read-evaluate-write, so two approvers racing on one expense
//! are serialized.

use dashmap::DashMap;

use expensa_core::workflow::{Expense, ExpenseStatus, WorkflowError};
use expensa_shared::{ExpenseId, UserId};

/// Concurrent store for expenses.
#[derive(Debug, Default)]
pub struct ExpenseStore {
    expenses: DashMap<ExpenseId, Expense>,
}

impl ExpenseStore {
    /// Creates an empty expense store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a freshly submitted expense.
    pub fn insert(&self, expense: Expense) {
        self.expenses.insert(expense.id, expense);
    }

    /// Returns a snapshot of the expense, if it exists.
    #[must_use]
    pub fn get(&self, expense_id: ExpenseId) -> Option<Expense> {
        self.expenses.get(&expense_id).map(|entry| entry.clone())
    }

    /// Runs `f` against the expense while holding its entry exclusively.
    ///
    /// `f` must not call back into this store, or it will deadlock on
    /// the held shard.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::ExpenseNotFound` if the expense does not
    /// exist, otherwise whatever `f` returns.
    pub fn update<T>(
        &self,
        expense_id: ExpenseId,
        f: impl FnOnce(&mut Expense) -> Result<T, WorkflowError>,
    ) -> Result<T, WorkflowError> {
        let mut entry = self
            .expenses
            .get_mut(&expense_id)
            .ok_or(WorkflowError::ExpenseNotFound(expense_id))?;
        f(&mut entry)
    }

    /// Returns the employee's expenses, newest first.
    #[must_use]
    pub fn list_for_employee(&self, employee_id: UserId) -> Vec<Expense> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|entry| entry.employee_id == employee_id)
            .map(|entry| entry.clone())
            .collect();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        expenses
    }

    /// Returns pending expenses currently waiting on `approver_id`,
    /// newest first.
    #[must_use]
    pub fn list_pending_for_approver(&self, approver_id: UserId) -> Vec<Expense> {
        let mut expenses: Vec<Expense> = self
            .expenses
            .iter()
            .filter(|entry| {
                entry.status == ExpenseStatus::Pending
                    && entry.pending_step_for(approver_id).is_some()
            })
            .map(|entry| entry.clone())
            .collect();
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        expenses
    }
}
