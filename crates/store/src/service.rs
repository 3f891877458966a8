//! End-to-end expense operations.
//!
//! [`ExpenseService`] wires the directory, rule, and expense stores to
//! the chain builder and decision engine. Submission converts the
//! claimed amount into the company currency and freezes the approval
//! chain; decisions are evaluated against a held expense entry so
//! concurrent approvers are serialized per expense.

use std::sync::Arc;

use tracing::{info, warn};

use expensa_core::currency::RateTable;
use expensa_core::workflow::{
    ApprovalRule, ChainBuilder, DecisionEngine, DecisionInput, Expense, ExpenseSubmission,
    RuleInput, WorkflowError,
};
use expensa_shared::{CompanyId, ExpenseId, UserId, WorkflowSettings};

use crate::directory::DirectoryStore;
use crate::expenses::ExpenseStore;
use crate::rules::RuleStore;

/// Facade over the stores and the workflow engine.
pub struct ExpenseService {
    directory: Arc<DirectoryStore>,
    rules: Arc<RuleStore>,
    expenses: Arc<ExpenseStore>,
    rates: Arc<RateTable>,
    settings: WorkflowSettings,
}

impl ExpenseService {
    /// Creates a service over the given stores and rate table.
    #[must_use]
    pub fn new(
        directory: Arc<DirectoryStore>,
        rules: Arc<RuleStore>,
        expenses: Arc<ExpenseStore>,
        rates: Arc<RateTable>,
        settings: WorkflowSettings,
    ) -> Self {
        Self {
            directory,
            rules,
            expenses,
            rates,
            settings,
        }
    }

    /// Submits an expense claim and builds its approval chain.
    ///
    /// The claimed amount is converted into the company's base currency
    /// using the rates current at submission. Configured approvers that
    /// no longer resolve to a directory user are skipped with a warning
    /// rather than failing the claim.
    ///
    /// # Errors
    ///
    /// Returns a `WorkflowError` when validation fails, the employee or
    /// company is unknown, no conversion rate is available, or no
    /// approver can be resolved.
    pub fn submit_expense(&self, submission: ExpenseSubmission) -> Result<Expense, WorkflowError> {
        submission.validate()?;

        let employee = self
            .directory
            .find_user(submission.company_id, submission.employee_id)
            .ok_or(WorkflowError::UserNotFound(submission.employee_id))?;
        let company = self
            .directory
            .company(submission.company_id)
            .ok_or(WorkflowError::CompanyNotFound(submission.company_id))?;

        let local_amount =
            self.rates
                .convert(submission.amount, &submission.currency, &company.currency)?;

        let rule = self.rules.get(submission.company_id, submission.employee_id);
        let users = self.directory.list_users(submission.company_id);
        let built = ChainBuilder::new().build(
            &employee,
            rule.as_ref(),
            &users,
            self.settings.default_approver_id,
        )?;
        for approver_id in &built.skipped {
            warn!(
                employee_id = %employee.id,
                approver_id = %approver_id,
                "Skipped configured approver with no directory user"
            );
        }

        let expense =
            Expense::from_submission(submission, employee.name.clone(), local_amount, built.steps);
        self.expenses.insert(expense.clone());

        info!(
            expense_id = %expense.id,
            employee_id = %employee.id,
            steps = expense.approval_chain.len(),
            "Expense submitted"
        );
        Ok(expense)
    }

    /// Records an approver's decision on a pending expense.
    ///
    /// # Errors
    ///
    /// Returns a `WorkflowError` when the expense is unknown or already
    /// settled, or the user has no pending step on it.
    pub fn record_decision(
        &self,
        expense_id: ExpenseId,
        input: DecisionInput,
    ) -> Result<Expense, WorkflowError> {
        let (employee_id, company_id) = self
            .expenses
            .get(expense_id)
            .map(|expense| (expense.employee_id, expense.company_id))
            .ok_or(WorkflowError::ExpenseNotFound(expense_id))?;
        let rule = self.rules.get(company_id, employee_id);

        let expense = self.expenses.update(expense_id, |expense| {
            let outcome = DecisionEngine::new().evaluate(expense, rule.as_ref(), &input)?;
            outcome.apply(expense);
            Ok(expense.clone())
        })?;

        info!(
            expense_id = %expense.id,
            approver_id = %input.approver_id,
            decision = %input.decision,
            status = %expense.status,
            "Decision recorded"
        );
        Ok(expense)
    }

    /// Saves the employee's approval rule, replacing any previous one.
    ///
    /// The rule is normalized against the employee's current manager
    /// before it is stored.
    ///
    /// # Errors
    ///
    /// Returns a `WorkflowError` when the employee is unknown or the
    /// percentage is out of range.
    pub fn save_rule(&self, input: RuleInput) -> Result<ApprovalRule, WorkflowError> {
        let employee = self
            .directory
            .find_user(input.company_id, input.employee_id)
            .ok_or(WorkflowError::UserNotFound(input.employee_id))?;

        let rule = ApprovalRule::from_input(input, employee.manager_id)?;
        self.rules.save(rule.clone());

        info!(
            employee_id = %rule.employee_id,
            approvers = rule.approvers.len(),
            sequential = rule.is_sequential,
            "Approval rule saved"
        );
        Ok(rule)
    }

    /// Returns the employee's approval rule, if configured.
    #[must_use]
    pub fn get_rule(&self, company_id: CompanyId, employee_id: UserId) -> Option<ApprovalRule> {
        self.rules.get(company_id, employee_id)
    }

    /// Returns a snapshot of the expense, if it exists.
    #[must_use]
    pub fn get_expense(&self, expense_id: ExpenseId) -> Option<Expense> {
        self.expenses.get(expense_id)
    }

    /// Returns the employee's expenses, newest first.
    #[must_use]
    pub fn list_expenses_for_employee(&self, employee_id: UserId) -> Vec<Expense> {
        self.expenses.list_for_employee(employee_id)
    }

    /// Returns pending expenses waiting on the approver, newest first.
    #[must_use]
    pub fn list_pending_approvals_for_approver(&self, approver_id: UserId) -> Vec<Expense> {
        self.expenses.list_pending_for_approver(approver_id)
    }
}
