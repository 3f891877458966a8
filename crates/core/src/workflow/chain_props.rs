//! Property-based tests for approval chain construction.

use proptest::prelude::*;
use uuid::Uuid;

use expensa_shared::{CompanyId, UserId};

use crate::directory::{Role, User};
use crate::workflow::chain::ChainBuilder;
use crate::workflow::error::WorkflowError;
use crate::workflow::rules::ApprovalRule;
use crate::workflow::types::StepStatus;

/// Strategy for generating random user ids.
fn arb_user_id() -> impl Strategy<Value = UserId> {
    any::<[u8; 16]>().prop_map(|bytes| UserId::from_uuid(Uuid::from_bytes(bytes)))
}

/// Strategy for generating approver roles.
fn arb_approver_role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Manager), Just(Role::Director), Just(Role::Admin)]
}

fn make_user(id: UserId, role: Role, company_id: CompanyId) -> User {
    User {
        id,
        name: "Approver".to_string(),
        email: "approver@example.com".to_string(),
        role,
        manager_id: None,
        company_id,
    }
}

fn make_rule(
    employee_id: UserId,
    company_id: CompanyId,
    is_sequential: bool,
    approvers: Vec<UserId>,
) -> ApprovalRule {
    ApprovalRule {
        employee_id,
        company_id,
        is_manager_approver: false,
        is_sequential,
        approvers,
        min_percentage: 100,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Step activation
    // =========================================================================

    /// A sequential chain activates exactly its first step
    #[test]
    fn prop_sequential_activates_first_step_only(
        ids in prop::collection::vec(arb_user_id(), 1..6),
        roles in prop::collection::vec(arb_approver_role(), 6),
    ) {
        let company_id = CompanyId::new();
        let mut users: Vec<User> = ids
            .iter()
            .zip(&roles)
            .map(|(id, role)| make_user(*id, *role, company_id))
            .collect();
        let employee = make_user(UserId::new(), Role::Employee, company_id);
        users.push(employee.clone());
        let rule = make_rule(employee.id, company_id, true, ids.clone());

        let chain = ChainBuilder::new()
            .build(&employee, Some(&rule), &users, None)
            .unwrap();

        prop_assert_eq!(chain.steps.len(), ids.len());
        prop_assert_eq!(chain.steps[0].status, StepStatus::Pending);
        for step in &chain.steps[1..] {
            prop_assert_eq!(step.status, StepStatus::NotStarted);
        }
    }

    /// A concurrent chain activates every step
    #[test]
    fn prop_concurrent_activates_every_step(
        ids in prop::collection::vec(arb_user_id(), 1..6),
    ) {
        let company_id = CompanyId::new();
        let mut users: Vec<User> = ids
            .iter()
            .map(|id| make_user(*id, Role::Manager, company_id))
            .collect();
        let employee = make_user(UserId::new(), Role::Employee, company_id);
        users.push(employee.clone());
        let rule = make_rule(employee.id, company_id, false, ids.clone());

        let chain = ChainBuilder::new()
            .build(&employee, Some(&rule), &users, None)
            .unwrap();

        prop_assert_eq!(chain.steps.len(), ids.len());
        for step in &chain.steps {
            prop_assert_eq!(step.status, StepStatus::Pending);
        }
    }

    // =========================================================================
    // Sequence numbering and skips
    // =========================================================================

    /// Sequence numbers are consecutive from 1 even when approvers are skipped
    #[test]
    fn prop_sequences_consecutive_despite_skips(
        resolvable in prop::collection::vec(arb_user_id(), 1..5),
        ghosts in prop::collection::vec(arb_user_id(), 0..4),
        is_sequential in any::<bool>(),
        seed in 0usize..1000,
    ) {
        let company_id = CompanyId::new();
        let mut users: Vec<User> = resolvable
            .iter()
            .map(|id| make_user(*id, Role::Manager, company_id))
            .collect();
        let employee = make_user(UserId::new(), Role::Employee, company_id);
        users.push(employee.clone());

        // Interleave ghosts into the approver list at pseudo-random spots.
        let mut approvers = resolvable.clone();
        for (offset, ghost) in ghosts.iter().enumerate() {
            let index = (seed + offset) % (approvers.len() + 1);
            approvers.insert(index, *ghost);
        }
        let rule = make_rule(employee.id, company_id, is_sequential, approvers);

        let chain = ChainBuilder::new()
            .build(&employee, Some(&rule), &users, None)
            .unwrap();

        prop_assert_eq!(chain.steps.len(), resolvable.len());
        prop_assert_eq!(chain.skipped.len(), ghosts.len());
        for (i, step) in chain.steps.iter().enumerate() {
            prop_assert_eq!(step.sequence, u32::try_from(i + 1).unwrap());
        }
    }

    /// Every produced step resolves to a directory user and carries its role
    #[test]
    fn prop_steps_carry_directory_roles(
        ids in prop::collection::vec(arb_user_id(), 1..6),
        roles in prop::collection::vec(arb_approver_role(), 6),
        is_sequential in any::<bool>(),
    ) {
        let company_id = CompanyId::new();
        let mut users: Vec<User> = ids
            .iter()
            .zip(&roles)
            .map(|(id, role)| make_user(*id, *role, company_id))
            .collect();
        let employee = make_user(UserId::new(), Role::Employee, company_id);
        users.push(employee.clone());
        let rule = make_rule(employee.id, company_id, is_sequential, ids);

        let chain = ChainBuilder::new()
            .build(&employee, Some(&rule), &users, None)
            .unwrap();

        for step in &chain.steps {
            let user = users.iter().find(|u| u.id == step.approver_id).unwrap();
            prop_assert_eq!(step.role, user.role);
        }
    }

    // =========================================================================
    // Self-approval and fallback
    // =========================================================================

    /// A rule listing the employee always fails chain construction
    #[test]
    fn prop_employee_in_rule_rejected(
        ids in prop::collection::vec(arb_user_id(), 0..5),
        insert_at in 0usize..5,
    ) {
        let company_id = CompanyId::new();
        let mut users: Vec<User> = ids
            .iter()
            .map(|id| make_user(*id, Role::Manager, company_id))
            .collect();
        let manager_id = users.first().map(|u| u.id);
        let mut employee = make_user(UserId::new(), Role::Employee, company_id);
        employee.manager_id = manager_id;
        users.push(employee.clone());

        let mut approvers = ids;
        let index = insert_at.min(approvers.len());
        approvers.insert(index, employee.id);
        let rule = make_rule(employee.id, company_id, true, approvers);

        let result = ChainBuilder::new().build(&employee, Some(&rule), &users, None);
        prop_assert_eq!(result, Err(WorkflowError::EmployeeIsOwnApprover(employee.id)));
    }

    /// Without a rule the chain is a single pending step for the manager
    /// when one resolves, otherwise for the default approver
    #[test]
    fn prop_fallback_is_single_pending_step(
        has_manager in any::<bool>(),
        has_default in any::<bool>(),
    ) {
        let company_id = CompanyId::new();
        let manager = make_user(UserId::new(), Role::Manager, company_id);
        let admin = make_user(UserId::new(), Role::Admin, company_id);
        let mut employee = make_user(UserId::new(), Role::Employee, company_id);
        if has_manager {
            employee.manager_id = Some(manager.id);
        }
        let users = vec![manager.clone(), admin.clone(), employee.clone()];
        let default_approver = has_default.then_some(admin.id);

        let result = ChainBuilder::new().build(&employee, None, &users, default_approver);

        if has_manager {
            let chain = result.unwrap();
            prop_assert_eq!(chain.steps.len(), 1);
            prop_assert_eq!(chain.steps[0].approver_id, manager.id);
            prop_assert_eq!(chain.steps[0].status, StepStatus::Pending);
        } else if has_default {
            let chain = result.unwrap();
            prop_assert_eq!(chain.steps.len(), 1);
            prop_assert_eq!(chain.steps[0].approver_id, admin.id);
        } else {
            prop_assert_eq!(result, Err(WorkflowError::NoApproverAvailable(employee.id)));
        }
    }
}
