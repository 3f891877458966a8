//! Property-based tests for approval rule normalization.

use proptest::prelude::*;
use uuid::Uuid;

use expensa_shared::{CompanyId, UserId};

use crate::workflow::error::WorkflowError;
use crate::workflow::rules::{ApprovalRule, RuleInput};

/// Strategy for generating random user ids.
fn arb_user_id() -> impl Strategy<Value = UserId> {
    any::<[u8; 16]>().prop_map(|bytes| UserId::from_uuid(Uuid::from_bytes(bytes)))
}

/// Strategy for generating approver lists with genuine duplicates:
/// picks repeatedly from a small pool of ids.
fn arb_approvers_with_dups() -> impl Strategy<Value = Vec<UserId>> {
    (
        prop::collection::vec(arb_user_id(), 1..4),
        prop::collection::vec(0usize..4, 0..10),
    )
        .prop_map(|(pool, picks)| picks.into_iter().map(|i| pool[i % pool.len()]).collect())
}

fn make_input(
    approvers: Vec<UserId>,
    is_manager_approver: bool,
    is_sequential: bool,
    min_percentage: u8,
) -> RuleInput {
    RuleInput {
        employee_id: UserId::new(),
        company_id: CompanyId::new(),
        is_manager_approver,
        is_sequential,
        approvers,
        min_percentage,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Normalization invariants
    // =========================================================================

    /// The employee never survives normalization, wherever they were inserted
    #[test]
    fn prop_normalized_never_contains_employee(
        approvers in arb_approvers_with_dups(),
        insert_at in 0usize..10,
        is_manager_approver in any::<bool>(),
        is_sequential in any::<bool>(),
    ) {
        let mut input = make_input(approvers, is_manager_approver, is_sequential, 100);
        let index = insert_at.min(input.approvers.len());
        let employee_id = input.employee_id;
        input.approvers.insert(index, employee_id);

        let rule = ApprovalRule::from_input(input, Some(UserId::new())).unwrap();
        prop_assert!(!rule.approvers.contains(&employee_id));
    }

    /// Normalized approver lists contain no duplicates
    #[test]
    fn prop_normalized_has_no_duplicates(
        approvers in arb_approvers_with_dups(),
        is_manager_approver in any::<bool>(),
        is_sequential in any::<bool>(),
    ) {
        let input = make_input(approvers, is_manager_approver, is_sequential, 100);
        let rule = ApprovalRule::from_input(input, Some(UserId::new())).unwrap();

        let mut unique = rule.approvers.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), rule.approvers.len());
    }

    /// Dedup keeps each approver at their first position
    #[test]
    fn prop_first_occurrence_order_preserved(
        approvers in arb_approvers_with_dups(),
    ) {
        let input = make_input(approvers.clone(), false, true, 100);
        let employee_id = input.employee_id;
        let rule = ApprovalRule::from_input(input, None).unwrap();

        let mut expected = Vec::new();
        for id in &approvers {
            if *id != employee_id && !expected.contains(id) {
                expected.push(*id);
            }
        }
        prop_assert_eq!(rule.approvers, expected);
    }

    /// Normalization is idempotent
    #[test]
    fn prop_normalization_is_idempotent(
        approvers in arb_approvers_with_dups(),
        is_manager_approver in any::<bool>(),
        is_sequential in any::<bool>(),
        manager in arb_user_id(),
    ) {
        let input = make_input(approvers, is_manager_approver, is_sequential, 100);
        let employee_id = input.employee_id;
        let company_id = input.company_id;
        let once = ApprovalRule::from_input(input, Some(manager)).unwrap();

        let again = ApprovalRule::from_input(
            RuleInput {
                employee_id,
                company_id,
                is_manager_approver,
                is_sequential,
                approvers: once.approvers.clone(),
                min_percentage: once.min_percentage,
            },
            Some(manager),
        )
        .unwrap();
        prop_assert_eq!(again.approvers, once.approvers);
    }

    // =========================================================================
    // Manager injection
    // =========================================================================

    /// A sequential manager-approver rule always puts the manager first
    #[test]
    fn prop_sequential_manager_leads(
        approvers in arb_approvers_with_dups(),
        manager in arb_user_id(),
    ) {
        let input = make_input(approvers, true, true, 100);
        prop_assume!(manager != input.employee_id);

        let rule = ApprovalRule::from_input(input, Some(manager)).unwrap();
        prop_assert_eq!(rule.approvers.first(), Some(&manager));
    }

    /// A concurrent manager-approver rule contains the manager exactly once
    #[test]
    fn prop_concurrent_manager_present_once(
        approvers in arb_approvers_with_dups(),
        manager in arb_user_id(),
    ) {
        let input = make_input(approvers, true, false, 100);
        prop_assume!(manager != input.employee_id);

        let rule = ApprovalRule::from_input(input, Some(manager)).unwrap();
        let count = rule.approvers.iter().filter(|id| **id == manager).count();
        prop_assert_eq!(count, 1);
    }

    // =========================================================================
    // Percentage threshold
    // =========================================================================

    /// Percentages outside 1..=100 are rejected
    #[test]
    fn prop_invalid_percentage_rejected(
        percentage in prop_oneof![Just(0u8), 101u8..=255],
    ) {
        let input = make_input(vec![UserId::new()], false, true, percentage);
        let result = ApprovalRule::from_input(input, None);
        prop_assert_eq!(result, Err(WorkflowError::InvalidPercentage(percentage)));
    }

    /// Required approvals stay within 1..=total and hit total at 100%
    #[test]
    fn prop_required_approvals_bounds(
        total in 1usize..12,
        percentage in 1u8..=100,
    ) {
        let mut input = make_input(vec![UserId::new()], false, false, percentage);
        input.min_percentage = percentage;
        let rule = ApprovalRule::from_input(input, None).unwrap();

        let required = rule.required_approvals(total);
        prop_assert!(required >= 1);
        prop_assert!(required <= total);
        if percentage == 100 {
            prop_assert_eq!(required, total);
        }
    }
}
