//! Access control integration tests
//!
//! Covers:
//! - Every cell of the built-in matrix, one assertion each
//! - Fail-closed lookups (unknown role, resource, action; no identity)
//! - Convenience predicates, including the aggregate ones
//! - Purity of repeated queries

use loan_rbac::access_control::{
    AccessDecision, DenyReason, Permission, PermissionEvaluator, PermissionMatrix, Resource, Role,
    check_permission, check_permission_for_role_name, has_permission,
};
use rstest::rstest;

// =============================================================================
// Test Helpers
// =============================================================================

fn matrix() -> &'static PermissionMatrix {
    PermissionMatrix::builtin()
}

fn role(name: &str) -> Role {
    Role::try_parse(name).unwrap()
}

/// (role, resource, action, expected) for every cell of the built-in matrix
const EXPECTED: &[(&str, &str, &str, bool)] = &[
    // super_admin
    ("super_admin", "users", "create", true),
    ("super_admin", "users", "read", true),
    ("super_admin", "users", "update", true),
    ("super_admin", "users", "delete", true),
    ("super_admin", "borrowers", "create", true),
    ("super_admin", "borrowers", "read", true),
    ("super_admin", "borrowers", "update", true),
    ("super_admin", "borrowers", "delete", true),
    ("super_admin", "borrowers", "verify", true),
    ("super_admin", "loans", "create", true),
    ("super_admin", "loans", "read", true),
    ("super_admin", "loans", "update", true),
    ("super_admin", "loans", "approve", true),
    ("super_admin", "loans", "reject", true),
    ("super_admin", "loans", "disburse", true),
    ("super_admin", "payments", "create", true),
    ("super_admin", "payments", "read", true),
    ("super_admin", "payments", "update", true),
    ("super_admin", "payments", "approve", true),
    ("super_admin", "payments", "uploadReceipt", true),
    ("super_admin", "payments", "viewHistory", true),
    ("super_admin", "payments", "generateSchedule", true),
    ("super_admin", "payments", "handleOverdue", true),
    ("super_admin", "regions", "create", true),
    ("super_admin", "regions", "read", true),
    ("super_admin", "regions", "update", true),
    ("super_admin", "regions", "delete", true),
    ("super_admin", "regions", "assignAgents", true),
    ("super_admin", "analytics", "viewAll", true),
    ("super_admin", "analytics", "viewRegional", true),
    ("super_admin", "analytics", "exportReports", true),
    ("super_admin", "system", "viewLogs", true),
    ("super_admin", "system", "manageSettings", true),
    ("super_admin", "system", "overrideActions", true),
    // moderate_admin
    ("moderate_admin", "users", "create", true),
    ("moderate_admin", "users", "read", true),
    ("moderate_admin", "users", "update", true),
    ("moderate_admin", "users", "delete", false),
    ("moderate_admin", "borrowers", "create", true),
    ("moderate_admin", "borrowers", "read", true),
    ("moderate_admin", "borrowers", "update", true),
    ("moderate_admin", "borrowers", "delete", false),
    ("moderate_admin", "borrowers", "verify", true),
    ("moderate_admin", "loans", "create", true),
    ("moderate_admin", "loans", "read", true),
    ("moderate_admin", "loans", "update", true),
    ("moderate_admin", "loans", "approve", true),
    ("moderate_admin", "loans", "reject", true),
    ("moderate_admin", "loans", "disburse", true),
    ("moderate_admin", "payments", "create", true),
    ("moderate_admin", "payments", "read", true),
    ("moderate_admin", "payments", "update", true),
    ("moderate_admin", "payments", "approve", true),
    ("moderate_admin", "payments", "uploadReceipt", true),
    ("moderate_admin", "payments", "viewHistory", true),
    ("moderate_admin", "payments", "generateSchedule", true),
    ("moderate_admin", "payments", "handleOverdue", true),
    ("moderate_admin", "regions", "create", false),
    ("moderate_admin", "regions", "read", true),
    ("moderate_admin", "regions", "update", true),
    ("moderate_admin", "regions", "delete", false),
    ("moderate_admin", "regions", "assignAgents", true),
    ("moderate_admin", "analytics", "viewAll", true),
    ("moderate_admin", "analytics", "viewRegional", true),
    ("moderate_admin", "analytics", "exportReports", true),
    ("moderate_admin", "system", "viewLogs", true),
    ("moderate_admin", "system", "manageSettings", false),
    ("moderate_admin", "system", "overrideActions", false),
    // ceo
    ("ceo", "users", "create", false),
    ("ceo", "users", "read", true),
    ("ceo", "users", "update", false),
    ("ceo", "users", "delete", false),
    ("ceo", "borrowers", "create", false),
    ("ceo", "borrowers", "read", true),
    ("ceo", "borrowers", "update", false),
    ("ceo", "borrowers", "delete", false),
    ("ceo", "borrowers", "verify", false),
    ("ceo", "loans", "create", false),
    ("ceo", "loans", "read", true),
    ("ceo", "loans", "update", false),
    ("ceo", "loans", "approve", true),
    ("ceo", "loans", "reject", true),
    ("ceo", "loans", "disburse", false),
    ("ceo", "payments", "create", false),
    ("ceo", "payments", "read", true),
    ("ceo", "payments", "update", false),
    ("ceo", "payments", "approve", false),
    ("ceo", "payments", "uploadReceipt", false),
    ("ceo", "payments", "viewHistory", true),
    ("ceo", "payments", "generateSchedule", false),
    ("ceo", "payments", "handleOverdue", false),
    ("ceo", "regions", "create", false),
    ("ceo", "regions", "read", true),
    ("ceo", "regions", "update", false),
    ("ceo", "regions", "delete", false),
    ("ceo", "regions", "assignAgents", false),
    ("ceo", "analytics", "viewAll", true),
    ("ceo", "analytics", "viewRegional", true),
    ("ceo", "analytics", "exportReports", true),
    ("ceo", "system", "viewLogs", false),
    ("ceo", "system", "manageSettings", false),
    ("ceo", "system", "overrideActions", false),
    // regional_admin
    ("regional_admin", "users", "create", false),
    ("regional_admin", "users", "read", true),
    ("regional_admin", "users", "update", false),
    ("regional_admin", "users", "delete", false),
    ("regional_admin", "borrowers", "create", true),
    ("regional_admin", "borrowers", "read", true),
    ("regional_admin", "borrowers", "update", true),
    ("regional_admin", "borrowers", "delete", false),
    ("regional_admin", "borrowers", "verify", true),
    ("regional_admin", "loans", "create", true),
    ("regional_admin", "loans", "read", true),
    ("regional_admin", "loans", "update", true),
    ("regional_admin", "loans", "approve", true),
    ("regional_admin", "loans", "reject", true),
    ("regional_admin", "loans", "disburse", false),
    ("regional_admin", "payments", "create", true),
    ("regional_admin", "payments", "read", true),
    ("regional_admin", "payments", "update", true),
    ("regional_admin", "payments", "approve", true),
    ("regional_admin", "payments", "uploadReceipt", true),
    ("regional_admin", "payments", "viewHistory", true),
    ("regional_admin", "payments", "generateSchedule", true),
    ("regional_admin", "payments", "handleOverdue", true),
    ("regional_admin", "regions", "create", false),
    ("regional_admin", "regions", "read", true),
    ("regional_admin", "regions", "update", false),
    ("regional_admin", "regions", "delete", false),
    ("regional_admin", "regions", "assignAgents", true),
    ("regional_admin", "analytics", "viewAll", false),
    ("regional_admin", "analytics", "viewRegional", true),
    ("regional_admin", "analytics", "exportReports", true),
    ("regional_admin", "system", "viewLogs", false),
    ("regional_admin", "system", "manageSettings", false),
    ("regional_admin", "system", "overrideActions", false),
    // agent
    ("agent", "users", "create", false),
    ("agent", "users", "read", false),
    ("agent", "users", "update", false),
    ("agent", "users", "delete", false),
    ("agent", "borrowers", "create", true),
    ("agent", "borrowers", "read", true),
    ("agent", "borrowers", "update", true),
    ("agent", "borrowers", "delete", false),
    ("agent", "borrowers", "verify", false),
    ("agent", "loans", "create", true),
    ("agent", "loans", "read", true),
    ("agent", "loans", "update", false),
    ("agent", "loans", "approve", false),
    ("agent", "loans", "reject", false),
    ("agent", "loans", "disburse", false),
    ("agent", "payments", "create", true),
    ("agent", "payments", "read", true),
    ("agent", "payments", "update", false),
    ("agent", "payments", "approve", false),
    ("agent", "payments", "uploadReceipt", true),
    ("agent", "payments", "viewHistory", true),
    ("agent", "payments", "generateSchedule", false),
    ("agent", "payments", "handleOverdue", false),
    ("agent", "regions", "create", false),
    ("agent", "regions", "read", false),
    ("agent", "regions", "update", false),
    ("agent", "regions", "delete", false),
    ("agent", "regions", "assignAgents", false),
    ("agent", "analytics", "viewAll", false),
    ("agent", "analytics", "viewRegional", false),
    ("agent", "analytics", "exportReports", false),
    ("agent", "system", "viewLogs", false),
    ("agent", "system", "manageSettings", false),
    ("agent", "system", "overrideActions", false),
];

// =============================================================================
// 1. Exhaustive matrix
// =============================================================================

mod matrix_cells {
    use super::*;

    #[test]
    fn test_every_cell_matches_expected() {
        for (role_name, resource, action, expected) in EXPECTED {
            assert_eq!(
                has_permission(matrix(), Some(role(role_name)), resource, action),
                *expected,
                "{}: {}.{}",
                role_name,
                resource,
                action
            );
        }
    }

    #[test]
    fn test_expected_table_is_total() {
        let cells = Role::all().len() * Permission::all().len();
        assert_eq!(EXPECTED.len(), cells);

        for role in Role::all() {
            for permission in Permission::all() {
                assert!(
                    EXPECTED.iter().any(|(r, res, a, _)| {
                        *r == role.as_str()
                            && *res == permission.resource().as_str()
                            && *a == permission.action()
                    }),
                    "{} {} missing from table",
                    role,
                    permission
                );
            }
        }
    }

    #[test]
    fn test_typed_and_string_lookups_agree() {
        for role in Role::all() {
            let evaluator = PermissionEvaluator::new(matrix(), role);
            for permission in Permission::all() {
                assert_eq!(
                    evaluator.allows(permission),
                    evaluator
                        .has_permission(permission.resource().as_str(), permission.action()),
                    "{} {}",
                    role,
                    permission
                );
            }
        }
    }
}

// =============================================================================
// 2. Scenarios
// =============================================================================

mod scenarios {
    use super::*;

    #[rstest]
    #[case("agent", "payments", "uploadReceipt", true)]
    #[case("agent", "payments", "approve", false)]
    #[case("regional_admin", "loans", "approve", true)]
    #[case("regional_admin", "regions", "create", false)]
    #[case("ceo", "borrowers", "read", true)]
    #[case("ceo", "borrowers", "update", false)]
    fn test_scenario(
        #[case] role_name: &str,
        #[case] resource: &str,
        #[case] action: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(
            has_permission(matrix(), Some(role(role_name)), resource, action),
            expected
        );
    }
}

// =============================================================================
// 3. Fail-closed lookups
// =============================================================================

mod fail_closed {
    use super::*;

    #[rstest]
    #[case("nonexistent", "read")]
    #[case("payments", "nonexistentAction")]
    #[case("analytics", "read")]
    #[case("Payments", "approve")]
    #[case("payments", "upload_receipt")]
    #[case("", "")]
    fn test_undeclared_pairs_denied_for_every_role(#[case] resource: &str, #[case] action: &str) {
        for role in Role::all() {
            assert!(!has_permission(matrix(), Some(*role), resource, action));
        }
    }

    #[test]
    fn test_unknown_resource_reason() {
        assert_eq!(
            check_permission(matrix(), Some(Role::SuperAdmin), "nonexistent", "read"),
            AccessDecision::Denied(DenyReason::UnknownResource("nonexistent".to_string()))
        );
    }

    #[test]
    fn test_unknown_action_reason() {
        assert_eq!(
            check_permission(
                matrix(),
                Some(Role::SuperAdmin),
                "payments",
                "nonexistentAction"
            ),
            AccessDecision::Denied(DenyReason::UnknownAction {
                resource: Resource::Payments,
                action: "nonexistentAction".to_string(),
            })
        );
    }

    #[test]
    fn test_no_identity_denies_every_cell() {
        for (_, resource, action, _) in EXPECTED {
            assert!(!has_permission(matrix(), None, resource, action));
        }
    }

    #[test]
    fn test_no_identity_denies_universally_granted_cell() {
        // Granted to every real role
        for role in Role::all() {
            assert!(has_permission(matrix(), Some(*role), "borrowers", "read"));
        }
        assert!(!has_permission(matrix(), None, "borrowers", "read"));

        let nobody: Option<Role> = None;
        let evaluator = PermissionEvaluator::new(matrix(), &nobody);
        assert!(!evaluator.has_permission("borrowers", "read"));
    }

    #[rstest]
    #[case(Some("root"))]
    #[case(Some("SUPER_ADMIN"))]
    #[case(Some("super-admin"))]
    #[case(Some(""))]
    #[case(None)]
    fn test_malformed_role_denied(#[case] role_name: Option<&str>) {
        for (_, resource, action, _) in EXPECTED {
            assert!(
                check_permission_for_role_name(matrix(), role_name, resource, action).is_denied()
            );
        }
    }

    #[test]
    fn test_denied_everywhere_matrix() {
        let matrix = PermissionMatrix::uniform(false);
        for role in Role::all() {
            for permission in Permission::all() {
                assert!(!has_permission(
                    &matrix,
                    Some(*role),
                    permission.resource().as_str(),
                    permission.action()
                ));
            }
        }
    }
}

// =============================================================================
// 4. Convenience predicates
// =============================================================================

mod predicates {
    use super::*;

    #[test]
    fn test_only_super_admin_has_all_system_actions() {
        for role in Role::all() {
            let evaluator = PermissionEvaluator::new(matrix(), role);
            let all_system = evaluator.can_view_system_logs()
                && evaluator.can_manage_settings()
                && evaluator.can_override_actions();
            assert_eq!(all_system, *role == Role::SuperAdmin, "{}", role);
        }
    }

    #[rstest]
    #[case(Role::SuperAdmin, true)]
    #[case(Role::ModerateAdmin, true)]
    #[case(Role::Ceo, false)]
    #[case(Role::RegionalAdmin, false)]
    #[case(Role::Agent, false)]
    fn test_can_manage_users(#[case] role: Role, #[case] expected: bool) {
        let evaluator = PermissionEvaluator::new(matrix(), &role);
        assert_eq!(evaluator.can_manage_users(), expected);

        let any_write = ["create", "update", "delete"]
            .iter()
            .any(|action| evaluator.has_permission("users", action));
        assert_eq!(any_write, expected);
    }

    #[test]
    fn test_can_manage_users_aggregates_any_write() {
        // Only update granted
        let mut matrix = PermissionMatrix::uniform(false);
        matrix.ceo.users.update = true;

        let evaluator = PermissionEvaluator::new(&matrix, &Role::Ceo);
        assert!(evaluator.can_manage_users());
        assert!(!evaluator.can_view_users());
    }

    #[test]
    fn test_can_manage_regions() {
        let super_admin = PermissionEvaluator::new(matrix(), &Role::SuperAdmin);
        let moderate = PermissionEvaluator::new(matrix(), &Role::ModerateAdmin);
        let regional = PermissionEvaluator::new(matrix(), &Role::RegionalAdmin);

        assert!(super_admin.can_manage_regions());
        assert!(moderate.can_manage_regions());
        assert!(!regional.can_manage_regions());
        assert!(regional.can_assign_agents());
    }

    #[test]
    fn test_single_pair_predicates() {
        let agent = PermissionEvaluator::new(matrix(), &Role::Agent);
        assert!(agent.can_create_borrowers());
        assert!(agent.can_update_borrowers());
        assert!(!agent.can_delete_borrowers());
        assert!(!agent.can_verify_borrowers());
        assert!(agent.can_create_loans());
        assert!(!agent.can_update_loans());
        assert!(!agent.can_approve_loans());
        assert!(agent.can_create_payments());
        assert!(agent.can_upload_receipts());
        assert!(!agent.can_approve_payments());
        assert!(agent.can_view_payment_history());
        assert!(!agent.can_generate_schedules());
        assert!(!agent.can_handle_overdue());
        assert!(!agent.can_view_regions());
        assert!(!agent.can_view_regional_analytics());
        assert!(!agent.can_export_reports());

        let ceo = PermissionEvaluator::new(matrix(), &Role::Ceo);
        assert!(ceo.can_view_all_analytics());
        assert!(ceo.can_approve_loans());
        assert!(ceo.can_reject_loans());
        assert!(!ceo.can_disburse_loans());
        assert!(!ceo.can_approve_payments());

        let regional = PermissionEvaluator::new(matrix(), &Role::RegionalAdmin);
        assert!(regional.can_view_regional_analytics());
        assert!(!regional.can_view_all_analytics());
        assert!(regional.can_handle_overdue());
        assert!(regional.can_generate_schedules());
    }

    #[test]
    fn test_predicates_all_false_without_identity() {
        let nobody: Option<Role> = None;
        let evaluator = PermissionEvaluator::new(matrix(), &nobody);
        assert!(!evaluator.can_manage_users());
        assert!(!evaluator.can_manage_regions());
        assert!(!evaluator.can_create_borrowers());
        assert!(!evaluator.can_view_payment_history());
        assert!(!evaluator.can_view_system_logs());
    }
}

// =============================================================================
// 5. Purity
// =============================================================================

mod purity {
    use super::*;

    #[test]
    fn test_repeated_queries_identical() {
        for (role_name, resource, action, _) in EXPECTED {
            let role = Some(role(role_name));
            let first = check_permission(matrix(), role, resource, action);
            let second = check_permission(matrix(), role, resource, action);
            assert_eq!(first, second);
        }

        let first = check_permission(matrix(), Some(Role::Agent), "payments", "refund");
        let second = check_permission(matrix(), Some(Role::Agent), "payments", "refund");
        assert_eq!(first, second);
    }

    #[test]
    fn test_evaluation_does_not_mutate_matrix() {
        let before = matrix().clone();
        let evaluator = PermissionEvaluator::new(matrix(), &Role::SuperAdmin);
        for permission in Permission::all() {
            evaluator.allows(permission);
        }
        assert_eq!(&before, matrix());
    }
}
