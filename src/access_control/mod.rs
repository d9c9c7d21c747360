//! Access control module
//!
//! Role-based access control for the loan-management dashboard.
//!
//! ## Model
//!
//! ```text
//! role → resource → action → allowed
//! ```
//!
//! - Five fixed roles: `super_admin`, `moderate_admin`, `ceo`,
//!   `regional_admin`, `agent`
//! - Seven resources, each with its own action set (`payments` has
//!   `uploadReceipt`, `analytics` has `viewAll`, and so on)
//! - The matrix is total: every role has a flag for every cell
//!
//! ## Fail-closed evaluation
//!
//! Free-form lookups never error. An unknown role, resource or action, or a
//! missing identity, is a denial:
//!
//! ```
//! use loan_rbac::access_control::{PermissionMatrix, Role, has_permission};
//!
//! let matrix = PermissionMatrix::builtin();
//! assert!(has_permission(matrix, Some(Role::Agent), "payments", "uploadReceipt"));
//! assert!(!has_permission(matrix, Some(Role::Agent), "payments", "approve"));
//! assert!(!has_permission(matrix, Some(Role::Agent), "payments", "refund"));
//! assert!(!has_permission(matrix, None, "borrowers", "read"));
//! ```

pub mod evaluator;
pub mod matrix;
pub mod resources;
pub mod types;

pub use evaluator::{
    AccessDecision, DenyReason, PermissionEvaluator, check_permission,
    check_permission_for_role_name, has_permission,
};
pub use matrix::{PermissionGrid, PermissionMatrix, RawMatrix};
pub use resources::{
    AnalyticsAction, BorrowerAction, LoanAction, PaymentAction, RegionAction, SystemAction,
    UserAction,
};
pub use types::{Permission, Resource, Role};
