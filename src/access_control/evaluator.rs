//! Permission evaluator
//!
//! Answers authorization questions against the permission matrix. Lookups by
//! free-form strings are fail-closed: an unknown role, resource or action, or
//! the absence of an identity, is a denial and never an error.

use crate::access_control::matrix::PermissionMatrix;
use crate::access_control::resources::{
    AnalyticsAction, BorrowerAction, LoanAction, PaymentAction, RegionAction, SystemAction,
    UserAction,
};
use crate::access_control::types::{Permission, Resource, Role};
use crate::error::AccessDeniedError;
use crate::session::IdentitySource;
use std::fmt;
use tracing::{debug, trace, warn};

/// Result of access check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Access is allowed
    Allowed,
    /// Access is denied
    Denied(DenyReason),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allowed)
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AccessDecision::Denied(_))
    }
}

/// Why a check was denied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    Unauthenticated,
    UnknownRole(String),
    UnknownResource(String),
    UnknownAction { resource: Resource, action: String },
    NotGranted(Role),
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::Unauthenticated => write!(f, "no authenticated identity"),
            DenyReason::UnknownRole(role) => write!(f, "unknown role '{}'", role),
            DenyReason::UnknownResource(resource) => write!(f, "unknown resource '{}'", resource),
            DenyReason::UnknownAction { resource, action } => {
                write!(f, "resource '{}' has no action '{}'", resource, action)
            }
            DenyReason::NotGranted(role) => {
                write!(f, "role '{}' is not granted this permission", role)
            }
        }
    }
}

/// Check a free-form (resource, action) pair for a role
pub fn check_permission(
    matrix: &PermissionMatrix,
    role: Option<Role>,
    resource: &str,
    action: &str,
) -> AccessDecision {
    debug!(
        role = ?role,
        resource = resource,
        action = action,
        "Checking permission"
    );

    let Some(role) = role else {
        trace!("No identity");
        return AccessDecision::Denied(DenyReason::Unauthenticated);
    };

    let Some(parsed_resource) = Resource::try_parse(resource) else {
        trace!("Unknown resource");
        return AccessDecision::Denied(DenyReason::UnknownResource(resource.to_string()));
    };

    let Some(permission) = parsed_resource.parse_action(action) else {
        trace!("Unknown action for resource");
        return AccessDecision::Denied(DenyReason::UnknownAction {
            resource: parsed_resource,
            action: action.to_string(),
        });
    };

    decide(matrix, role, permission)
}

/// Boolean form of [`check_permission`]
pub fn has_permission(
    matrix: &PermissionMatrix,
    role: Option<Role>,
    resource: &str,
    action: &str,
) -> bool {
    check_permission(matrix, role, resource, action).is_allowed()
}

/// Like [`check_permission`], with the role given as an unvalidated identifier
///
/// A role outside the closed set is denied, never an error.
pub fn check_permission_for_role_name(
    matrix: &PermissionMatrix,
    role: Option<&str>,
    resource: &str,
    action: &str,
) -> AccessDecision {
    match role {
        None => AccessDecision::Denied(DenyReason::Unauthenticated),
        Some(name) => match Role::try_parse(name) {
            Some(role) => check_permission(matrix, Some(role), resource, action),
            None => {
                trace!(role = name, "Unknown role");
                AccessDecision::Denied(DenyReason::UnknownRole(name.to_string()))
            }
        },
    }
}

fn decide(matrix: &PermissionMatrix, role: Role, permission: Permission) -> AccessDecision {
    if matrix.grid(role).allows(permission) {
        trace!(%role, %permission, "Granted by matrix");
        AccessDecision::Allowed
    } else {
        trace!(%role, %permission, "Not granted by matrix");
        AccessDecision::Denied(DenyReason::NotGranted(role))
    }
}

/// Evaluator bound to the current identity
///
/// The role is read from the identity source on every call, so a sign-out or
/// role change takes effect on the next query.
pub struct PermissionEvaluator<'a> {
    matrix: &'a PermissionMatrix,
    identity: &'a dyn IdentitySource,
}

impl<'a> PermissionEvaluator<'a> {
    pub fn new(matrix: &'a PermissionMatrix, identity: &'a dyn IdentitySource) -> Self {
        Self { matrix, identity }
    }

    /// Role of the current identity, if any
    pub fn role(&self) -> Option<Role> {
        self.identity.current_role()
    }

    /// Check a free-form (resource, action) pair
    pub fn check(&self, resource: &str, action: &str) -> AccessDecision {
        check_permission(self.matrix, self.role(), resource, action)
    }

    pub fn has_permission(&self, resource: &str, action: &str) -> bool {
        self.check(resource, action).is_allowed()
    }

    /// Check a typed permission
    pub fn check_permission(&self, permission: Permission) -> AccessDecision {
        match self.role() {
            Some(role) => decide(self.matrix, role, permission),
            None => AccessDecision::Denied(DenyReason::Unauthenticated),
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        self.check_permission(permission).is_allowed()
    }

    /// Check a typed permission, returning an error if denied
    pub fn require(&self, permission: Permission) -> Result<(), AccessDeniedError> {
        match self.check_permission(permission) {
            AccessDecision::Allowed => Ok(()),
            AccessDecision::Denied(reason) => {
                warn!(%permission, %reason, "Permission required but denied");
                Err(match reason {
                    DenyReason::Unauthenticated => {
                        AccessDeniedError::unauthenticated(permission.to_string())
                    }
                    DenyReason::NotGranted(role) => {
                        AccessDeniedError::not_granted(permission.to_string(), role.as_str())
                    }
                    other => AccessDeniedError::new(permission.to_string(), other.to_string()),
                })
            }
        }
    }

    /// Permissions granted to the current identity
    pub fn granted(&self) -> Vec<Permission> {
        self.role()
            .map(|role| self.matrix.grid(role).granted())
            .unwrap_or_default()
    }

    fn any(&self, permissions: &[Permission]) -> bool {
        permissions.iter().any(|p| self.allows(*p))
    }

    // Users

    /// Any of create, update or delete on users
    pub fn can_manage_users(&self) -> bool {
        self.any(&[
            Permission::Users(UserAction::Create),
            Permission::Users(UserAction::Update),
            Permission::Users(UserAction::Delete),
        ])
    }

    pub fn can_view_users(&self) -> bool {
        self.allows(Permission::Users(UserAction::Read))
    }

    // Borrowers

    pub fn can_create_borrowers(&self) -> bool {
        self.allows(Permission::Borrowers(BorrowerAction::Create))
    }

    pub fn can_update_borrowers(&self) -> bool {
        self.allows(Permission::Borrowers(BorrowerAction::Update))
    }

    pub fn can_delete_borrowers(&self) -> bool {
        self.allows(Permission::Borrowers(BorrowerAction::Delete))
    }

    pub fn can_verify_borrowers(&self) -> bool {
        self.allows(Permission::Borrowers(BorrowerAction::Verify))
    }

    // Loans

    pub fn can_create_loans(&self) -> bool {
        self.allows(Permission::Loans(LoanAction::Create))
    }

    pub fn can_update_loans(&self) -> bool {
        self.allows(Permission::Loans(LoanAction::Update))
    }

    pub fn can_approve_loans(&self) -> bool {
        self.allows(Permission::Loans(LoanAction::Approve))
    }

    pub fn can_reject_loans(&self) -> bool {
        self.allows(Permission::Loans(LoanAction::Reject))
    }

    pub fn can_disburse_loans(&self) -> bool {
        self.allows(Permission::Loans(LoanAction::Disburse))
    }

    // Payments

    pub fn can_create_payments(&self) -> bool {
        self.allows(Permission::Payments(PaymentAction::Create))
    }

    pub fn can_approve_payments(&self) -> bool {
        self.allows(Permission::Payments(PaymentAction::Approve))
    }

    pub fn can_upload_receipts(&self) -> bool {
        self.allows(Permission::Payments(PaymentAction::UploadReceipt))
    }

    pub fn can_view_payment_history(&self) -> bool {
        self.allows(Permission::Payments(PaymentAction::ViewHistory))
    }

    pub fn can_generate_schedules(&self) -> bool {
        self.allows(Permission::Payments(PaymentAction::GenerateSchedule))
    }

    pub fn can_handle_overdue(&self) -> bool {
        self.allows(Permission::Payments(PaymentAction::HandleOverdue))
    }

    // Regions

    /// Any of create, update or delete on regions
    pub fn can_manage_regions(&self) -> bool {
        self.any(&[
            Permission::Regions(RegionAction::Create),
            Permission::Regions(RegionAction::Update),
            Permission::Regions(RegionAction::Delete),
        ])
    }

    pub fn can_view_regions(&self) -> bool {
        self.allows(Permission::Regions(RegionAction::Read))
    }

    pub fn can_assign_agents(&self) -> bool {
        self.allows(Permission::Regions(RegionAction::AssignAgents))
    }

    // Analytics

    pub fn can_view_all_analytics(&self) -> bool {
        self.allows(Permission::Analytics(AnalyticsAction::ViewAll))
    }

    pub fn can_view_regional_analytics(&self) -> bool {
        self.allows(Permission::Analytics(AnalyticsAction::ViewRegional))
    }

    pub fn can_export_reports(&self) -> bool {
        self.allows(Permission::Analytics(AnalyticsAction::ExportReports))
    }

    // System

    pub fn can_view_system_logs(&self) -> bool {
        self.allows(Permission::System(SystemAction::ViewLogs))
    }

    pub fn can_manage_settings(&self) -> bool {
        self.allows(Permission::System(SystemAction::ManageSettings))
    }

    pub fn can_override_actions(&self) -> bool {
        self.allows(Permission::System(SystemAction::OverrideActions))
    }
}
