//! Access control types
//!
//! The closed vocabulary of roles, resources and permissions.

use crate::access_control::resources::{
    AnalyticsAction, BorrowerAction, LoanAction, PaymentAction, RegionAction, SystemAction,
    UserAction,
};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Identity category that determines what a user may do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    ModerateAdmin,
    Ceo,
    RegionalAdmin,
    Agent,
}

impl Role {
    /// Get the role identifier as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::ModerateAdmin => "moderate_admin",
            Role::Ceo => "ceo",
            Role::RegionalAdmin => "regional_admin",
            Role::Agent => "agent",
        }
    }

    /// Human-readable title
    pub const fn label(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::ModerateAdmin => "Moderate Admin",
            Role::Ceo => "CEO",
            Role::RegionalAdmin => "Regional Admin",
            Role::Agent => "Agent",
        }
    }

    /// Try to parse a role from its identifier
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "super_admin" => Some(Role::SuperAdmin),
            "moderate_admin" => Some(Role::ModerateAdmin),
            "ceo" => Some(Role::Ceo),
            "regional_admin" => Some(Role::RegionalAdmin),
            "agent" => Some(Role::Agent),
            _ => None,
        }
    }

    /// Get all roles
    pub fn all() -> &'static [Role] {
        &[
            Role::SuperAdmin,
            Role::ModerateAdmin,
            Role::Ceo,
            Role::RegionalAdmin,
            Role::Agent,
        ]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain noun over which actions are gated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Users,
    Borrowers,
    Loans,
    Payments,
    Regions,
    Analytics,
    System,
}

impl Resource {
    /// Get the resource name as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Borrowers => "borrowers",
            Resource::Loans => "loans",
            Resource::Payments => "payments",
            Resource::Regions => "regions",
            Resource::Analytics => "analytics",
            Resource::System => "system",
        }
    }

    /// Try to parse a resource from a string
    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "users" => Some(Resource::Users),
            "borrowers" => Some(Resource::Borrowers),
            "loans" => Some(Resource::Loans),
            "payments" => Some(Resource::Payments),
            "regions" => Some(Resource::Regions),
            "analytics" => Some(Resource::Analytics),
            "system" => Some(Resource::System),
            _ => None,
        }
    }

    /// Get all resources
    pub fn all() -> &'static [Resource] {
        &[
            Resource::Users,
            Resource::Borrowers,
            Resource::Loans,
            Resource::Payments,
            Resource::Regions,
            Resource::Analytics,
            Resource::System,
        ]
    }

    /// Resolve one of this resource's actions by name
    ///
    /// Returns `None` when the resource does not declare the action.
    pub fn parse_action(&self, action: &str) -> Option<Permission> {
        match self {
            Resource::Users => UserAction::try_parse(action).map(Permission::Users),
            Resource::Borrowers => BorrowerAction::try_parse(action).map(Permission::Borrowers),
            Resource::Loans => LoanAction::try_parse(action).map(Permission::Loans),
            Resource::Payments => PaymentAction::try_parse(action).map(Permission::Payments),
            Resource::Regions => RegionAction::try_parse(action).map(Permission::Regions),
            Resource::Analytics => AnalyticsAction::try_parse(action).map(Permission::Analytics),
            Resource::System => SystemAction::try_parse(action).map(Permission::System),
        }
    }

    /// Every permission this resource declares, in declaration order
    pub fn permissions(&self) -> Vec<Permission> {
        match self {
            Resource::Users => UserAction::ALL.iter().copied().map(Permission::Users).collect(),
            Resource::Borrowers => BorrowerAction::ALL
                .iter()
                .copied()
                .map(Permission::Borrowers)
                .collect(),
            Resource::Loans => LoanAction::ALL.iter().copied().map(Permission::Loans).collect(),
            Resource::Payments => PaymentAction::ALL
                .iter()
                .copied()
                .map(Permission::Payments)
                .collect(),
            Resource::Regions => RegionAction::ALL
                .iter()
                .copied()
                .map(Permission::Regions)
                .collect(),
            Resource::Analytics => AnalyticsAction::ALL
                .iter()
                .copied()
                .map(Permission::Analytics)
                .collect(),
            Resource::System => SystemAction::ALL
                .iter()
                .copied()
                .map(Permission::System)
                .collect(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single (resource, action) cell of the permission matrix
///
/// Only pairs a resource actually declares can be expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    Users(UserAction),
    Borrowers(BorrowerAction),
    Loans(LoanAction),
    Payments(PaymentAction),
    Regions(RegionAction),
    Analytics(AnalyticsAction),
    System(SystemAction),
}

impl Permission {
    /// Resource this permission belongs to
    pub const fn resource(&self) -> Resource {
        match self {
            Permission::Users(_) => Resource::Users,
            Permission::Borrowers(_) => Resource::Borrowers,
            Permission::Loans(_) => Resource::Loans,
            Permission::Payments(_) => Resource::Payments,
            Permission::Regions(_) => Resource::Regions,
            Permission::Analytics(_) => Resource::Analytics,
            Permission::System(_) => Resource::System,
        }
    }

    /// Action name within the resource
    pub const fn action(&self) -> &'static str {
        match self {
            Permission::Users(a) => a.as_str(),
            Permission::Borrowers(a) => a.as_str(),
            Permission::Loans(a) => a.as_str(),
            Permission::Payments(a) => a.as_str(),
            Permission::Regions(a) => a.as_str(),
            Permission::Analytics(a) => a.as_str(),
            Permission::System(a) => a.as_str(),
        }
    }

    /// Resolve a free-form (resource, action) pair
    pub fn parse(resource: &str, action: &str) -> Option<Self> {
        Resource::try_parse(resource)?.parse_action(action)
    }

    /// Every cell of a permission grid, grouped by resource
    pub fn all() -> Vec<Permission> {
        Resource::all()
            .iter()
            .flat_map(|resource| resource.permissions())
            .collect()
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.resource(), self.action())
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
