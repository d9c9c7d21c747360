//! Permission matrix
//!
//! The ground truth for what each role can do. A [`PermissionMatrix`] holds
//! one [`PermissionGrid`] per role, and every grid holds one flag per
//! (resource, action) cell. Both are plain structs, so the built-in matrix
//! below is checked for totality by the compiler. Matrices loaded from
//! configuration go through [`PermissionMatrix::from_raw`], which rejects
//! missing and unknown names instead of defaulting them.

use crate::access_control::resources::{
    AnalyticsPermissions, BorrowerPermissions, LoanPermissions, PaymentPermissions,
    RegionPermissions, SystemPermissions, UserPermissions,
};
use crate::access_control::types::{Permission, Resource, Role};
use crate::error::ConfigError;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Untyped matrix as read from a configuration file:
/// role → resource → action → allowed
pub type RawMatrix = BTreeMap<String, BTreeMap<String, BTreeMap<String, bool>>>;

/// Capability grid for a single role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PermissionGrid {
    pub users: UserPermissions,
    pub borrowers: BorrowerPermissions,
    pub loans: LoanPermissions,
    pub payments: PaymentPermissions,
    pub regions: RegionPermissions,
    pub analytics: AnalyticsPermissions,
    pub system: SystemPermissions,
}

impl PermissionGrid {
    /// Grid with every cell set to `value`
    pub const fn uniform(value: bool) -> Self {
        Self {
            users: UserPermissions::uniform(value),
            borrowers: BorrowerPermissions::uniform(value),
            loans: LoanPermissions::uniform(value),
            payments: PaymentPermissions::uniform(value),
            regions: RegionPermissions::uniform(value),
            analytics: AnalyticsPermissions::uniform(value),
            system: SystemPermissions::uniform(value),
        }
    }

    pub const fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::Users(a) => self.users.allows(a),
            Permission::Borrowers(a) => self.borrowers.allows(a),
            Permission::Loans(a) => self.loans.allows(a),
            Permission::Payments(a) => self.payments.allows(a),
            Permission::Regions(a) => self.regions.allows(a),
            Permission::Analytics(a) => self.analytics.allows(a),
            Permission::System(a) => self.system.allows(a),
        }
    }

    pub fn set(&mut self, permission: Permission, value: bool) {
        match permission {
            Permission::Users(a) => self.users.set(a, value),
            Permission::Borrowers(a) => self.borrowers.set(a, value),
            Permission::Loans(a) => self.loans.set(a, value),
            Permission::Payments(a) => self.payments.set(a, value),
            Permission::Regions(a) => self.regions.set(a, value),
            Permission::Analytics(a) => self.analytics.set(a, value),
            Permission::System(a) => self.system.set(a, value),
        }
    }

    /// Permissions this grid grants, in resource/action declaration order
    pub fn granted(&self) -> Vec<Permission> {
        Permission::all()
            .into_iter()
            .filter(|p| self.allows(*p))
            .collect()
    }
}

/// Total mapping from every role to its capability grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionMatrix {
    pub super_admin: PermissionGrid,
    pub moderate_admin: PermissionGrid,
    pub ceo: PermissionGrid,
    pub regional_admin: PermissionGrid,
    pub agent: PermissionGrid,
}

static BUILTIN: PermissionMatrix = PermissionMatrix {
    super_admin: PermissionGrid::uniform(true),

    moderate_admin: PermissionGrid {
        users: UserPermissions {
            create: true,
            read: true,
            update: true,
            delete: false,
        },
        borrowers: BorrowerPermissions {
            create: true,
            read: true,
            update: true,
            delete: false,
            verify: true,
        },
        loans: LoanPermissions {
            create: true,
            read: true,
            update: true,
            approve: true,
            reject: true,
            disburse: true,
        },
        payments: PaymentPermissions {
            create: true,
            read: true,
            update: true,
            approve: true,
            upload_receipt: true,
            view_history: true,
            generate_schedule: true,
            handle_overdue: true,
        },
        regions: RegionPermissions {
            create: false,
            read: true,
            update: true,
            delete: false,
            assign_agents: true,
        },
        analytics: AnalyticsPermissions {
            view_all: true,
            view_regional: true,
            export_reports: true,
        },
        system: SystemPermissions {
            view_logs: true,
            manage_settings: false,
            override_actions: false,
        },
    },

    ceo: PermissionGrid {
        users: UserPermissions {
            create: false,
            read: true,
            update: false,
            delete: false,
        },
        borrowers: BorrowerPermissions {
            create: false,
            read: true,
            update: false,
            delete: false,
            verify: false,
        },
        loans: LoanPermissions {
            create: false,
            read: true,
            update: false,
            approve: true,
            reject: true,
            disburse: false,
        },
        payments: PaymentPermissions {
            create: false,
            read: true,
            update: false,
            approve: false,
            upload_receipt: false,
            view_history: true,
            generate_schedule: false,
            handle_overdue: false,
        },
        regions: RegionPermissions {
            create: false,
            read: true,
            update: false,
            delete: false,
            assign_agents: false,
        },
        analytics: AnalyticsPermissions {
            view_all: true,
            view_regional: true,
            export_reports: true,
        },
        system: SystemPermissions {
            view_logs: false,
            manage_settings: false,
            override_actions: false,
        },
    },

    regional_admin: PermissionGrid {
        users: UserPermissions {
            create: false,
            read: true,
            update: false,
            delete: false,
        },
        borrowers: BorrowerPermissions {
            create: true,
            read: true,
            update: true,
            delete: false,
            verify: true,
        },
        loans: LoanPermissions {
            create: true,
            read: true,
            update: true,
            approve: true,
            reject: true,
            disburse: false,
        },
        payments: PaymentPermissions {
            create: true,
            read: true,
            update: true,
            approve: true,
            upload_receipt: true,
            view_history: true,
            generate_schedule: true,
            handle_overdue: true,
        },
        regions: RegionPermissions {
            create: false,
            read: true,
            update: false,
            delete: false,
            assign_agents: true,
        },
        analytics: AnalyticsPermissions {
            view_all: false,
            view_regional: true,
            export_reports: true,
        },
        system: SystemPermissions {
            view_logs: false,
            manage_settings: false,
            override_actions: false,
        },
    },

    agent: PermissionGrid {
        users: UserPermissions::uniform(false),
        borrowers: BorrowerPermissions {
            create: true,
            read: true,
            update: true,
            delete: false,
            verify: false,
        },
        loans: LoanPermissions {
            create: true,
            read: true,
            update: false,
            approve: false,
            reject: false,
            disburse: false,
        },
        payments: PaymentPermissions {
            create: true,
            read: true,
            update: false,
            approve: false,
            upload_receipt: true,
            view_history: true,
            generate_schedule: false,
            handle_overdue: false,
        },
        regions: RegionPermissions::uniform(false),
        analytics: AnalyticsPermissions::uniform(false),
        system: SystemPermissions::uniform(false),
    },
};

impl PermissionMatrix {
    /// The compiled-in matrix
    pub fn builtin() -> &'static PermissionMatrix {
        &BUILTIN
    }

    /// Matrix in which every role has the same grid (for testing)
    pub const fn uniform(value: bool) -> Self {
        Self {
            super_admin: PermissionGrid::uniform(value),
            moderate_admin: PermissionGrid::uniform(value),
            ceo: PermissionGrid::uniform(value),
            regional_admin: PermissionGrid::uniform(value),
            agent: PermissionGrid::uniform(value),
        }
    }

    pub const fn grid(&self, role: Role) -> &PermissionGrid {
        match role {
            Role::SuperAdmin => &self.super_admin,
            Role::ModerateAdmin => &self.moderate_admin,
            Role::Ceo => &self.ceo,
            Role::RegionalAdmin => &self.regional_admin,
            Role::Agent => &self.agent,
        }
    }

    fn grid_mut(&mut self, role: Role) -> &mut PermissionGrid {
        match role {
            Role::SuperAdmin => &mut self.super_admin,
            Role::ModerateAdmin => &mut self.moderate_admin,
            Role::Ceo => &mut self.ceo,
            Role::RegionalAdmin => &mut self.regional_admin,
            Role::Agent => &mut self.agent,
        }
    }

    /// Roles granted `permission`, in role declaration order
    pub fn roles_with(&self, permission: Permission) -> Vec<Role> {
        Role::all()
            .iter()
            .copied()
            .filter(|role| self.grid(*role).allows(permission))
            .collect()
    }

    /// Build a matrix from untyped configuration
    ///
    /// Every role, every resource per role, and every action per resource
    /// must be present. Unknown names are rejected too, so a misspelt action
    /// is reported rather than silently ignored.
    pub fn from_raw(raw: &RawMatrix) -> Result<Self, ConfigError> {
        let mut matrix = Self::uniform(false);

        for (role_name, resources) in raw {
            let role = Role::try_parse(role_name).ok_or_else(|| ConfigError::UnknownRole {
                role: role_name.clone(),
            })?;

            for (resource_name, actions) in resources {
                let resource = Resource::try_parse(resource_name).ok_or_else(|| {
                    ConfigError::UnknownResource {
                        role: role_name.clone(),
                        resource: resource_name.clone(),
                    }
                })?;

                for (action_name, allowed) in actions {
                    let permission = resource.parse_action(action_name).ok_or_else(|| {
                        ConfigError::UnknownAction {
                            role: role_name.clone(),
                            resource: resource_name.clone(),
                            action: action_name.clone(),
                        }
                    })?;
                    matrix.grid_mut(role).set(permission, *allowed);
                }
            }
        }

        for role in Role::all() {
            let resources = raw
                .get(role.as_str())
                .ok_or_else(|| ConfigError::MissingRole {
                    role: role.to_string(),
                })?;

            for resource in Resource::all() {
                let actions =
                    resources
                        .get(resource.as_str())
                        .ok_or_else(|| ConfigError::MissingResource {
                            role: role.to_string(),
                            resource: resource.to_string(),
                        })?;

                for permission in resource.permissions() {
                    if !actions.contains_key(permission.action()) {
                        return Err(ConfigError::MissingAction {
                            role: role.to_string(),
                            resource: resource.to_string(),
                            action: permission.action().to_string(),
                        });
                    }
                }
            }
        }

        debug!(roles = raw.len(), "Validated permission matrix");
        Ok(matrix)
    }

    /// Convert back to the untyped form accepted by [`from_raw`](Self::from_raw)
    pub fn to_raw(&self) -> RawMatrix {
        Role::all()
            .iter()
            .map(|role| {
                let grid = self.grid(*role);
                let resources = Resource::all()
                    .iter()
                    .map(|resource| {
                        let actions = resource
                            .permissions()
                            .into_iter()
                            .map(|p| (p.action().to_string(), grid.allows(p)))
                            .collect();
                        (resource.to_string(), actions)
                    })
                    .collect();
                (role.to_string(), resources)
            })
            .collect()
    }
}
