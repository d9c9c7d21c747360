//! Per-resource action sets
//!
//! Each resource declares its own closed set of actions. An action enum and
//! the matching capability-flag struct are generated together so that the
//! two can never drift apart: every enum variant has exactly one `bool` field
//! in the grid, and struct literals must name every field.

use serde::Serialize;
use std::fmt;

macro_rules! resource_actions {
    (
        $(#[$action_meta:meta])*
        enum $action:ident;
        $(#[$grid_meta:meta])*
        struct $grid:ident {
            $( $variant:ident => $field:ident = $name:literal ),+ $(,)?
        }
    ) => {
        $(#[$action_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum $action {
            $( $variant, )+
        }

        impl $action {
            /// Every action of this resource, in declaration order
            pub const ALL: &'static [$action] = &[ $( $action::$variant, )+ ];

            /// Get the action name as used in configuration and lookups
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $action::$variant => $name, )+
                }
            }

            /// Try to parse an action from its exact name
            pub fn try_parse(s: &str) -> Option<Self> {
                match s {
                    $( $name => Some($action::$variant), )+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $action {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        $(#[$grid_meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        pub struct $grid {
            $(
                #[serde(rename = $name)]
                pub $field: bool,
            )+
        }

        impl $grid {
            /// Grid with every action set to `value`
            pub const fn uniform(value: bool) -> Self {
                Self { $( $field: value, )+ }
            }

            pub const fn allows(&self, action: $action) -> bool {
                match action {
                    $( $action::$variant => self.$field, )+
                }
            }

            pub fn set(&mut self, action: $action, value: bool) {
                match action {
                    $( $action::$variant => self.$field = value, )+
                }
            }
        }
    };
}

resource_actions! {
    /// Actions on user accounts
    enum UserAction;
    /// Capability flags for `users`
    struct UserPermissions {
        Create => create = "create",
        Read => read = "read",
        Update => update = "update",
        Delete => delete = "delete",
    }
}

resource_actions! {
    /// Actions on borrower records
    enum BorrowerAction;
    /// Capability flags for `borrowers`
    struct BorrowerPermissions {
        Create => create = "create",
        Read => read = "read",
        Update => update = "update",
        Delete => delete = "delete",
        Verify => verify = "verify",
    }
}

resource_actions! {
    /// Actions on loan applications
    enum LoanAction;
    /// Capability flags for `loans`
    struct LoanPermissions {
        Create => create = "create",
        Read => read = "read",
        Update => update = "update",
        Approve => approve = "approve",
        Reject => reject = "reject",
        Disburse => disburse = "disburse",
    }
}

resource_actions! {
    /// Actions on repayments
    enum PaymentAction;
    /// Capability flags for `payments`
    struct PaymentPermissions {
        Create => create = "create",
        Read => read = "read",
        Update => update = "update",
        Approve => approve = "approve",
        UploadReceipt => upload_receipt = "uploadReceipt",
        ViewHistory => view_history = "viewHistory",
        GenerateSchedule => generate_schedule = "generateSchedule",
        HandleOverdue => handle_overdue = "handleOverdue",
    }
}

resource_actions! {
    /// Actions on regions
    enum RegionAction;
    /// Capability flags for `regions`
    struct RegionPermissions {
        Create => create = "create",
        Read => read = "read",
        Update => update = "update",
        Delete => delete = "delete",
        AssignAgents => assign_agents = "assignAgents",
    }
}

resource_actions! {
    /// Reporting actions
    enum AnalyticsAction;
    /// Capability flags for `analytics`
    struct AnalyticsPermissions {
        ViewAll => view_all = "viewAll",
        ViewRegional => view_regional = "viewRegional",
        ExportReports => export_reports = "exportReports",
    }
}

resource_actions! {
    /// Platform administration actions
    enum SystemAction;
    /// Capability flags for `system`
    struct SystemPermissions {
        ViewLogs => view_logs = "viewLogs",
        ManageSettings => manage_settings = "manageSettings",
        OverrideActions => override_actions = "overrideActions",
    }
}
