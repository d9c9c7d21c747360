//! Sidebar menus per role
//!
//! A menu entry only makes a page reachable. Whether the page may perform a
//! mutation is still decided by the permission evaluator.

use crate::access_control::Role;
use serde::Serialize;
use std::fmt;

/// Icon identifier understood by the dashboard's icon set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    LayoutDashboard,
    Users,
    UserCheck,
    UserPlus,
    FileText,
    CreditCard,
    Upload,
    AlertTriangle,
    MapPin,
    BarChart,
    TrendingUp,
    Shield,
    Settings,
}

impl Icon {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Icon::LayoutDashboard => "layout-dashboard",
            Icon::Users => "users",
            Icon::UserCheck => "user-check",
            Icon::UserPlus => "user-plus",
            Icon::FileText => "file-text",
            Icon::CreditCard => "credit-card",
            Icon::Upload => "upload",
            Icon::AlertTriangle => "alert-triangle",
            Icon::MapPin => "map-pin",
            Icon::BarChart => "bar-chart",
            Icon::TrendingUp => "trending-up",
            Icon::Shield => "shield",
            Icon::Settings => "settings",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    pub title: &'static str,
    pub href: &'static str,
    pub icon: Icon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

const fn item(
    title: &'static str,
    href: &'static str,
    icon: Icon,
    description: &'static str,
) -> NavigationItem {
    NavigationItem {
        title,
        href,
        icon,
        description: Some(description),
    }
}

static SUPER_ADMIN_MENU: &[NavigationItem] = &[
    item(
        "Dashboard",
        "/dashboard/super-admin",
        Icon::LayoutDashboard,
        "System-wide overview",
    ),
    item(
        "User Management",
        "/dashboard/super-admin/users",
        Icon::Users,
        "Create accounts and assign roles",
    ),
    item(
        "Regions",
        "/dashboard/super-admin/regions",
        Icon::MapPin,
        "Regions and agent assignment",
    ),
    item(
        "Borrowers",
        "/dashboard/super-admin/borrowers",
        Icon::UserCheck,
        "All borrower records",
    ),
    item(
        "Loans",
        "/dashboard/super-admin/loans",
        Icon::FileText,
        "Applications and approvals",
    ),
    item(
        "Payments",
        "/dashboard/super-admin/payments",
        Icon::CreditCard,
        "Repayments and receipts",
    ),
    item(
        "Analytics",
        "/dashboard/super-admin/analytics",
        Icon::BarChart,
        "Portfolio performance",
    ),
    item(
        "System Logs",
        "/dashboard/super-admin/logs",
        Icon::Shield,
        "Audit trail",
    ),
    item(
        "Settings",
        "/dashboard/super-admin/settings",
        Icon::Settings,
        "Platform configuration",
    ),
];

static MODERATE_ADMIN_MENU: &[NavigationItem] = &[
    item(
        "Dashboard",
        "/dashboard/moderate-admin",
        Icon::LayoutDashboard,
        "Operations overview",
    ),
    item(
        "Users",
        "/dashboard/moderate-admin/users",
        Icon::Users,
        "Staff accounts",
    ),
    item(
        "Borrowers",
        "/dashboard/moderate-admin/borrowers",
        Icon::UserCheck,
        "Borrower records and verification",
    ),
    item(
        "Loan Approvals",
        "/dashboard/moderate-admin/loans",
        Icon::FileText,
        "Pending applications",
    ),
    item(
        "Payments",
        "/dashboard/moderate-admin/payments",
        Icon::CreditCard,
        "Receipts awaiting approval",
    ),
    item(
        "Reports",
        "/dashboard/moderate-admin/reports",
        Icon::BarChart,
        "Exportable reports",
    ),
];

static CEO_MENU: &[NavigationItem] = &[
    item(
        "Dashboard",
        "/dashboard/ceo",
        Icon::LayoutDashboard,
        "Executive summary",
    ),
    item(
        "Analytics",
        "/dashboard/ceo/analytics",
        Icon::TrendingUp,
        "Growth and performance",
    ),
    item(
        "Regional Performance",
        "/dashboard/ceo/regions",
        Icon::MapPin,
        "Compare regions",
    ),
    item(
        "Loan Portfolio",
        "/dashboard/ceo/loans",
        Icon::FileText,
        "Portfolio health",
    ),
    item(
        "Reports",
        "/dashboard/ceo/reports",
        Icon::BarChart,
        "Board reports",
    ),
];

static REGIONAL_ADMIN_MENU: &[NavigationItem] = &[
    item(
        "Dashboard",
        "/dashboard/regional-admin",
        Icon::LayoutDashboard,
        "Regional overview",
    ),
    item(
        "Agents",
        "/dashboard/regional-admin/agents",
        Icon::Users,
        "Agents in this region",
    ),
    item(
        "Borrowers",
        "/dashboard/regional-admin/borrowers",
        Icon::UserCheck,
        "Regional borrowers",
    ),
    item(
        "Loan Approvals",
        "/dashboard/regional-admin/loans",
        Icon::FileText,
        "Applications awaiting review",
    ),
    item(
        "Payments",
        "/dashboard/regional-admin/payments",
        Icon::CreditCard,
        "Collections and schedules",
    ),
    item(
        "Overdue",
        "/dashboard/regional-admin/overdue",
        Icon::AlertTriangle,
        "Late repayments",
    ),
    item(
        "Analytics",
        "/dashboard/regional-admin/analytics",
        Icon::BarChart,
        "Regional performance",
    ),
];

static AGENT_MENU: &[NavigationItem] = &[
    item(
        "Dashboard",
        "/dashboard/agent",
        Icon::LayoutDashboard,
        "Today's work",
    ),
    item(
        "My Borrowers",
        "/dashboard/agent/borrowers",
        Icon::UserCheck,
        "Borrowers you manage",
    ),
    item(
        "Add Borrower",
        "/dashboard/agent/borrowers/new",
        Icon::UserPlus,
        "Onboard a new borrower",
    ),
    item(
        "Loan Applications",
        "/dashboard/agent/loans",
        Icon::FileText,
        "Applications you submitted",
    ),
    item(
        "Payments",
        "/dashboard/agent/payments",
        Icon::CreditCard,
        "Record repayments",
    ),
    item(
        "Upload Receipt",
        "/dashboard/agent/payments/upload",
        Icon::Upload,
        "Attach payment receipts",
    ),
];

/// Ordered sidebar menu for a role
pub fn menu_for(role: Role) -> &'static [NavigationItem] {
    match role {
        Role::SuperAdmin => SUPER_ADMIN_MENU,
        Role::ModerateAdmin => MODERATE_ADMIN_MENU,
        Role::Ceo => CEO_MENU,
        Role::RegionalAdmin => REGIONAL_ADMIN_MENU,
        Role::Agent => AGENT_MENU,
    }
}
