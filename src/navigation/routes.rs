//! Dashboard routing per role

use crate::access_control::Role;
use tracing::trace;

/// Route for signing in
pub const LOGIN_ROUTE: &str = "/login";

/// Prefix shared by every role's dashboard
pub const DASHBOARD_PREFIX: &str = "/dashboard";

/// Landing route after sign-in
pub const fn default_route_for(role: Role) -> &'static str {
    match role {
        Role::SuperAdmin => "/dashboard/super-admin",
        Role::ModerateAdmin => "/dashboard/moderate-admin",
        Role::Ceo => "/dashboard/ceo",
        Role::RegionalAdmin => "/dashboard/regional-admin",
        Role::Agent => "/dashboard/agent",
    }
}

/// Landing route for an optional identity
pub const fn landing_route(role: Option<Role>) -> &'static str {
    match role {
        Some(role) => default_route_for(role),
        None => LOGIN_ROUTE,
    }
}

fn is_within(path: &str, root: &str) -> bool {
    path.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Where to send a visitor who requests `path`, if anywhere else
///
/// - No identity: everything except the login page redirects to login
/// - Signed in: the login page, `/`, and other roles' dashboards redirect to
///   the role's own dashboard
pub fn redirect_for(role: Option<Role>, path: &str) -> Option<&'static str> {
    let target = match role {
        None if path == LOGIN_ROUTE => None,
        None => Some(LOGIN_ROUTE),
        Some(role) => {
            let home = default_route_for(role);
            if path == LOGIN_ROUTE || path == "/" {
                Some(home)
            } else if is_within(path, DASHBOARD_PREFIX) && !is_within(path, home) {
                Some(home)
            } else {
                None
            }
        }
    };

    if let Some(target) = target {
        trace!(role = ?role, path, target, "Redirecting");
    }
    target
}
