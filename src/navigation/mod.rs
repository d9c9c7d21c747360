//! Navigation module
//!
//! Static per-role navigation: the landing route after sign-in and the
//! ordered sidebar menu. Both are independent of the permission matrix.

pub mod menus;
pub mod routes;

pub use menus::{Icon, NavigationItem, menu_for};
pub use routes::{
    DASHBOARD_PREFIX, LOGIN_ROUTE, default_route_for, landing_route, redirect_for,
};
