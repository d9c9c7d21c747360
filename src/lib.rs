//! Loan RBAC
//!
//! Role-based access control for a loan-management dashboard.
//!
//! ## Features
//!
//! - **Static permission matrix** over five roles and seven resources, each
//!   resource with its own action set
//! - **Fail-closed evaluation**: unknown names and missing identities deny
//! - **Typed permissions**: a tagged union of per-resource action enums
//! - **Per-role navigation**: landing route and ordered sidebar menu
//! - **Observable session store** that re-drives evaluation on identity change
//!
//! ## Example
//!
//! ```
//! use loan_rbac::access_control::{PermissionEvaluator, PermissionMatrix, Role};
//! use loan_rbac::session::{Identity, SessionStore};
//!
//! let session = SessionStore::new();
//! session
//!     .sign_in(Identity::new("u1", "ceo@example.com", "Amara", Role::Ceo))
//!     .unwrap();
//!
//! let evaluator = PermissionEvaluator::new(PermissionMatrix::builtin(), &session);
//! assert!(evaluator.has_permission("borrowers", "read"));
//! assert!(!evaluator.has_permission("borrowers", "update"));
//!
//! session.sign_out();
//! assert!(!evaluator.has_permission("borrowers", "read"));
//! ```
//!
//! ## Example Configuration
//!
//! ```toml
//! [logging]
//! level = "info"
//! format = "pretty"
//!
//! [permissions]
//! matrix_file = "~/.config/loan-rbac/matrix.toml"   # omit for the built-in matrix
//! ```

pub mod access_control;
pub mod config;
pub mod error;
pub mod navigation;
pub mod session;

// Re-export main types
pub use access_control::{Permission, PermissionEvaluator, PermissionMatrix, Resource, Role};
pub use config::{AppConfig, load_config, load_matrix};
pub use error::{AppError, Result};
pub use navigation::{NavigationItem, default_route_for, menu_for};
pub use session::{Identity, IdentitySource, SessionStore};
