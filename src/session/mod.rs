//! Session module
//!
//! The identity boundary. An external authentication collaborator builds an
//! [`Identity`] and hands it to a [`SessionStore`]; the permission evaluator
//! only ever reads the role through [`IdentitySource`].

pub mod identity;
pub mod store;

pub use identity::Identity;
pub use store::{IdentitySource, SessionStore};
