//! Session store
//!
//! Holds the current identity and notifies subscribers whenever it changes.
//! The store is constructed explicitly and passed by reference to whoever
//! needs it; there is no process-wide session.

use crate::access_control::Role;
use crate::error::SessionError;
use crate::session::identity::Identity;
use chrono::Utc;
use tokio::sync::watch;
use tracing::{debug, info};

/// Source of the role to evaluate permissions against
pub trait IdentitySource {
    /// Role of the current identity, or `None` when unauthenticated
    fn current_role(&self) -> Option<Role>;

    /// Region of the current identity, if it has one
    fn current_region(&self) -> Option<String> {
        None
    }
}

impl IdentitySource for Role {
    fn current_role(&self) -> Option<Role> {
        Some(*self)
    }
}

impl IdentitySource for Option<Role> {
    fn current_role(&self) -> Option<Role> {
        *self
    }
}

/// Observable holder of the signed-in identity
///
/// Every sign-in, sign-out and role change is published to receivers
/// obtained from [`subscribe`](Self::subscribe).
#[derive(Debug)]
pub struct SessionStore {
    sender: watch::Sender<Option<Identity>>,
}

impl SessionStore {
    /// Create an empty (unauthenticated) store
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        Self { sender }
    }

    /// Create a store already signed in as `identity`
    pub fn with_identity(identity: Identity) -> Result<Self, SessionError> {
        let store = Self::new();
        store.sign_in(identity)?;
        Ok(store)
    }

    /// Replace the current identity
    pub fn sign_in(&self, identity: Identity) -> Result<(), SessionError> {
        if !identity.is_active {
            return Err(SessionError::Inactive { id: identity.id });
        }

        info!(
            id = %identity.id,
            role = %identity.role,
            region = ?identity.region,
            "Signed in"
        );
        self.sender.send_replace(Some(identity));
        Ok(())
    }

    /// Clear the current identity, returning it
    pub fn sign_out(&self) -> Option<Identity> {
        let previous = self.sender.send_replace(None);
        match &previous {
            Some(identity) => info!(id = %identity.id, "Signed out"),
            None => debug!("Sign-out with no identity"),
        }
        previous
    }

    /// Change the role of the current identity
    ///
    /// Subscribers are only notified when the role actually changes.
    pub fn change_role(&self, role: Role) -> Result<(), SessionError> {
        let mut result = Err(SessionError::NotAuthenticated);

        self.sender.send_if_modified(|current| {
            let Some(identity) = current.as_mut() else {
                return false;
            };
            result = Ok(());
            if identity.role == role {
                return false;
            }

            info!(id = %identity.id, from = %identity.role, to = %role, "Role changed");
            identity.role = role;
            identity.updated_at = Utc::now();
            true
        });

        result
    }

    /// Snapshot of the current identity
    pub fn current(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_role().is_some()
    }

    /// Receive every subsequent identity change
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentitySource for SessionStore {
    fn current_role(&self) -> Option<Role> {
        self.sender
            .borrow()
            .as_ref()
            .filter(|identity| identity.is_active)
            .map(|identity| identity.role)
    }

    fn current_region(&self) -> Option<String> {
        self.sender
            .borrow()
            .as_ref()
            .filter(|identity| identity.is_active)
            .and_then(|identity| identity.region.clone())
    }
}
