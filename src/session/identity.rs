//! Authenticated principal

use crate::access_control::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user as supplied by the authentication collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Assigned region, for regional admins and agents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identity {
    /// Create an active identity stamped with the current time
    pub fn new(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role,
            region: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}
