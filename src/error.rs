//! Error types for loan-rbac
//!
//! This module defines the error hierarchy used throughout the crate.
//! Configuration errors are fatal and surface at startup. Authorization
//! denials are ordinary values (`false` / `AccessDecision::Denied`) and only
//! become `AccessDeniedError` when a caller asks for a `Result` via `require`.

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Access denied: {0}")]
    AccessDenied(#[from] AccessDeniedError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Configuration-related errors
///
/// Every variant describing the permission matrix is a deployment bug, never
/// a runtime access decision.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("Permission matrix is missing role '{role}'")]
    MissingRole { role: String },

    #[error("Permission matrix for role '{role}' is missing resource '{resource}'")]
    MissingResource { role: String, resource: String },

    #[error("Permission matrix for role '{role}' is missing action '{resource}.{action}'")]
    MissingAction {
        role: String,
        resource: String,
        action: String,
    },

    #[error("Permission matrix names unknown role '{role}'")]
    UnknownRole { role: String },

    #[error("Permission matrix for role '{role}' names unknown resource '{resource}'")]
    UnknownResource { role: String, resource: String },

    #[error("Permission matrix for role '{role}' names unknown action '{resource}.{action}'")]
    UnknownAction {
        role: String,
        resource: String,
        action: String,
    },
}

/// Access control errors
#[derive(Error, Debug)]
#[error("Access denied for '{permission}': {reason}")]
pub struct AccessDeniedError {
    pub permission: String,
    pub reason: String,
}

impl AccessDeniedError {
    pub fn new(permission: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            permission: permission.into(),
            reason: reason.into(),
        }
    }

    pub fn unauthenticated(permission: impl Into<String>) -> Self {
        Self::new(permission, "no authenticated identity")
    }

    pub fn not_granted(permission: impl Into<String>, role: impl Into<String>) -> Self {
        Self::new(
            permission,
            format!("role '{}' is not granted this permission", role.into()),
        )
    }
}

/// Session state errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("No authenticated identity")]
    NotAuthenticated,

    #[error("Identity '{id}' is inactive")]
    Inactive { id: String },
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, AppError>;
