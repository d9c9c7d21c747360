//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (LOAN_RBAC__*)
//! 2. Configuration file (TOML)
//! 3. Default values
//!
//! The permission matrix lives in its own TOML file, read with `toml`
//! directly so that camelCase action names keep their case.

use crate::access_control::{PermissionMatrix, RawMatrix};
use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use tracing::{debug, info};

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "loan-rbac.toml",
    ".loan-rbac.toml",
    "~/.config/loan-rbac/config.toml",
    "/etc/loan-rbac/config.toml",
];

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                debug!(path = %expanded, "Using configuration file");
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // e.g., LOAN_RBAC__LOGGING__LEVEL, LOAN_RBAC__PERMISSIONS__MATRIX_FILE
    builder = builder.add_source(
        Environment::with_prefix("LOAN_RBAC")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Check that `level` names one of the supported log levels
pub fn validate_log_level(level: &str) -> Result<(), ConfigError> {
    if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
        return Err(ConfigError::Invalid {
            message: format!(
                "logging.level must be one of {}, got: {}",
                LOG_LEVELS.join(", "),
                level
            ),
        });
    }
    Ok(())
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    validate_log_level(&config.logging.level)?;

    if let Some(path) = &config.permissions.matrix_file
        && path.trim().is_empty()
    {
        return Err(ConfigError::Missing {
            field: "permissions.matrix_file".to_string(),
        });
    }

    Ok(())
}

/// Parse and validate a permission matrix from TOML
///
/// The document has one table per role and resource:
///
/// ```toml
/// [agent.payments]
/// uploadReceipt = true
/// approve = false
/// # ...every other payments action
/// ```
pub fn load_matrix_from_str(toml_str: &str) -> Result<PermissionMatrix, ConfigError> {
    let raw: RawMatrix =
        toml::from_str(toml_str).map_err(|e| ConfigError::Load(e.to_string()))?;
    PermissionMatrix::from_raw(&raw)
}

/// Resolve the permission matrix named by the configuration
///
/// Falls back to the built-in matrix when no file is configured. A
/// configured file that is unreadable or incomplete is an error.
pub fn load_matrix(config: &AppConfig) -> Result<PermissionMatrix, ConfigError> {
    let Some(path) = &config.permissions.matrix_file else {
        info!("Using built-in permission matrix");
        return Ok(PermissionMatrix::builtin().clone());
    };

    let expanded = shellexpand::tilde(path);
    let contents = std::fs::read_to_string(&*expanded).map_err(|e| {
        ConfigError::Load(format!("Failed to read permission matrix {}: {}", expanded, e))
    })?;

    let matrix = load_matrix_from_str(&contents)?;
    info!(path = %expanded, "Loaded permission matrix");
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    #[test]
    fn test_load_config_from_str_basic() {
        let toml = r#"
[logging]
level = "debug"
format = "json"
"#;

        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.permissions.matrix_file.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_log_level() {
        let toml = r#"
[logging]
level = "loud"
"#;

        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("debug").is_ok());
        assert!(validate_log_level("WARN").is_ok());
        assert!(matches!(
            validate_log_level("loud"),
            Err(ConfigError::Invalid { message }) if message.contains("loud")
        ));
        assert!(validate_log_level("").is_err());
    }

    #[test]
    fn test_blank_matrix_file() {
        let toml = r#"
[permissions]
matrix_file = "  "
"#;

        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_load_matrix_defaults_to_builtin() {
        let matrix = load_matrix(&AppConfig::default()).unwrap();
        assert_eq!(&matrix, PermissionMatrix::builtin());
    }

    #[test]
    fn test_load_matrix_from_str_rejects_malformed_toml() {
        let result = load_matrix_from_str("[agent.payments\napprove = true");
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_load_matrix_from_str_rejects_non_bool() {
        let result = load_matrix_from_str("[agent.payments]\napprove = \"yes\"\n");
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
