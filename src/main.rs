//! Loan RBAC command-line tool
//!
//! Query the permission matrix, per-role navigation, and validate configuration.

use anyhow::bail;
use clap::{Parser, Subcommand};
use loan_rbac::{
    access_control::{AccessDecision, PermissionMatrix, Role, check_permission_for_role_name},
    config::{AppConfig, LogFormat, load_config, load_matrix, validate_log_level},
    error::ConfigError,
    navigation::{landing_route, menu_for},
};
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Loan RBAC - role-based access control for the loan dashboard
#[derive(Parser, Debug)]
#[command(name = "loan-rbac")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "LOAN_RBAC_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, env = "LOAN_RBAC_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether a role may perform an action on a resource
    Check {
        /// Role identifier; omit to check as an unauthenticated visitor
        #[arg(long)]
        role: Option<String>,
        /// Resource name (e.g. payments)
        resource: String,
        /// Action name (e.g. uploadReceipt)
        action: String,
    },
    /// List the permissions granted to a role
    Grants {
        #[arg(long)]
        role: String,
        /// Print JSON instead of one permission per line
        #[arg(long)]
        json: bool,
    },
    /// Print a role's sidebar menu
    Menu {
        #[arg(long)]
        role: String,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Print the landing route for a role
    Route {
        /// Role identifier; omit for the unauthenticated landing route
        #[arg(long)]
        role: Option<String>,
    },
    /// Load configuration and the permission matrix, then report
    Validate,
}

fn init_logging(config: &AppConfig, level_override: Option<&str>) -> Result<(), ConfigError> {
    if let Some(level) = level_override {
        validate_log_level(level)?;
    }
    let level = level_override.unwrap_or(config.logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
    Ok(())
}

fn parse_role(name: &str) -> anyhow::Result<Role> {
    match Role::try_parse(name) {
        Some(role) => Ok(role),
        None => {
            let known: Vec<&str> = Role::all().iter().map(|r| r.as_str()).collect();
            bail!("unknown role '{}', expected one of: {}", name, known.join(", "))
        }
    }
}

fn run(
    command: Command,
    matrix: &PermissionMatrix,
    out: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    match command {
        Command::Check {
            role,
            resource,
            action,
        } => {
            match check_permission_for_role_name(matrix, role.as_deref(), &resource, &action) {
                AccessDecision::Allowed => {
                    writeln!(out, "allow")?;
                    Ok(ExitCode::SUCCESS)
                }
                AccessDecision::Denied(reason) => {
                    writeln!(out, "deny: {}", reason)?;
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Grants { role, json } => {
            let granted = matrix.grid(parse_role(&role)?).granted();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&granted)?)?;
            } else {
                for permission in granted {
                    writeln!(out, "{}", permission)?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Menu { role, json } => {
            let menu = menu_for(parse_role(&role)?);
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(menu)?)?;
            } else {
                for item in menu {
                    writeln!(out, "{:<22} {:<40} {}", item.title, item.href, item.icon)?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Route { role } => {
            let role = role.as_deref().map(parse_role).transpose()?;
            writeln!(out, "{}", landing_route(role))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate => {
            for role in Role::all() {
                writeln!(
                    out,
                    "{:<16} {:>2} permissions",
                    role.as_str(),
                    matrix.grid(*role).granted().len()
                )?;
            }
            writeln!(out, "ok")?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&config, args.log_level.as_deref())?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting loan-rbac");

    // A broken matrix halts here, before any question is answered
    let matrix = load_matrix(&config)
        .inspect_err(|e| error!(error = %e, "Failed to load permission matrix"))?;

    run(args.command, &matrix, &mut io::stdout().lock())
}
