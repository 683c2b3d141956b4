//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::ServiceKind;

/// Composite-entity storefront services
#[derive(Parser, Debug)]
#[command(name = "storefront-rs")]
#[command(about = "Composite-entity storefront services")]
#[command(long_about = "
storefront-rs serves one of the storefront's composite-entity services
(user, product, favourite, shipping, order or payment). Each service owns
its local records and joins them with user, product and order data
fetched from peer services.

EXAMPLES:
    # Start the favourite service with default configuration
    storefront-rs serve

    # Serve shipping lines on a custom port
    storefront-rs serve --service shipping --port 8600

    # Use custom configuration file
    storefront-rs --config /path/to/config.toml serve

    # Run in production mode with verbose logging
    storefront-rs --env production --verbose serve

    # Check configuration without starting server
    storefront-rs serve --dry-run

    # Run database migrations
    storefront-rs migrate

    # Preview pending migrations
    storefront-rs migrate --dry-run

    # Rollback last 2 migrations
    storefront-rs migrate --rollback 2
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load a single TOML file instead of the layered `config/` directory.
    /// The file must exist and be readable.
    ///
    /// Example: --config /etc/storefront/favourite.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects which `{environment}.toml` layer is loaded.
    ///
    /// Available values: development (dev), test, staging (stage), production (prod)
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging
    ///
    /// Raises log output to debug level. Cannot be used with --quiet.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    ///
    /// Lowers log output to error level. Cannot be used with --verbose.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Mounts the routes of the selected service, connects the configured
    /// store and begins accepting requests.
    ///
    /// Examples:
    ///   storefront-rs serve                           # Start with defaults
    ///   storefront-rs serve --service payment         # Serve payments
    ///   storefront-rs serve --host 0.0.0.0 --port 80  # Bind to all interfaces on port 80
    ///   storefront-rs serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Use 127.0.0.1 for localhost only, or 0.0.0.0 to accept connections
        /// from any interface.
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        ///
        /// Must be between 1 and 65535.
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Service to serve
        ///
        /// Available services: user, product, favourite, shipping, order, payment
        #[arg(short, long, value_name = "SERVICE", value_parser = super::validation::validate_service)]
        service: Option<ServiceKind>,

        /// Log level override
        ///
        /// Overrides both the configuration file and the global --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration and exit
        ///
        /// Returns exit code 0 if the configuration is valid, non-zero otherwise.
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Applies or rolls back the embedded schema migrations. Requires the
    /// postgres store backend.
    ///
    /// Examples:
    ///   storefront-rs migrate                    # Apply all pending migrations
    ///   storefront-rs migrate --dry-run          # Show pending migrations without applying
    ///   storefront-rs migrate --rollback 3       # Rollback the last 3 migrations
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback
        ///
        /// Must be between 1 and 100. Cannot be used with --dry-run.
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn", alias = "warning")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl Cli {
    /// Check argument combinations clap cannot express
    pub fn validate(&self) -> Result<(), String> {
        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        if let Some(Commands::Migrate {
            dry_run: true,
            rollback: Some(_),
        }) = self.command
        {
            return Err("Cannot use --dry-run and --rollback together".to_string());
        }

        Ok(())
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
        .to_string()
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["storefront-rs", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["storefront-rs", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["storefront-rs"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "storefront-rs",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--service",
            "shipping-service",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Serve {
                host,
                port,
                service,
                dry_run,
                ..
            }) => {
                assert_eq!(host, Some("0.0.0.0".to_string()));
                assert_eq!(port, Some(8080));
                assert_eq!(service, Some(ServiceKind::Shipping));
                assert!(!dry_run);
            }
            other => panic!("Expected Serve command, got: {:?}", other),
        }
    }

    #[test]
    fn test_serve_rejects_unknown_service() {
        let result = Cli::try_parse_from(["storefront-rs", "serve", "--service", "inventory"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_migrate_command() {
        let cli = Cli::try_parse_from(["storefront-rs", "migrate", "--dry-run"]).unwrap();
        match cli.command {
            Some(Commands::Migrate { dry_run, rollback }) => {
                assert!(dry_run);
                assert!(rollback.is_none());
            }
            other => panic!("Expected Migrate command, got: {:?}", other),
        }
    }

    #[test]
    fn test_env_aliases() {
        let cli = Cli::try_parse_from(["storefront-rs", "--env", "stage"]).unwrap();
        assert!(matches!(cli.env, Some(Environment::Staging)));
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["storefront-rs", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_validate_rejects_dry_run_with_rollback() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(5),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };
        assert!(cli.validate().is_err());
    }
}
