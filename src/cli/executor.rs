//! Command executor for dispatching CLI commands
//!
//! Runs after configuration is merged and the logger is installed.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::{AppError, AppResult};

/// Rollbacks larger than this get a warning before they run
const LARGE_ROLLBACK: u32 = 50;

/// Execute the parsed command with merged settings
///
/// No subcommand means `serve`.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    validate_command_args(cli)?;

    match &cli.command {
        Some(Commands::Serve { dry_run, .. }) => {
            ServeCommandHandler::new(settings).execute(*dry_run).await
        }
        None => ServeCommandHandler::new(settings).execute(false).await,
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
    }
}

/// Reject invalid argument combinations and warn about risky ones
fn validate_command_args(cli: &Cli) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match &cli.command {
        Some(Commands::Serve {
            host: Some(host),
            port: Some(port),
            ..
        }) if *port < 1024 && host == "0.0.0.0" => {
            tracing::warn!(%host, port, "Binding to a privileged port usually requires root");
        }
        Some(Commands::Migrate {
            rollback: Some(steps),
            ..
        }) if *steps > LARGE_ROLLBACK => {
            tracing::warn!(steps, "Large rollback requested; consider smaller steps");
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["storefront-rs", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, Settings::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_migrate_on_memory_backend_fails() {
        let cli = Cli::try_parse_from(["storefront-rs", "migrate"]).unwrap();
        let result = execute_command(&cli, Settings::default()).await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[test]
    fn test_validate_command_args() {
        let cli = Cli::try_parse_from(["storefront-rs", "serve", "--port", "8080"]).unwrap();
        assert!(validate_command_args(&cli).is_ok());
    }

    #[test]
    fn test_validate_privileged_port_only_warns() {
        let cli = Cli::try_parse_from(["storefront-rs", "serve", "--host", "0.0.0.0", "--port", "80"])
            .unwrap();
        assert!(validate_command_args(&cli).is_ok());
    }

    #[test]
    fn test_validate_conflicting_args() {
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

        match validate_command_args(&cli) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cli_arguments"),
            other => panic!("Expected validation error, got: {:?}", other),
        }
    }
}
