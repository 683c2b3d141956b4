//! Configuration merger for CLI arguments and config files
//!
//! CLI flags have the highest priority. They are applied on top of the
//! layered file and environment-variable configuration, and the result
//! is validated once more.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides to file-based settings
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Load base settings the way the CLI asks for them
    ///
    /// `--config` selects a single file and `--env` picks the environment
    /// layer; without either the loader reads the process environment.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;

        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }
        if let Some(ref path) = cli.config {
            loader = loader.with_file(path);
        }

        Ok(Self::new(loader.load()?))
    }

    /// Return a copy of the base settings with CLI overrides applied
    ///
    /// A command-level `--log-level` wins over global `--verbose`/`--quiet`.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            service,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(service) = service {
                config.service.name = *service;
            }
            if let Some(level) = log_level {
                config.logger.level = (*level).into();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceKind;
    use clap::Parser;

    fn merge(args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default())
            .merge_cli_args(&cli)
            .unwrap()
    }

    #[test]
    fn test_configuration_merger_new() {
        let base_config = Settings::default();
        let merger = ConfigurationMerger::new(base_config.clone());
        assert_eq!(merger.config(), &base_config);
    }

    #[test]
    fn test_no_flags_keep_base_settings() {
        assert_eq!(merge(&["storefront-rs"]), Settings::default());
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["storefront-rs", "--verbose"]).logger.level, "debug");
        assert_eq!(merge(&["storefront-rs", "--quiet"]).logger.level, "error");
    }

    #[test]
    fn test_serve_overrides() {
        let merged = merge(&[
            "storefront-rs",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8700",
            "--service",
            "payment",
        ]);

        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8700);
        assert_eq!(merged.service.name, ServiceKind::Payment);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["storefront-rs", "--verbose", "serve", "--log-level", "warn"]);
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_migrate_leaves_server_settings_alone() {
        let merged = merge(&["storefront-rs", "migrate", "--dry-run"]);
        assert_eq!(merged.server, Settings::default().server);
    }

    #[test]
    fn test_merged_settings_are_validated() {
        let mut base = Settings::default();
        base.peers.user_service.timeout_secs = 0;
        let cli = Cli::try_parse_from(["storefront-rs", "serve"]).unwrap();

        let err = ConfigurationMerger::new(base).merge_cli_args(&cli).unwrap_err();
        assert_eq!(err.key(), "peers.user_service.timeout_secs");
    }
}
