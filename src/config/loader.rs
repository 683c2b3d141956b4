//! Configuration loader for storefront-rs
//!
//! This module provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "STOREFRONT_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "STOREFRONT_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "STOREFRONT";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// Sources, lowest priority first:
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `STOREFRONT_*` environment variables
///
/// A single file (`STOREFRONT_CONFIG_FILE` or [`ConfigLoader::with_file`])
/// replaces layers 1-3.
#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    config_file: Option<PathBuf>,
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if both `STOREFRONT_CONFIG_DIR` and `STOREFRONT_CONFIG_FILE`
    /// are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir_var = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && config_dir_var.is_some() {
            return Err(ConfigError::validation(
                "config_file",
                "STOREFRONT_CONFIG_DIR and STOREFRONT_CONFIG_FILE cannot both be set. \
                 Use STOREFRONT_CONFIG_DIR for layered configuration or \
                 STOREFRONT_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: config_dir_var
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: AppEnvironment::from_env(),
        })
    }

    /// Load a single file instead of the layered directory
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Override the environment used to pick `{environment}.toml`
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources and validate it
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let settings: Settings = self.build_config()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match self.config_file {
            Some(ref config_file) => Self::add_file_source(builder, config_file, true)?,
            None => self.build_layered_config(builder)?,
        };

        // STOREFRONT_SERVER__PORT -> server.port
        Self::add_env_source(builder)
            .build()
            .map_err(ConfigError::from)
    }

    fn build_layered_config(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let default_path = self.config_dir.join("default.toml");
        let builder = Self::add_file_source(builder, &default_path, true)?;

        let env_path = self.config_dir.join(self.environment.config_file_name());
        let builder = Self::add_file_source(builder, &env_path, false)?;

        let local_path = self.config_dir.join("local.toml");
        Self::add_file_source(builder, &local_path, false)
    }

    fn add_file_source(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        let name = path.to_str().ok_or_else(|| {
            ConfigError::validation(
                "config_file",
                format!("Configuration path is not valid UTF-8: {}", path.display()),
            )
        })?;

        Ok(builder.add_source(File::new(name, FileFormat::Toml).required(required)))
    }

    /// `STOREFRONT_PEERS__USER_SERVICE__BASE_URL` -> `peers.user_service.base_url`
    fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::{ServiceKind, StoreBackend};
    use crate::services::DeletePolicy;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Env vars are process-global; loader tests run one at a time.
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(temp_dir.path().join(name), content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores every touched variable on drop
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let mut guard = Self {
                vars_to_restore: Vec::new(),
            };
            guard.remove(CONFIG_DIR_ENV);
            guard.remove(CONFIG_FILE_ENV);
            guard.remove(AppEnvironment::ENV_VAR);
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.vars_to_restore
                .push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original_value) in self.vars_to_restore.iter().rev() {
                unsafe {
                    match original_value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    const DEFAULT_TOML: &str = r#"
        [server]
        port = 8800

        [service]
        name = "favourite"
    "#;

    #[test]
    fn test_config_loader_new_default() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let _env = EnvGuard::new();

        let loader = ConfigLoader::new().expect("Should create loader");
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment(), AppEnvironment::Development);
    }

    #[test]
    fn test_config_loader_mutual_exclusivity_error() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/custom/config");
        env.set(CONFIG_FILE_ENV, "/path/to/config.toml");

        let err = ConfigLoader::new().unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_CONFIG_FILE"));
    }

    #[test]
    fn test_load_missing_default_toml() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[]);
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let err = ConfigLoader::new().unwrap().load().unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_load_with_environment_and_local_override() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            (
                "production.toml",
                "[server]\nport = 9000\n[service]\nname = \"order\"\n",
            ),
            ("local.toml", "[server]\nport = 9100\n"),
        ]);
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "production");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.service.name, ServiceKind::Order);
        assert_eq!(settings.server.port, 9100);
    }

    #[test]
    fn test_with_environment_overrides_env_var() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            ("test.toml", "[service]\nname = \"payment\"\n"),
        ]);
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set(AppEnvironment::ENV_VAR, "production");

        let settings = ConfigLoader::new()
            .unwrap()
            .with_environment(AppEnvironment::Test)
            .load()
            .unwrap();
        assert_eq!(settings.service.name, ServiceKind::Payment);
    }

    #[test]
    fn test_load_with_env_var_override() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[("default.toml", DEFAULT_TOML)]);
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        env.set("STOREFRONT_SERVER__PORT", "8600");
        env.set(
            "STOREFRONT_PEERS__PRODUCT_SERVICE__BASE_URL",
            "http://products:8500/product-service",
        );
        env.set("STOREFRONT_POLICIES__FAVOURITE__DELETE", "checked");

        let settings = ConfigLoader::new().unwrap().load().unwrap();
        assert_eq!(settings.server.port, 8600);
        assert_eq!(
            settings.peers.product_service.base_url,
            "http://products:8500/product-service"
        );
        assert_eq!(
            settings.policies.favourite.delete,
            Some(DeletePolicy::Checked)
        );
    }

    #[test]
    fn test_load_single_file_mode() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[(
            "shipping.toml",
            "[service]\nname = \"shipping\"\n[database]\nbackend = \"memory\"\n",
        )]);
        let _env = EnvGuard::new();

        let settings = ConfigLoader::new()
            .unwrap()
            .with_file(temp_dir.path().join("shipping.toml"))
            .load()
            .unwrap();
        assert_eq!(settings.service.name, ServiceKind::Shipping);
        assert_eq!(settings.database.backend, StoreBackend::Memory);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[(
            "default.toml",
            "[database]\nbackend = \"postgres\"\nurl = \"\"\n",
        )]);
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());

        let err = ConfigLoader::new().unwrap().load().unwrap_err();
        assert_eq!(err.key(), "database.url");
    }
}
