//! Configuration settings structures for storefront-rs
//!
//! This module defines all configuration structures that can be loaded from
//! TOML files and environment variables.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::logger::{ConsoleConfig, FileConfig, LogFormat, LoggerConfig};
use crate::services::{DeletePolicy, UpdatePolicy};

// ============================================================================
// Default value functions
// ============================================================================

fn default_app_name() -> String {
    "storefront-rs".to_string()
}

fn default_app_version() -> String {
    crate::pkg_version().to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8800
}

fn default_request_timeout() -> u64 {
    30
}

fn default_keep_alive_timeout() -> u64 {
    75
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connection_timeout() -> u64 {
    30
}

fn default_peer_timeout() -> u64 {
    10
}

fn default_user_service_url() -> String {
    "http://127.0.0.1:8700/user-service".to_string()
}

fn default_product_service_url() -> String {
    "http://127.0.0.1:8500/product-service".to_string()
}

fn default_order_service_url() -> String {
    "http://127.0.0.1:8300/order-service".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> String {
    "logs/storefront.log".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

// ============================================================================
// Application Configuration
// ============================================================================

/// Application basic information configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Application version
    #[serde(default = "default_app_version")]
    pub version: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
        }
    }
}

// ============================================================================
// Server Configuration
// ============================================================================

/// Axum HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Keep-alive timeout in seconds
    #[serde(default = "default_keep_alive_timeout")]
    pub keep_alive_timeout: u64,
}

impl ServerConfig {
    /// Get the full server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            keep_alive_timeout: default_keep_alive_timeout(),
        }
    }
}

// ============================================================================
// Hosted Service
// ============================================================================

/// Which deployable service this process serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceKind {
    #[default]
    Favourite,
    Order,
    Payment,
    Product,
    Shipping,
    User,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 6] = [
        ServiceKind::Favourite,
        ServiceKind::Order,
        ServiceKind::Payment,
        ServiceKind::Product,
        ServiceKind::Shipping,
        ServiceKind::User,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Favourite => "favourite",
            ServiceKind::Order => "order",
            ServiceKind::Payment => "payment",
            ServiceKind::Product => "product",
            ServiceKind::Shipping => "shipping",
            ServiceKind::User => "user",
        }
    }

    /// Name the service is known by to its peers, e.g. `favourite-service`
    pub fn service_name(&self) -> String {
        format!("{}-service", self.as_str())
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.service_name())
    }
}

impl FromStr for ServiceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.to_lowercase();
        let name = name.strip_suffix("-service").unwrap_or(&name);
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| {
                ConfigError::validation(
                    "service.name".to_string(),
                    format!(
                        "Invalid service '{}'. Valid services are: favourite, order, payment, product, shipping, user",
                        s
                    ),
                )
            })
    }
}

/// Hosted service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServiceConfig {
    /// Service whose routes are mounted
    #[serde(default)]
    pub name: ServiceKind,
}

// ============================================================================
// Database Configuration
// ============================================================================

/// Backing store for local records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

/// Diesel database connection configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store backend; `memory` needs no other database settings
    #[serde(default)]
    pub backend: StoreBackend,

    /// Database connection URL
    #[serde(default)]
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Minimum number of connections in the pool
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connection_timeout")]
    pub connection_timeout: u64,

    /// Whether to automatically run pending migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connection_timeout: default_connection_timeout(),
            auto_migrate: false,
        }
    }
}

// ============================================================================
// Peer Services
// ============================================================================

/// Location of one peer service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerConfig {
    /// Base URL; requests go to `{base_url}/api/{collection}/{id}`
    pub base_url: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_peer_timeout")]
    pub timeout_secs: u64,
}

impl PeerConfig {
    fn with_url(base_url: String) -> Self {
        Self {
            base_url,
            timeout_secs: default_peer_timeout(),
        }
    }
}

fn default_user_peer() -> PeerConfig {
    PeerConfig::with_url(default_user_service_url())
}

fn default_product_peer() -> PeerConfig {
    PeerConfig::with_url(default_product_service_url())
}

fn default_order_peer() -> PeerConfig {
    PeerConfig::with_url(default_order_service_url())
}

/// Peer services consulted during enrichment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeersConfig {
    #[serde(default = "default_user_peer")]
    pub user_service: PeerConfig,

    #[serde(default = "default_product_peer")]
    pub product_service: PeerConfig,

    #[serde(default = "default_order_peer")]
    pub order_service: PeerConfig,
}

impl Default for PeersConfig {
    fn default() -> Self {
        Self {
            user_service: default_user_peer(),
            product_service: default_product_peer(),
            order_service: default_order_peer(),
        }
    }
}

// ============================================================================
// Write Policies
// ============================================================================

/// Per-kind override of the update and delete policies.
///
/// Unset fields fall back to the entity kind's own default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KindPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<UpdatePolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<DeletePolicy>,
}

/// Write policy overrides keyed by entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PoliciesConfig {
    #[serde(default)]
    pub favourite: KindPolicy,

    #[serde(default)]
    pub order_item: KindPolicy,

    #[serde(default)]
    pub cart: KindPolicy,

    #[serde(default)]
    pub order: KindPolicy,

    #[serde(default)]
    pub payment: KindPolicy,

    #[serde(default)]
    pub user: KindPolicy,

    #[serde(default)]
    pub category: KindPolicy,

    #[serde(default)]
    pub product: KindPolicy,
}

// ============================================================================
// Logger Settings
// ============================================================================

/// Console output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Whether console output is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Whether to use colored output
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            colored: default_true(),
        }
    }
}

/// File output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSettings {
    /// Whether file output is enabled
    #[serde(default)]
    pub enabled: bool,

    /// Path to the log file
    #[serde(default = "default_log_path")]
    pub path: String,

    /// Whether to append to existing file
    #[serde(default = "default_true")]
    pub append: bool,

    /// Log format: "full", "compact", or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for FileSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_log_path(),
            append: default_true(),
            format: default_log_format(),
        }
    }
}

/// Logger configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Console output settings
    #[serde(default)]
    pub console: ConsoleSettings,

    /// File output settings
    #[serde(default)]
    pub file: FileSettings,
}

impl Default for LoggerSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            console: ConsoleSettings::default(),
            file: FileSettings::default(),
        }
    }
}

impl LoggerSettings {
    /// Convert the file representation into the runtime `LoggerConfig`
    pub fn into_logger_config(self) -> Result<LoggerConfig, ConfigError> {
        let console = ConsoleConfig::new(self.console.enabled, self.console.colored);
        let file = self.file.into_file_config()?;

        LoggerConfig::new(console, file, self.level)
            .map_err(|e| ConfigError::validation("logger".to_string(), e.to_string()))
    }
}

impl FileSettings {
    /// Convert FileSettings to FileConfig
    pub fn into_file_config(self) -> Result<FileConfig, ConfigError> {
        let format = self
            .format
            .parse::<LogFormat>()
            .map_err(|e| ConfigError::validation("logger.file.format".to_string(), e.to_string()))?;

        FileConfig::new(self.enabled, PathBuf::from(self.path), self.append, format)
            .map_err(|e| ConfigError::validation("logger.file".to_string(), e.to_string()))
    }
}

// ============================================================================
// Main Settings Structure
// ============================================================================

/// Complete application settings
///
/// This structure represents the entire configuration that can be loaded
/// from TOML files and environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Application information
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Hosted service selection
    #[serde(default)]
    pub service: ServiceConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Peer service locations
    #[serde(default)]
    pub peers: PeersConfig,

    /// Write policy overrides
    #[serde(default)]
    pub policies: PoliciesConfig,

    /// Logger configuration
    #[serde(default)]
    pub logger: LoggerSettings,
}
