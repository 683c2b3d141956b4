//! Value parsers for CLI arguments
//!
//! Each function plugs into clap's `value_parser` and returns a plain
//! message on failure, which clap prints next to the offending flag.

use std::fs;
use std::net::IpAddr;
use std::path::PathBuf;

use crate::config::ServiceKind;
use crate::config::error::ConfigError;

/// Longest DNS name accepted as a host
const MAX_HOSTNAME_LEN: usize = 253;

/// Upper bound on `migrate --rollback`
const MAX_ROLLBACK_STEPS: u32 = 100;

/// Parse a TCP port, rejecting 0
pub fn validate_port(port_str: &str) -> Result<u16, String> {
    match port_str.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            port_str
        )),
    }
}

/// Check that a configuration file exists and can be opened
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

/// Parse a rollback step count in `1..=100`
pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str.parse().map_err(|_| {
        format!(
            "Rollback steps must be a valid positive number, got: '{}'",
            steps_str
        )
    })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        n if n > MAX_ROLLBACK_STEPS => Err(format!(
            "Rollback steps cannot exceed {} for safety reasons",
            MAX_ROLLBACK_STEPS
        )),
        n => Ok(n),
    }
}

/// Parse a service name, accepting both `payment` and `payment-service`
pub fn validate_service(service_str: &str) -> Result<ServiceKind, String> {
    service_str.trim().parse::<ServiceKind>().map_err(|e| match e {
        ConfigError::ValidationError { message, .. } => message,
        other => other.to_string(),
    })
}

/// Accept an IP literal or a plausible hostname
///
/// Dotted all-digit input must be a real IPv4 address, so `999.1.1.1`
/// is not mistaken for a hostname.
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.contains(char::is_whitespace) {
        return Err("Host address cannot contain spaces".to_string());
    }
    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address format: '{}'", host_str));
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "Host address is too long (maximum {} characters)",
            MAX_HOSTNAME_LEN
        ));
    }

    Ok(host.to_string())
}
