//! Configuration loader for the `compressor-health` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::{env, net::SocketAddr};

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_usize {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse an optional socket address environment variable with a default value.
macro_rules! parse_env_addr {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.trim().parse::<SocketAddr>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or_else(|| SocketAddr::from($default))
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,

    /// Largest number of task entries accepted by one summary request.
    pub max_summary_tasks: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            max_summary_tasks: 500,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listen address (default: `0.0.0.0:8080`)
/// - `MAX_SUMMARY_TASKS` – largest summary batch (default: 500)
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let bind_addr = parse_env_addr!("BIND_ADDR", ([0, 0, 0, 0], 8080));
    let max_summary_tasks = parse_env_usize!("MAX_SUMMARY_TASKS", 500);

    if max_summary_tasks == 0 {
        return Err(anyhow!("MAX_SUMMARY_TASKS must be greater than zero"));
    }

    Ok(Config {
        bind_addr,
        max_summary_tasks,
    })
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR         : {}", self.bind_addr);
        tracing::info!("  MAX_SUMMARY_TASKS : {}", self.max_summary_tasks);
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_defaults() {
        // ---
        let cfg = Config::default();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.max_summary_tasks, 500);
    }

    // Single test touching the process environment so parallel tests do not race
    #[test]
    fn test_load_from_env() {
        // ---
        env::remove_var("BIND_ADDR");
        env::remove_var("MAX_SUMMARY_TASKS");
        let cfg = load_from_env().unwrap();
        assert_eq!(cfg.bind_addr, Config::default().bind_addr);
        assert_eq!(cfg.max_summary_tasks, 500);

        env::set_var("BIND_ADDR", "127.0.0.1:9090");
        env::set_var("MAX_SUMMARY_TASKS", "25");
        let cfg = load_from_env().unwrap();
        assert_eq!(cfg.bind_addr.to_string(), "127.0.0.1:9090");
        assert_eq!(cfg.max_summary_tasks, 25);

        env::set_var("MAX_SUMMARY_TASKS", "lots");
        assert!(load_from_env().is_err());

        env::set_var("MAX_SUMMARY_TASKS", "0");
        assert!(load_from_env().is_err());

        env::remove_var("BIND_ADDR");
        env::remove_var("MAX_SUMMARY_TASKS");
    }
}
