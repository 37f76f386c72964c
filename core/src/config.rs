//! Bind address configuration read from the environment.
//!
//! # Design
//! Each service reads `{PREFIX}_HOST` and `{PREFIX}_PORT`. The port also
//! falls back to the generic `PORT` variable so a single-service deployment
//! can set just that. Lookup goes through a closure so tests never touch the
//! process environment.

use crate::error::ConfigError;

pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Where a service listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    /// Read the config from the process environment.
    pub fn from_env(prefix: &str, default_port: u16) -> Result<Self, ConfigError> {
        Self::from_lookup(prefix, default_port, |key| std::env::var(key).ok())
    }

    /// Read the config through an arbitrary key lookup.
    pub fn from_lookup<F>(prefix: &str, default_port: u16, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup(&format!("{prefix}_HOST"))
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port_var = format!("{prefix}_PORT");
        let port = match lookup(&port_var) {
            Some(value) => parse_port(&port_var, value)?,
            None => match lookup("PORT") {
                Some(value) => parse_port("PORT", value)?,
                None => default_port,
            },
        };

        Ok(Self { host, port })
    }

    /// `host:port`, ready for `TcpListener::bind`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(var: &str, value: String) -> Result<u16, ConfigError> {
    value.trim().parse::<u16>().map_err(|_| ConfigError::InvalidPort {
        var: var.to_string(),
        value,
    })
}
