use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use thiserror::Error;

pub const HOST_VAR: &str = "SENTIMENT_API_HOST";
pub const PORT_VAR: &str = "SENTIMENT_API_PORT";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var}={value:?} is not a valid IP address")]
    Host { var: &'static str, value: String },
    #[error("{var}={value:?} is not a valid port")]
    Port { var: &'static str, value: String },
}

/// Bind settings for the HTTP shim.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig { pub host: IpAddr, pub port: u16 }

impl Default for ApiConfig {
    fn default() -> Self { Self { host: IpAddr::V4(Ipv4Addr::LOCALHOST), port: 8080 } }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from any variable source; unset or blank values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(v) = lookup(HOST_VAR).filter(|v| !v.trim().is_empty()) {
            cfg.host = v.trim().parse().map_err(|_| ConfigError::Host { var: HOST_VAR, value: v })?;
        }
        if let Some(v) = lookup(PORT_VAR).filter(|v| !v.trim().is_empty()) {
            cfg.port = v.trim().parse().map_err(|_| ConfigError::Port { var: PORT_VAR, value: v })?;
        }
        Ok(cfg)
    }

    pub fn addr(&self) -> SocketAddr { SocketAddr::new(self.host, self.port) }
}
