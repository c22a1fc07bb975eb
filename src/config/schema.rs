use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::api::timeout::DEFAULT_TIMEOUT;
use crate::models::{PropsDefaults, Service};

pub const PROXY_HOST_ENV: &str = "APIFETCH_PROXY_HOST";
pub const NODE_HOST_ENV: &str = "APIFETCH_NODE_HOST";
pub const PORT_ENV: &str = "APIFETCH_PORT";
pub const API_VERSION_ENV: &str = "APIFETCH_API_VERSION";

/// Keys missing from a config file fall back to [`FetchConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Only applied to proxy requests.
    pub port: Option<String>,
    pub api_version: String,
    pub timeout_ms: u64,
    pub refresh_interval_secs: u64,
    pub hosts: Hosts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hosts {
    pub proxy: String,
    pub node: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            port: None,
            api_version: "v1.0".to_string(),
            timeout_ms: DEFAULT_TIMEOUT.as_millis() as u64,
            refresh_interval_secs: 60,
            hosts: Hosts::default(),
        }
    }
}

impl Default for Hosts {
    fn default() -> Self {
        Self {
            proxy: "http://localhost".to_string(),
            node: "http://localhost:4000".to_string(),
        }
    }
}

impl FetchConfig {
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Overlay values returned by `lookup`; empty values are ignored.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = lookup(PROXY_HOST_ENV) {
            self.hosts.proxy = host;
        }
        if let Some(host) = lookup(NODE_HOST_ENV) {
            self.hosts.node = host;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.port = Some(port);
        }
        if let Some(version) = lookup(API_VERSION_ENV) {
            self.api_version = version;
        }

        self
    }

    pub fn host_for(&self, service: Service) -> &str {
        match service {
            Service::Proxy => &self.hosts.proxy,
            Service::Node => &self.hosts.node,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Default table used when resolving request props.
    pub fn defaults(&self) -> PropsDefaults {
        PropsDefaults {
            api_version: self.api_version.clone(),
            refresh_interval_secs: self.refresh_interval_secs,
            ..PropsDefaults::default()
        }
    }
}
