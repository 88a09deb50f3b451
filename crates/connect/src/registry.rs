//! Process-wide host and zone registry.

use crate::error::{Error, Result};
use crate::host::{HostRecord, Zone};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// One host definition in the registry configuration.
#[derive(Clone, Debug, Deserialize)]
pub struct HostConfig {
    /// Equivalent names/addresses for this server.
    pub names: Vec<String>,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    1247
}

#[derive(Clone, Debug, Deserialize)]
pub struct ZoneConfig {
    pub name: String,
    pub primary: String,
    #[serde(default)]
    pub secondary: Option<String>,
}

/// Startup configuration for the registry.
#[derive(Clone, Debug, Deserialize)]
pub struct RegistryConfig {
    pub local_zone: String,
    pub hosts: Vec<HostConfig>,
    #[serde(default)]
    pub zones: Vec<ZoneConfig>,
}

impl RegistryConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        serde_json::from_str(s).map_err(|e| Error::Configuration(e.to_string()))
    }
}

/// Table of known server hosts and zones.
///
/// Built once at startup and immutable thereafter; shared read-only across
/// sessions. Mutable connection state lives in the per-session
/// [`crate::session::ConnectionSet`].
pub struct HostRegistry {
    /// Every alias of a record indexes the same `Arc`.
    hosts: HashMap<String, Arc<HostRecord>>,
    zones: HashMap<String, Zone>,
    local_zone: String,
}

impl HostRegistry {
    pub fn from_config(config: &RegistryConfig) -> Result<Self> {
        let mut hosts = HashMap::new();
        for host in &config.hosts {
            if host.names.is_empty() || host.names.iter().any(String::is_empty) {
                return Err(Error::Configuration(
                    "host record with no usable name".to_owned(),
                ));
            }
            let record = Arc::new(HostRecord::new(host.names.iter().cloned(), host.port));
            for name in &host.names {
                if hosts.insert(name.clone(), Arc::clone(&record)).is_some() {
                    return Err(Error::Configuration(format!(
                        "host name registered twice: {}",
                        name
                    )));
                }
            }
        }

        let mut zones = HashMap::new();
        for zone in &config.zones {
            if !hosts.contains_key(&zone.primary) {
                return Err(Error::Configuration(format!(
                    "zone {} primary host {} is not registered",
                    zone.name, zone.primary
                )));
            }
            zones.insert(
                zone.name.clone(),
                Zone {
                    name: zone.name.clone(),
                    primary: zone.primary.clone(),
                    secondary: zone.secondary.clone(),
                },
            );
        }

        info!(
            hosts = config.hosts.len(),
            zones = zones.len(),
            local_zone = config.local_zone.as_str(),
            "host registry built"
        );
        Ok(Self {
            hosts,
            zones,
            local_zone: config.local_zone.clone(),
        })
    }

    /// Resolve a serving-host name (any alias) to its record.
    pub fn resolve_host(&self, name: &str) -> Result<Arc<HostRecord>> {
        self.hosts
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownHost(name.to_owned()))
    }

    pub fn zone(&self, name: &str) -> Result<&Zone> {
        self.zones
            .get(name)
            .ok_or_else(|| Error::UnknownZone(name.to_owned()))
    }

    pub fn local_zone(&self) -> &str {
        &self.local_zone
    }
}

impl std::fmt::Debug for HostRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostRegistry")
            .field("hosts", &self.hosts.len())
            .field("zones", &self.zones.len())
            .field("local_zone", &self.local_zone)
            .finish()
    }
}
