use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Display overrides for a single instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V1InstanceMapping {
    pub name: Option<String>,
    pub dns: Option<String>,
}

/// Overrides keyed by the raw Lightsail instance name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceMappings {
    entries: HashMap<String, V1InstanceMapping>,
}

impl InstanceMappings {
    pub fn new(entries: HashMap<String, V1InstanceMapping>) -> Self {
        Self { entries }
    }

    /// The mappings shipped with the service.
    pub fn builtin() -> Self {
        let entries = [
            ("nexcrm", "Nex CRM", "nexcrm.sistemasdevos.com.br"),
            ("HSM2", "HSM2", "hsm2.sistemasdevos.com.br"),
            ("cabralnovo", "Vincit", "vincitcrm.com.br"),
            ("joycebrun", "Metodo JB", "metodojb.sistemasdevos.com.br"),
            ("HST", "HST Contingência", "hst2.sistemasdevos.com.br"),
            ("espelho1", "HST", "hst.sistemasdevos.com.br"),
            ("SEDURB", "Smart Urban", "sedurbjp.sistemasdevos.com.br"),
            ("suporte", "Suporte Devos", "suporte.sistemasdevos.com.br"),
        ]
        .iter()
        .map(|(instance, name, dns)| {
            (
                instance.to_string(),
                V1InstanceMapping {
                    name: Some(name.to_string()),
                    dns: Some(dns.to_string()),
                },
            )
        })
        .collect();

        Self { entries }
    }

    /// Load mappings from a YAML file of `instance: {name, dns}` entries.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Use the file at `path` when given, the built-in table otherwise.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn get(&self, instance_name: &str) -> Option<&V1InstanceMapping> {
        self.entries.get(instance_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
