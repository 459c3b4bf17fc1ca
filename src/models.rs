use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const NO_DATA: &str = "Sem dados";
pub const FETCH_ERROR: &str = "Erro ao buscar dados";
pub const NO_DOMAIN: &str = "Sem domínio atribuído";
pub const NO_PUBLIC_IP: &str = "Sem IP atribuído";

/// An instance as returned by the Lightsail API, detached from SDK types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V1RawInstance {
    pub name: String,
    pub state: Option<String>,
    pub blueprint_id: Option<String>,
    pub bundle_id: Option<String>,
    pub region_name: Option<String>,
    pub public_ip_address: Option<String>,
    pub disks: Vec<V1RawDisk>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V1RawDisk {
    pub name: Option<String>,
    pub size_in_gb: Option<i32>,
    pub is_system_disk: Option<bool>,
    pub state: Option<String>,
    pub path: Option<String>,
    pub gb_in_use: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V1Domain {
    pub name: Option<String>,
    pub entries: Vec<V1DomainEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct V1DomainEntry {
    pub name: Option<String>,
    pub target: Option<String>,
    pub entry_type: Option<String>,
}

/// A number when the API reported one, a placeholder string otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum V1Reading {
    Value(i32),
    Missing(String),
}

impl V1Reading {
    pub fn from_option(value: Option<i32>) -> Self {
        match value {
            Some(v) => V1Reading::Value(v),
            None => V1Reading::Missing(NO_DATA.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1DiskSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_in_gb: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_system_disk: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub gb_in_use: V1Reading,
}

impl From<&V1RawDisk> for V1DiskSummary {
    fn from(disk: &V1RawDisk) -> Self {
        Self {
            name: disk.name.clone(),
            size_in_gb: disk.size_in_gb,
            is_system_disk: disk.is_system_disk,
            state: disk.state.clone(),
            path: disk.path.clone(),
            gb_in_use: V1Reading::from_option(disk.gb_in_use),
        }
    }
}

/// The flattened, enriched view of one instance served by `/instances`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V1InstanceSummary {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blueprint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bundle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub public_ip: String,
    pub dns: String,
    pub metrics: BTreeMap<String, String>,
    pub disks: Vec<V1DiskSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct V1InstancesResponse {
    pub status: String,
    pub data: Vec<V1InstanceSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct V1ErrorResponse {
    pub status: String,
    pub message: String,
}

impl V1ErrorResponse {
    pub fn new(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_disk_summary_serialization() {
        let raw = V1RawDisk {
            name: Some("root".to_string()),
            size_in_gb: Some(40),
            is_system_disk: Some(true),
            state: Some("in-use".to_string()),
            path: Some("/dev/xvda".to_string()),
            gb_in_use: None,
        };

        let value = serde_json::to_value(V1DiskSummary::from(&raw)).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "root",
                "sizeInGb": 40,
                "isSystemDisk": true,
                "state": "in-use",
                "path": "/dev/xvda",
                "gbInUse": "Sem dados",
            })
        );

        let used = V1RawDisk {
            gb_in_use: Some(12),
            ..Default::default()
        };
        let value = serde_json::to_value(V1DiskSummary::from(&used)).unwrap();
        assert_eq!(value, json!({ "gbInUse": 12 }));
    }

    #[test]
    fn test_error_response_shape() {
        let value = serde_json::to_value(V1ErrorResponse::new("boom")).unwrap();
        assert_eq!(value, json!({"status": "error", "message": "boom"}));
    }
}
