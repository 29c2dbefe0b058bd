//! Network records as returned by `network.get_all_records`.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Opaque controller handle for a network (`OpaqueRef:...`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct NetworkRef(String);

impl NetworkRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetworkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The subset of a network record this tool reads. Other fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NetworkRecord {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub name_label: String,
    #[serde(default)]
    pub name_description: String,
    #[serde(default)]
    pub bridge: String,
    #[serde(default)]
    pub other_config: HashMap<String, String>,
}

impl NetworkRecord {
    pub fn has_marker(&self, marker_key: &str) -> bool {
        self.other_config.contains_key(marker_key)
    }
}

/// All network records in a pool, keyed by handle.
pub type NetworkRecords = BTreeMap<NetworkRef, NetworkRecord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_ignores_unknown_fields() {
        let json = r#"{
            "uuid": "7c1d3d6e-0000-4000-8000-000000000001",
            "name_label": "sxm-net-0",
            "MTU": 1500,
            "PIFs": [],
            "other_config": {"missing_sxm_networks": "true"}
        }"#;
        let record: NetworkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name_label, "sxm-net-0");
        assert!(record.bridge.is_empty());
        assert!(record.has_marker("missing_sxm_networks"));
    }

    #[test]
    fn test_has_marker_checks_key_not_value() {
        let mut record = NetworkRecord::default();
        record.other_config.insert("marker".into(), String::new());
        assert!(record.has_marker("marker"));
        assert!(!record.has_marker("other"));
    }

    #[test]
    fn test_records_map_keys_are_handles() {
        let json = r#"{"OpaqueRef:b": {"name_label": "b"}, "OpaqueRef:a": {"name_label": "a"}}"#;
        let records: NetworkRecords = serde_json::from_str(json).unwrap();
        let keys: Vec<&str> = records.keys().map(NetworkRef::as_str).collect();
        assert_eq!(keys, vec!["OpaqueRef:a", "OpaqueRef:b"]);
    }
}
