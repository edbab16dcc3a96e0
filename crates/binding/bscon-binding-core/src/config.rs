//! Persisted engine configuration.

use bscon_api_core::{AssetRef, CharacterRoot, DeviceDescription};
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::entry::BindingEntry;
use crate::error::ConfigError;
use crate::selector::NO_DEVICE_INDEX;

fn no_device_index() -> i32 {
    NO_DEVICE_INDEX
}

/// Flat record saved by the host whenever a binding is edited.
///
/// `device_index` and the entries' last values are informational; both are
/// recomputed at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub asset: Option<AssetRef>,
    #[serde(default)]
    pub action_map_index: usize,
    #[serde(default = "no_device_index")]
    pub device_index: i32,
    #[serde(default)]
    pub device_description: Option<DeviceDescription>,
    #[serde(default)]
    pub character_root: Option<CharacterRoot>,
    #[serde(default)]
    pub entries: Vec<BindingEntry>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            asset: None,
            action_map_index: 0,
            device_index: NO_DEVICE_INDEX,
            device_description: None,
            character_root: None,
            entries: Vec::new(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a saved record. Malformed records are rejected
    /// rather than partially applied.
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: EngineConfig = serde_json::from_str(s).map_err(ConfigError::Parse)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::with_capacity(self.entries.len());
        for entry in &self.entries {
            if !seen.insert(entry.action) {
                return Err(ConfigError::DuplicateAction(entry.action));
            }
            if !entry.multiplier.is_finite() {
                return Err(ConfigError::InvalidMultiplier {
                    action: entry.action,
                    value: entry.multiplier,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_loads_defaults() {
        let cfg = EngineConfig::from_json("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
        assert_eq!(cfg.device_index, -1);
    }

    #[test]
    fn duplicate_entries_fail_fast() {
        let json = r#"{
            "entries": [
                { "action": "00000000-0000-0000-0000-000000000001" },
                { "action": "00000000-0000-0000-0000-000000000001", "multiplier": 5.0 }
            ]
        }"#;
        let err = EngineConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateAction(_)), "got {err}");
    }

    #[test]
    fn bad_action_id_is_a_parse_error() {
        let json = r#"{ "entries": [ { "action": "not-a-uuid" } ] }"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(ConfigError::Parse(_))
        ));
    }
}
