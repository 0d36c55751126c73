//! Blackboard configuration.

use serde::{Deserialize, Serialize};

/// Type-locking policy for a blackboard scope.
///
/// Child scopes created without an explicit configuration inherit their
/// parent's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackboardConfig {
    /// Lock a port to the type of its first locally written value.
    ///
    /// When `false`, ports are only locked by an explicit declaration.
    pub lock_on_first_set: bool,
    /// Accept string values on a port locked to another type.
    pub string_exemption: bool,
}

impl Default for BlackboardConfig {
    fn default() -> Self {
        Self {
            lock_on_first_set: false,
            string_exemption: true,
        }
    }
}

impl BlackboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `lock_on_first_set` (builder pattern).
    pub fn with_lock_on_first_set(mut self, enabled: bool) -> Self {
        self.lock_on_first_set = enabled;
        self
    }

    /// Set `string_exemption` (builder pattern).
    pub fn with_string_exemption(mut self, enabled: bool) -> Self {
        self.string_exemption = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BlackboardConfig::new();
        assert!(!config.lock_on_first_set);
        assert!(config.string_exemption);
    }

    #[test]
    fn test_config_builder() {
        let config = BlackboardConfig::new()
            .with_lock_on_first_set(true)
            .with_string_exemption(false);
        assert!(config.lock_on_first_set);
        assert!(!config.string_exemption);
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: BlackboardConfig =
            serde_json::from_str(r#"{"lock_on_first_set": true}"#).unwrap();
        assert!(config.lock_on_first_set);
        assert!(config.string_exemption);
    }

    #[test]
    fn test_config_serialize() {
        let value = serde_json::to_value(BlackboardConfig::default()).unwrap();
        assert_eq!(value["lock_on_first_set"], false);
        assert_eq!(value["string_exemption"], true);
    }
}
