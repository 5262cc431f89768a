//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling session rules
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Only players and participating hosts may submit scores
    #[serde(default = "default_enforce_scoring_roles")]
    pub enforce_scoring_roles: bool,

    /// Only hosts and participating hosts may start/pause/stop/reset rounds
    #[serde(default)]
    pub host_only_round_control: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enforce_scoring_roles: default_enforce_scoring_roles(),
            host_only_round_control: false,
        }
    }
}

fn default_enforce_scoring_roles() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(flags.enforce_scoring_roles);
        assert!(!flags.host_only_round_control);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let json = r#"{
            "enforce_scoring_roles": false,
            "host_only_round_control": true
        }"#;

        let flags: FeatureFlags = serde_json::from_str(json).unwrap();
        assert!(!flags.enforce_scoring_roles);
        assert!(flags.host_only_round_control);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let flags: FeatureFlags = serde_json::from_str("{}").unwrap();
        assert!(flags.enforce_scoring_roles);
        assert!(!flags.host_only_round_control);
    }
}
