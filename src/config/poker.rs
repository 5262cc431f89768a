//! Session limits and delivery tuning

use serde::Deserialize;

use super::error::ValidationError;

/// Limits applied to every session and connection
#[derive(Debug, Clone, Deserialize)]
pub struct PokerConfig {
    /// Longest round a host may configure, in seconds
    #[serde(default = "default_max_round_duration")]
    pub max_round_duration_secs: u32,

    /// Longest session or display name, in characters
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,

    /// Outbound messages queued per connection before new ones are dropped
    #[serde(default = "default_connection_buffer")]
    pub connection_buffer: usize,
}

impl PokerConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_round_duration_secs == 0 {
            return Err(ValidationError::InvalidRoundDuration);
        }
        if self.max_name_length == 0 {
            return Err(ValidationError::InvalidNameLength);
        }
        if self.connection_buffer == 0 {
            return Err(ValidationError::InvalidConnectionBuffer);
        }
        Ok(())
    }
}

impl Default for PokerConfig {
    fn default() -> Self {
        Self {
            max_round_duration_secs: default_max_round_duration(),
            max_name_length: default_max_name_length(),
            connection_buffer: default_connection_buffer(),
        }
    }
}

fn default_max_round_duration() -> u32 {
    3600
}

fn default_max_name_length() -> usize {
    100
}

fn default_connection_buffer() -> usize {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PokerConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_limits_are_rejected() {
        let config = PokerConfig {
            connection_buffer: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidConnectionBuffer));

        let config = PokerConfig {
            max_name_length: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidNameLength));

        let config = PokerConfig {
            max_round_duration_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRoundDuration));
    }

    #[test]
    fn partial_deserialization_fills_defaults() {
        let config: PokerConfig = serde_json::from_str(r#"{"max_name_length": 40}"#).unwrap();
        assert_eq!(config.max_name_length, 40);
        assert_eq!(config.connection_buffer, 64);
    }
}
