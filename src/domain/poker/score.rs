//! Estimation card value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A submitted estimate.
///
/// Kept as the card's face text ("3", "1/2", "?", "coffee"); decks vary
/// between teams so no numeric interpretation is imposed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(String);

impl Score {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Score {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Score {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
