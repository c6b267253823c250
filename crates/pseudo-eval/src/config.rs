//! Test runner configuration.

use serde::{Deserialize, Serialize};

/// How many assertion lines of a test case are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssertionMode {
    /// Only the first `ASSERT`/`EXPECT` line decides the case; later ones
    /// are never evaluated.
    #[default]
    FirstOnly,
    /// Every assertion line is evaluated and the case fails if any fails.
    All,
}

/// Runner settings. Every field has a default, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub assertion_mode: AssertionMode,
    /// Suite name used when the caller does not supply one.
    pub default_suite_name: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            assertion_mode: AssertionMode::FirstOnly,
            default_suite_name: "Default".to_string(),
        }
    }
}

impl RunnerConfig {
    /// Parse a JSON config document.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn with_assertion_mode(mut self, mode: AssertionMode) -> Self {
        self.assertion_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        assert_eq!(RunnerConfig::from_json("{}").unwrap(), RunnerConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = RunnerConfig::from_json(r#"{ "assertion_mode": "all" }"#).unwrap();
        assert_eq!(config.assertion_mode, AssertionMode::All);
        assert_eq!(config.default_suite_name, "Default");
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(RunnerConfig::from_json(r#"{ "assertion_mode": "some" }"#).is_err());
    }
}
