// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

use pollboard_error::{PollboardError, Result};
use serde::Deserialize;
use toml::{Table, Value};

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

/// Settings for the active-poll updater
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LiveConfig {
    pub endpoint: String,
    pub refresh_interval_ms: u64,
    pub count_a_id: String,
    pub count_b_id: String,
    pub bar_a_id: String,
    pub bar_b_id: String,
}

impl LiveConfig {
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }
}

/// Settings for the completed-poll rotation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RotationConfig {
    pub polls_per_page: usize,
    pub rotation_interval_ms: u64,
    pub fade_duration_ms: u64,
    pub grid_container_id: String,
    pub current_page_id: String,
    pub total_pages_id: String,
    pub polls_data_id: String,
    pub card_selector: String,
    pub fade_out_class: String,
    pub render_first_page: bool,
}

impl RotationConfig {
    #[must_use]
    pub const fn rotation_interval(&self) -> Duration {
        Duration::from_millis(self.rotation_interval_ms)
    }

    #[must_use]
    pub const fn fade_duration(&self) -> Duration {
        Duration::from_millis(self.fade_duration_ms)
    }
}

/// Names of the push notifications the host page forwards
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PushConfig {
    pub connect_event: String,
    pub vote_cast_event: String,
    pub poll_activated_event: String,
}

/// Complete display configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    pub live: LiveConfig,
    pub rotation: RotationConfig,
    pub push: PushConfig,
}

impl DisplayConfig {
    /// Load the embedded defaults
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the embedded file is malformed.
    pub fn load() -> Result<Self> {
        Self::from_overrides(None)
    }

    /// Load the embedded defaults with an optional TOML override on top.
    ///
    /// The override may name any subset of keys; everything it leaves out keeps
    /// its default.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if either document fails to parse or the merged
    /// settings do not validate.
    pub fn from_overrides(overrides: Option<&str>) -> Result<Self> {
        let mut merged = parse_table(DEFAULT_CONFIG, "embedded defaults")?;
        if let Some(text) = overrides {
            merge_tables(&mut merged, parse_table(text, "override")?);
        }

        let config: Self = Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| PollboardError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    /// Returns `InvalidConfig` for a zero page size or a zero interval.
    pub fn validate(&self) -> Result<()> {
        if self.rotation.polls_per_page == 0 {
            return Err(PollboardError::invalid_config(
                "rotation.polls_per_page must be at least 1",
            ));
        }
        if self.rotation.rotation_interval_ms == 0 {
            return Err(PollboardError::invalid_config(
                "rotation.rotation_interval_ms must be positive",
            ));
        }
        if self.live.refresh_interval_ms == 0 {
            return Err(PollboardError::invalid_config(
                "live.refresh_interval_ms must be positive",
            ));
        }
        if self.live.endpoint.trim().is_empty() {
            return Err(PollboardError::invalid_config("live.endpoint is empty"));
        }
        Ok(())
    }
}

fn parse_table(text: &str, label: &str) -> Result<Table> {
    text.parse::<Table>()
        .map_err(|e| PollboardError::invalid_config(format!("{label}: {e}")))
}

fn merge_tables(base: &mut Table, overrides: Table) {
    for (key, value) in overrides {
        let Value::Table(nested) = value else {
            base.insert(key, value);
            continue;
        };
        if let Some(Value::Table(existing)) = base.get_mut(&key) {
            merge_tables(existing, nested);
            continue;
        }
        base.insert(key, Value::Table(nested));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_display_pages() {
        let config = DisplayConfig::load().unwrap();

        assert_eq!(config.live.endpoint, "/api/display/data");
        assert_eq!(config.live.refresh_interval(), Duration::from_secs(5));
        assert_eq!(config.rotation.polls_per_page, 4);
        assert_eq!(config.rotation.rotation_interval(), Duration::from_secs(10));
        assert_eq!(config.rotation.fade_duration(), Duration::from_millis(300));
        assert_eq!(config.push.vote_cast_event, "vote_cast");
        assert!(!config.rotation.render_first_page);
    }

    #[test]
    fn override_replaces_only_named_keys() {
        let config = DisplayConfig::from_overrides(Some(
            "[rotation]\npolls_per_page = 6\nrender_first_page = true\n",
        ))
        .unwrap();

        assert_eq!(config.rotation.polls_per_page, 6);
        assert!(config.rotation.render_first_page);
        assert_eq!(config.rotation.grid_container_id, "grid-container");
        assert_eq!(config.live.count_a_id, "count-a");
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let err = DisplayConfig::from_overrides(Some("[rotation]\npolls_per_page = 0\n"))
            .unwrap_err();

        assert!(matches!(err, PollboardError::InvalidConfig { .. }));
    }

    #[test]
    fn zero_refresh_interval_is_rejected() {
        let err = DisplayConfig::from_overrides(Some("[live]\nrefresh_interval_ms = 0\n"))
            .unwrap_err();

        assert!(err.to_string().contains("refresh_interval_ms"));
    }

    #[test]
    fn malformed_override_is_an_invalid_config() {
        let err = DisplayConfig::from_overrides(Some("[rotation\n")).unwrap_err();

        assert!(matches!(err, PollboardError::InvalidConfig { .. }));
        assert!(err.to_string().contains("override"));
    }

    #[test]
    fn wrong_type_is_an_invalid_config() {
        let err = DisplayConfig::from_overrides(Some("[live]\nrefresh_interval_ms = \"soon\"\n"))
            .unwrap_err();

        assert!(matches!(err, PollboardError::InvalidConfig { .. }));
    }
}
