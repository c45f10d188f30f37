//! Device configuration: readiness wait, keyboard overflow policy, mouse pacing.

use std::path::Path;
use std::time::Duration;

use hidemu_transport::ReadinessPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

const READY_TIMEOUT_ENV: &str = "HIDEMU_READY_TIMEOUT_MS";
const POLL_INTERVAL_ENV: &str = "HIDEMU_POLL_INTERVAL_MS";
const KEYBOARD_OVERFLOW_ENV: &str = "HIDEMU_KEYBOARD_OVERFLOW";
const LAYOUT_ENV: &str = "HIDEMU_LAYOUT";

pub const DEFAULT_LAYOUT: &str = "us";

/// What a keyboard does when a seventh regular key is pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Drop the oldest held key and append the new one.
    #[default]
    RollOver,
    /// Fail with [`hidemu_transport::HidError::Capacity`] and change nothing.
    Reject,
}

fn parse_overflow(value: &str) -> Option<OverflowPolicy> {
    match value.trim().to_ascii_lowercase().as_str() {
        "rollover" | "roll-over" | "evict" => Some(OverflowPolicy::RollOver),
        "reject" | "strict" | "error" => Some(OverflowPolicy::Reject),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    pub overflow: OverflowPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MouseConfig {
    /// Sleep between eased-move samples. Zero samples as fast as reports go out.
    #[serde(with = "hidemu_transport::serde_millis::duration", rename = "step_interval_ms")]
    pub step_interval: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub readiness: ReadinessPolicy,
    pub keyboard: KeyboardConfig,
    pub mouse: MouseConfig,
    /// Layout name understood by the layout registry (`us`, `us-dvorak`, `fr`).
    pub layout: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            readiness: ReadinessPolicy::default(),
            keyboard: KeyboardConfig::default(),
            mouse: MouseConfig::default(),
            layout: DEFAULT_LAYOUT.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DeviceConfig {
    /// Defaults overlaid with `HIDEMU_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    ///
    /// Malformed values are logged and ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        config.apply_lookup(lookup);
        config
    }

    /// Overlay values from `lookup` onto this configuration.
    pub fn apply_lookup<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(READY_TIMEOUT_ENV) {
            match parse_millis(&raw) {
                Some(ms) => self.readiness.timeout = Some(Duration::from_millis(ms)),
                None if is_unbounded(&raw) => self.readiness.timeout = None,
                None => warn!("Ignoring {READY_TIMEOUT_ENV}={raw:?}: expected milliseconds"),
            }
        }

        if let Some(raw) = lookup(POLL_INTERVAL_ENV) {
            match parse_millis(&raw) {
                Some(ms) => self.readiness.poll_interval = Duration::from_millis(ms),
                None => warn!("Ignoring {POLL_INTERVAL_ENV}={raw:?}: expected milliseconds"),
            }
        }

        if let Some(raw) = lookup(KEYBOARD_OVERFLOW_ENV) {
            match parse_overflow(&raw) {
                Some(policy) => self.keyboard.overflow = policy,
                None => warn!("Ignoring {KEYBOARD_OVERFLOW_ENV}={raw:?}: expected rollover or reject"),
            }
        }

        if let Some(raw) = lookup(LAYOUT_ENV) {
            let layout = raw.trim();
            if layout.is_empty() {
                warn!("Ignoring empty {LAYOUT_ENV}");
            } else {
                self.layout = layout.to_ascii_lowercase();
            }
        }
    }

    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn parse_millis(raw: &str) -> Option<u64> {
    raw.trim().parse::<u64>().ok()
}

fn is_unbounded(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "none" | "forever" | "infinite"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = DeviceConfig::default();
        assert_eq!(config.readiness.timeout, None);
        assert_eq!(config.readiness.poll_interval, Duration::from_secs(1));
        assert_eq!(config.keyboard.overflow, OverflowPolicy::RollOver);
        assert_eq!(config.mouse.step_interval, Duration::ZERO);
        assert_eq!(config.layout, "us");
    }

    #[test]
    fn test_lookup_overrides() {
        let config = DeviceConfig::from_lookup(lookup_from(&[
            ("HIDEMU_READY_TIMEOUT_MS", "2500"),
            ("HIDEMU_POLL_INTERVAL_MS", "100"),
            ("HIDEMU_KEYBOARD_OVERFLOW", "Reject"),
            ("HIDEMU_LAYOUT", "FR"),
        ]));
        assert_eq!(config.readiness.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(config.readiness.poll_interval, Duration::from_millis(100));
        assert_eq!(config.keyboard.overflow, OverflowPolicy::Reject);
        assert_eq!(config.layout, "fr");
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let config = DeviceConfig::from_lookup(lookup_from(&[
            ("HIDEMU_READY_TIMEOUT_MS", "soon"),
            ("HIDEMU_POLL_INTERVAL_MS", "-5"),
            ("HIDEMU_KEYBOARD_OVERFLOW", "sometimes"),
            ("HIDEMU_LAYOUT", "   "),
        ]));
        assert_eq!(config, DeviceConfig::default());
    }

    #[test]
    fn test_timeout_can_be_reset_to_unbounded() {
        let mut config = DeviceConfig::default();
        config.readiness.timeout = Some(Duration::from_secs(3));
        config.apply_lookup(lookup_from(&[("HIDEMU_READY_TIMEOUT_MS", "none")]));
        assert_eq!(config.readiness.timeout, None);
    }

    #[test]
    fn test_json_partial_document() -> Result<(), ConfigError> {
        let config = DeviceConfig::from_json_str(
            r#"{"keyboard":{"overflow":"reject"},"mouse":{"step_interval_ms":8}}"#,
        )?;
        assert_eq!(config.keyboard.overflow, OverflowPolicy::Reject);
        assert_eq!(config.mouse.step_interval, Duration::from_millis(8));
        assert_eq!(config.layout, "us");
        Ok(())
    }

    #[test]
    fn test_json_round_trip() -> Result<(), ConfigError> {
        let mut config = DeviceConfig::default();
        config.readiness = ReadinessPolicy::with_timeout(Duration::from_millis(750));
        config.layout = "us-dvorak".to_string();
        let json = config.to_json_pretty()?;
        assert_eq!(DeviceConfig::from_json_str(&json)?, config);
        Ok(())
    }

    #[test]
    fn test_bad_json_is_reported() {
        let result = DeviceConfig::from_json_str(r#"{"keyboard":{"overflow":"sometimes"}}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}
