//! Player configuration
//!
//! Read from the process environment (after `.env` has been loaded by the
//! binary). Every setting is optional; unset means the built-in default.

use std::path::PathBuf;

use thiserror::Error;

use crate::ui::presentation::gestures::SwipeConfig;

/// Environment variable names
pub mod env_keys {
    /// File backing persistent storage (desktop only)
    pub const STORAGE_PATH: &str = "TACREF_STORAGE_PATH";
    pub const SWIPE_MIN_DISTANCE: &str = "TACREF_SWIPE_MIN_DISTANCE";
    pub const SWIPE_MAX_VERTICAL: &str = "TACREF_SWIPE_MAX_VERTICAL";
    pub const SWIPE_MIN_VELOCITY: &str = "TACREF_SWIPE_MIN_VELOCITY";
    pub const SWIPE_ENABLED: &str = "TACREF_SWIPE_ENABLED";
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a non-negative number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be true or false, got '{value}'")]
    InvalidFlag { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerConfig {
    /// Overrides the platform config directory for storage
    pub storage_path: Option<PathBuf>,
    /// Default swipe thresholds for swipeable regions
    pub swipe: SwipeConfig,
}

impl PlayerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = SwipeConfig::default();
        let number = |key: &'static str, default: f64| -> Result<f64, ConfigError> {
            match lookup(key) {
                Some(raw) => parse_number(key, &raw),
                None => Ok(default),
            }
        };

        let swipe = SwipeConfig {
            min_swipe_distance: number(env_keys::SWIPE_MIN_DISTANCE, defaults.min_swipe_distance)?,
            max_vertical_swipe: number(env_keys::SWIPE_MAX_VERTICAL, defaults.max_vertical_swipe)?,
            min_velocity: number(env_keys::SWIPE_MIN_VELOCITY, defaults.min_velocity)?,
            enabled: match lookup(env_keys::SWIPE_ENABLED) {
                Some(raw) => parse_flag(env_keys::SWIPE_ENABLED, &raw)?,
                None => defaults.enabled,
            },
        };

        let storage_path = lookup(env_keys::STORAGE_PATH)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            storage_path,
            swipe,
        })
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(ConfigError::InvalidNumber {
            key,
            value: raw.to_string(),
        }),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            key,
            value: raw.to_string(),
        }),
    }
}
