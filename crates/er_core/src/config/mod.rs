//! # Recognition Configuration
//!
//! One immutable value holding every tunable used by the recognizer. It is passed
//! by reference into every query; sweeps clone it and change one field.
//!
//! ## Usage
//! ```rust
//! use er_core::config::RecognitionConfig;
//!
//! let config = RecognitionConfig::default();
//! let strict = RecognitionConfig::strict();
//! assert!(strict.validate().is_ok());
//! ```
//!
//! ## Environment Variables
//!
//! - `ER_CONFIG`: path to a JSON or YAML config file
//! - `ER_PROFILE`: preset name (`default`, `strict`, `lenient`), used when
//!   `ER_CONFIG` is unset

mod pitch_config;
mod thresholds_config;

pub use pitch_config::{PitchConfig, TeamLayout};
pub use thresholds_config::{RecognitionThresholds, TrajectoryConfig};

use std::env;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::geometry::{PLAYER_COUNT, SIDE_SIZE};

pub const CONFIG_PATH_ENV: &str = "ER_CONFIG";
pub const PROFILE_ENV: &str = "ER_PROFILE";

/// Complete recognizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecognitionConfig {
    #[serde(default)]
    pub thresholds: RecognitionThresholds,
    #[serde(default)]
    pub trajectory: TrajectoryConfig,
    #[serde(default)]
    pub pitch: PitchConfig,
}

impl RecognitionConfig {
    pub fn strict() -> Self {
        Self {
            thresholds: RecognitionThresholds::strict(),
            ..Self::default()
        }
    }

    pub fn lenient() -> Self {
        Self {
            thresholds: RecognitionThresholds::lenient(),
            ..Self::default()
        }
    }

    /// Preset by name.
    pub fn from_profile(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_lowercase().as_str() {
            "" | "default" => Ok(Self::default()),
            "strict" => Ok(Self::strict()),
            "lenient" => Ok(Self::lenient()),
            other => Err(ConfigError::UnknownProfile(other.to_string())),
        }
    }

    /// Load from a `.yaml`/`.yml` or JSON file. Missing fields take defaults.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let config: Self = if is_yaml {
            serde_yaml::from_str(&text)?
        } else {
            serde_json::from_str(&text)?
        };

        config.validate()?;
        log::debug!("Loaded recognition config from {}", path.display());
        Ok(config)
    }

    /// Resolve from `ER_CONFIG` / `ER_PROFILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(env::var(CONFIG_PATH_ENV).ok(), env::var(PROFILE_ENV).ok())
    }

    /// Like [`Self::from_env`], falling back to defaults when resolution fails.
    pub fn from_env_or_default() -> Self {
        match Self::from_env() {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Falling back to default recognition config: {}", err);
                Self::default()
            }
        }
    }

    /// A config file wins over a profile name; neither means defaults.
    pub fn resolve(path: Option<String>, profile: Option<String>) -> Result<Self, ConfigError> {
        match (path, profile) {
            (Some(path), _) if !path.is_empty() => Self::load_file(Path::new(&path)),
            (_, Some(profile)) => Self::from_profile(&profile),
            _ => Ok(Self::default()),
        }
    }

    /// Reject values the recognizer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.thresholds;
        positive("vicinity_threshold_m", t.vicinity_threshold_m)?;
        non_negative("min_failed_pass_length_m", t.min_failed_pass_length_m)?;
        non_negative("goalpost_distance_m", t.goalpost_distance_m)?;

        if !(t.min_trajectory_change_angle_rad > 0.0
            && t.min_trajectory_change_angle_rad <= std::f64::consts::PI)
        {
            return Err(invalid(
                "min_trajectory_change_angle_rad",
                format!("{} is outside (0, π]", t.min_trajectory_change_angle_rad),
            ));
        }
        if !(t.min_speed_change_factor >= 1.0) {
            return Err(invalid(
                "min_speed_change_factor",
                format!("{} is below 1.0", t.min_speed_change_factor),
            ));
        }
        if t.grace_period_ball == 0 {
            return Err(invalid("grace_period_ball", "must be at least 1 frame".into()));
        }
        if self.trajectory.lookback_frames == 0 {
            return Err(invalid("lookback_frames", "must be at least 1 frame".into()));
        }

        let p = &self.pitch;
        positive("pitch_half_length", p.pitch_half_length)?;
        positive("pitch_half_width", p.pitch_half_width)?;
        positive("goal_length", p.goal_length)?;
        non_negative("goal_area_margin", p.goal_area_margin)?;
        non_negative("goal_area_depth", p.goal_area_depth)?;

        if p.goalkeepers.defending_goalkeeper >= SIDE_SIZE {
            return Err(invalid(
                "defending_goalkeeper",
                format!("{} is not in 0..{}", p.goalkeepers.defending_goalkeeper, SIDE_SIZE),
            ));
        }
        if !(SIDE_SIZE..PLAYER_COUNT).contains(&p.goalkeepers.attacking_goalkeeper) {
            return Err(invalid(
                "attacking_goalkeeper",
                format!(
                    "{} is not in {}..{}",
                    p.goalkeepers.attacking_goalkeeper, SIDE_SIZE, PLAYER_COUNT
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: String) -> ConfigError {
    ConfigError::InvalidParameter { name, reason }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("{} must be positive", value)))
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(name, format!("{} must not be negative", value)))
    }
}

// ========== Tests ==========
