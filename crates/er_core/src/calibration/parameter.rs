//! Tunable recognition parameters and their sweep grids.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::config::RecognitionConfig;
use crate::error::CalibrationError;
use crate::evaluation::round_to;

/// One threshold varied independently during a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TuningParameter {
    GracePeriodPlayer,
    VicinityThreshold,
    MinFailedPassLength,
    MinTrajectoryChangeAngle,
    MinSpeedChangeFactor,
}

impl TuningParameter {
    pub const ALL: [TuningParameter; 5] = [
        TuningParameter::GracePeriodPlayer,
        TuningParameter::VicinityThreshold,
        TuningParameter::MinFailedPassLength,
        TuningParameter::MinTrajectoryChangeAngle,
        TuningParameter::MinSpeedChangeFactor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TuningParameter::GracePeriodPlayer => "grace_period_player",
            TuningParameter::VicinityThreshold => "vicinity_threshold",
            TuningParameter::MinFailedPassLength => "min_failed_pass_length",
            TuningParameter::MinTrajectoryChangeAngle => "min_trajectory_change_angle",
            TuningParameter::MinSpeedChangeFactor => "min_speed_change_factor",
        }
    }

    /// Grid of candidate values, rounded to 2 decimals.
    pub fn values(&self) -> Vec<f64> {
        let grid = match self {
            TuningParameter::GracePeriodPlayer => (1..=20).map(f64::from).collect(),
            TuningParameter::VicinityThreshold => linspace(0.1, 3.0, 30),
            TuningParameter::MinFailedPassLength => linspace(0.5, 7.5, 71),
            TuningParameter::MinTrajectoryChangeAngle => linspace(0.1, PI, 36),
            TuningParameter::MinSpeedChangeFactor => linspace(1.1, 2.1, 11),
        };
        grid.into_iter().map(|v| round_to(v, 2)).collect()
    }

    /// Current value in `config`.
    pub fn get(&self, config: &RecognitionConfig) -> f64 {
        let t = &config.thresholds;
        match self {
            TuningParameter::GracePeriodPlayer => t.grace_period_player as f64,
            TuningParameter::VicinityThreshold => t.vicinity_threshold_m,
            TuningParameter::MinFailedPassLength => t.min_failed_pass_length_m,
            TuningParameter::MinTrajectoryChangeAngle => t.min_trajectory_change_angle_rad,
            TuningParameter::MinSpeedChangeFactor => t.min_speed_change_factor,
        }
    }

    /// Copy of `base` with this parameter set to `value`.
    pub fn apply(&self, base: &RecognitionConfig, value: f64) -> RecognitionConfig {
        let mut config = base.clone();
        let t = &mut config.thresholds;
        match self {
            TuningParameter::GracePeriodPlayer => t.grace_period_player = value.round() as usize,
            TuningParameter::VicinityThreshold => t.vicinity_threshold_m = value,
            TuningParameter::MinFailedPassLength => t.min_failed_pass_length_m = value,
            TuningParameter::MinTrajectoryChangeAngle => t.min_trajectory_change_angle_rad = value,
            TuningParameter::MinSpeedChangeFactor => t.min_speed_change_factor = value,
        }
        config
    }
}

impl fmt::Display for TuningParameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TuningParameter {
    type Err = CalibrationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| CalibrationError::UnknownParameter(s.to_string()))
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}
