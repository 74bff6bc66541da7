//! Recognition thresholds
//!
//! Every value that moves a classification boundary lives here. The defaults are
//! the values the labelled data was tuned against.
//!
//! | Threshold | Default | Effect |
//! |-----------|---------|--------|
//! | `vicinity_threshold_m` | 1.0 | Ball closer than this is controlled |
//! | `grace_period_player` | 5 | Frames a receiver must keep the ball |
//! | `grace_period_ball` | 1 | Half-window for speed/direction change |
//! | `min_failed_pass_length_m` | 1.5 | Shorter ball travel is a tackle |
//! | `min_trajectory_change_angle_rad` | π/8 | Significant direction change |
//! | `min_speed_change_factor` | 1.5 | Significant speed change |
//! | `goalpost_distance_m` | 5.0 | Kick-near-goalpost distance |

use serde::{Deserialize, Serialize};

/// Possession and classification thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionThresholds {
    /// Maximum ball distance for a player to be in control (m)
    pub vicinity_threshold_m: f64,
    /// Frames a new possessor must keep the ball to be a receiver
    pub grace_period_player: usize,
    /// Frames on each side of the candidate frame for speed/direction checks
    pub grace_period_ball: usize,
    /// Minimal ball travel distance of an unsuccessful pass (m)
    pub min_failed_pass_length_m: f64,
    /// Minimal change in trajectory direction considered significant (rad)
    pub min_trajectory_change_angle_rad: f64,
    /// Minimal ratio between ball speeds considered significant
    pub min_speed_change_factor: f64,
    /// Minimal distance from a goalpost for a kick to be considered a pass (m).
    ///
    /// Accepted and serialized with the rest of the thresholds; the classifier
    /// gates shots on the goal mouth band instead.
    pub goalpost_distance_m: f64,
}

impl Default for RecognitionThresholds {
    fn default() -> Self {
        Self {
            vicinity_threshold_m: 1.0,
            grace_period_player: 5,
            grace_period_ball: 1,
            min_failed_pass_length_m: 1.5,
            min_trajectory_change_angle_rad: std::f64::consts::PI / 8.0,
            min_speed_change_factor: 1.5,
            goalpost_distance_m: 5.0,
        }
    }
}

impl RecognitionThresholds {
    /// Tighter control radius, longer confirmation. Fewer, surer events.
    pub fn strict() -> Self {
        Self {
            vicinity_threshold_m: 0.8,
            grace_period_player: 8,
            min_failed_pass_length_m: 2.0,
            min_speed_change_factor: 1.8,
            ..Self::default()
        }
    }

    /// Wider control radius, shorter confirmation. Catches quick one-touch play.
    pub fn lenient() -> Self {
        Self {
            vicinity_threshold_m: 1.5,
            grace_period_player: 3,
            min_failed_pass_length_m: 1.0,
            min_speed_change_factor: 1.3,
            ..Self::default()
        }
    }
}

/// Frame windows for ball trajectory extrapolation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrajectoryConfig {
    /// Frames to look back when estimating ball velocity
    pub lookback_frames: usize,
    /// Frames to project the ball forward
    pub lookahead_frames: usize,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            lookback_frames: 3,
            lookahead_frames: 6,
        }
    }
}
