//! Pitch dimensions and team layout

use serde::{Deserialize, Serialize};

use crate::geometry::field;

/// Which player index keeps goal for each side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeamLayout {
    /// Goalkeeper of the defending side (indices 0-10)
    pub defending_goalkeeper: usize,
    /// Goalkeeper of the attacking side (indices 11-21)
    pub attacking_goalkeeper: usize,
}

impl Default for TeamLayout {
    fn default() -> Self {
        Self {
            defending_goalkeeper: 0,
            attacking_goalkeeper: 11,
        }
    }
}

impl TeamLayout {
    #[inline]
    pub fn is_goalkeeper(&self, player: usize) -> bool {
        player == self.defending_goalkeeper || player == self.attacking_goalkeeper
    }
}

/// Field boundaries used by the classifier (meters, pitch-centred).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    pub pitch_half_length: f64,
    pub pitch_half_width: f64,
    pub goal_length: f64,
    pub goal_area_margin: f64,
    pub goal_area_depth: f64,
    pub goalkeepers: TeamLayout,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            pitch_half_length: field::PITCH_HALF_LENGTH_M,
            pitch_half_width: field::PITCH_HALF_WIDTH_M,
            goal_length: field::GOAL_LENGTH_M,
            goal_area_margin: field::GOAL_AREA_MARGIN_M,
            goal_area_depth: field::GOAL_AREA_DEPTH_M,
            goalkeepers: TeamLayout::default(),
        }
    }
}

impl PitchConfig {
    /// Lateral half width of the goal mouth band (half goal length plus margin).
    #[inline]
    pub fn goal_mouth_half_width(&self) -> f64 {
        self.goal_length / 2.0 + self.goal_area_margin
    }
}
