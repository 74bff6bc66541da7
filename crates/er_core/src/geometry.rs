//! Pitch geometry
//!
//! Pure predicates over pitch-centred meter coordinates:
//! - X: goal line to goal line (length), 0 = halfway line
//! - Y: touchline to touchline (width), 0 = centre
//!
//! Nothing here holds state. Thresholds come from [`PitchConfig`].

use nalgebra::Vector2;

use crate::config::PitchConfig;

/// A position or displacement on the pitch, in meters.
pub type Point = Vector2<f64>;

/// Number of tracked players per frame.
pub const PLAYER_COUNT: usize = 22;

/// Players per side. Indices `0..SIDE_SIZE` defend, `SIDE_SIZE..PLAYER_COUNT` attack.
pub const SIDE_SIZE: usize = 11;

// ============================================================
// Default field dimensions
// ============================================================
pub mod field {
    /// Half of the pitch length (105m).
    pub const PITCH_HALF_LENGTH_M: f64 = 52.5;

    /// Half of the pitch width. A regulation pitch is 68m wide (34m), but tracked
    /// episodes from wider fields keep play going past 34m.
    pub const PITCH_HALF_WIDTH_M: f64 = 35.0;

    /// Distance between the goalposts.
    pub const GOAL_LENGTH_M: f64 = 7.32;

    /// Lateral margin added to the half goal length to form the goal area.
    pub const GOAL_AREA_MARGIN_M: f64 = 5.5;

    /// Longitudinal distance from the centre beyond which the goal area starts.
    pub const GOAL_AREA_DEPTH_M: f64 = 47.0;
}

/// Same-side test by player index.
///
/// True iff both indices are below 10 or both are above 10. Index 10 belongs to the
/// defending side by layout but matches nothing here; callers that need the full
/// 11-player side use [`side_range`].
pub fn is_same_team(a: usize, b: usize) -> bool {
    (a < 10 && b < 10) || (a > 10 && b > 10)
}

/// Index range of the side `player` belongs to (`0..11` or `11..22`).
pub fn side_range(player: usize) -> std::ops::Range<usize> {
    if player < SIDE_SIZE {
        0..SIDE_SIZE
    } else {
        SIDE_SIZE..PLAYER_COUNT
    }
}

/// Whether the point is inside either goal area.
pub fn is_in_goal_area(point: &Point, pitch: &PitchConfig) -> bool {
    point.x.abs() > pitch.goal_area_depth && point.y.abs() < pitch.goal_mouth_half_width()
}

/// Whether the point's lateral coordinate lies within the goal mouth band.
pub fn is_within_goal_mouth(point: &Point, pitch: &PitchConfig) -> bool {
    point.y.abs() < pitch.goal_mouth_half_width()
}

/// Ball beyond a touchline.
pub fn crosses_sideline(point: &Point, pitch: &PitchConfig) -> bool {
    point.y.abs() > pitch.pitch_half_width
}

/// Ball beyond a goal line.
pub fn crosses_goal_line(point: &Point, pitch: &PitchConfig) -> bool {
    point.x.abs() > pitch.pitch_half_length
}

/// Outside the playing field on either axis.
pub fn is_off_pitch(point: &Point, pitch: &PitchConfig) -> bool {
    crosses_goal_line(point, pitch) || crosses_sideline(point, pitch)
}

/// Reached or passed a goal line (inclusive, used for projected points).
pub fn reaches_goal_line(point: &Point, pitch: &PitchConfig) -> bool {
    point.x.abs() >= pitch.pitch_half_length
}
