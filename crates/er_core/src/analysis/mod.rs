//! # Analysis Module
//!
//! Read-only queries over an episode used by the recognizer.
//!
//! - `possession` - Closest player / teammate, ball-in-vicinity checks
//! - `trajectory` - Ball speed, direction change, trajectory projection

pub mod possession;
pub mod trajectory;

pub use possession::PossessionTracker;
pub use trajectory::{
    ball_speed, direction_change, is_direction_changed, is_speed_changed, BallTrajectory,
    STILL_BALL_SPEED,
};
