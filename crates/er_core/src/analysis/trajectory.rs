//! # Trajectory Analyzer
//!
//! Ball speed and direction around a pivot frame, and a linear projection of the
//! ball's path used to decide whether a kick threatened the goal.
//!
//! ## Projection
//! 1. Velocity = displacement over the last `lookback` frames (fewer near the start)
//! 2. Step the ball forward by that velocity, up to `lookahead` times
//! 3. Stop after the first point that leaves the pitch

use crate::config::{PitchConfig, TrajectoryConfig};
use crate::episode::Episode;
use crate::geometry::{is_off_pitch, Point};

/// Speeds below this count as a still ball.
pub const STILL_BALL_SPEED: f64 = 0.001;

/// Average ball speed between two frames, in meters per frame.
pub fn ball_speed(episode: &Episode, frame_a: usize, frame_b: usize) -> f64 {
    if frame_a == frame_b {
        return 0.0;
    }
    let dist = (episode.ball_at(frame_b) - episode.ball_at(frame_a)).norm();
    let speed = dist / frame_b.abs_diff(frame_a) as f64;
    log::trace!(
        "Ball speed between frames {} and {} is {:.3}.",
        frame_a,
        frame_b,
        speed
    );
    speed
}

/// Whether ball speed before and after `pivot` differs by more than `factor`.
///
/// A still ball on either side always counts as a change.
pub fn is_speed_changed(
    episode: &Episode,
    prev: usize,
    pivot: usize,
    next: usize,
    factor: f64,
) -> bool {
    let prev_speed = ball_speed(episode, prev, pivot);
    let next_speed = ball_speed(episode, pivot, next);
    let (max_speed, min_speed) = if prev_speed >= next_speed {
        (prev_speed, next_speed)
    } else {
        (next_speed, prev_speed)
    };
    if min_speed < STILL_BALL_SPEED {
        return true;
    }
    max_speed / min_speed > factor
}

/// Signed angle (radians, -π..π) between the ball's direction before and after `pivot`.
pub fn direction_change(episode: &Episode, prev: usize, pivot: usize, next: usize) -> f64 {
    let ball_prev = episode.ball_at(prev);
    let ball_curr = episode.ball_at(pivot);
    let ball_next = episode.ball_at(next);

    let prev_direction = ball_prev - ball_curr;
    let next_direction = ball_curr - ball_next;
    let angle = prev_direction
        .perp(&next_direction)
        .atan2(prev_direction.dot(&next_direction));
    log::trace!(
        "Ball trajectory angle between frames ({}, {}) and ({}, {}) is {:.3} (degrees).",
        prev,
        pivot,
        pivot,
        next,
        angle.to_degrees()
    );
    angle
}

/// Whether the direction change around `pivot` exceeds `min_angle` in magnitude.
pub fn is_direction_changed(
    episode: &Episode,
    prev: usize,
    pivot: usize,
    next: usize,
    min_angle: f64,
) -> bool {
    direction_change(episode, prev, pivot, next).abs() > min_angle
}

/// Lazily projected ball positions.
///
/// Finite and restartable: clone it before iterating to walk the same path twice.
#[derive(Debug, Clone)]
pub struct BallTrajectory {
    position: Point,
    velocity: Point,
    remaining: usize,
    pitch: PitchConfig,
}

impl BallTrajectory {
    /// Projection from the ball position at `frame`.
    pub fn from_frame(
        episode: &Episode,
        frame: usize,
        trajectory: &TrajectoryConfig,
        pitch: &PitchConfig,
    ) -> Self {
        let back = frame.saturating_sub(trajectory.lookback_frames);
        let position = episode.ball_at(frame);
        let (velocity, remaining) = if frame > back {
            let displacement = position - episode.ball_at(back);
            (displacement / (frame - back) as f64, trajectory.lookahead_frames)
        } else {
            // Nothing to look back on
            (Point::zeros(), 0)
        };

        Self {
            position,
            velocity,
            remaining,
            pitch: pitch.clone(),
        }
    }
}

impl Iterator for BallTrajectory {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.remaining == 0 {
            return None;
        }
        self.position += self.velocity;
        self.remaining -= 1;

        if is_off_pitch(&self.position, &self.pitch) {
            // Emit the point that left the pitch, then stop
            self.remaining = 0;
        }
        Some(self.position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.min(1), Some(self.remaining))
    }
}
