//! # Possession Tracker
//!
//! Who is close enough to the ball to be in control, and who on the same side is
//! the most likely intended receiver when no real receiver can be confirmed.

use crate::episode::Episode;
use crate::geometry::{side_range, Point, PLAYER_COUNT};

/// Distance assigned to the excluded player before the teammate arg-min.
const EXCLUDED_DISTANCE_M: f64 = 300.0;

/// Read-only possession queries over one episode.
#[derive(Debug, Clone, Copy)]
pub struct PossessionTracker<'a> {
    episode: &'a Episode,
    vicinity_threshold_m: f64,
}

impl<'a> PossessionTracker<'a> {
    pub fn new(episode: &'a Episode, vicinity_threshold_m: f64) -> Self {
        Self {
            episode,
            vicinity_threshold_m,
        }
    }

    /// Index of the player closest to the ball.
    ///
    /// With `vicinity_only`, `None` when even the closest player is further than
    /// the vicinity threshold. Ties go to the lowest index.
    pub fn closest_player(&self, frame: usize, vicinity_only: bool) -> Option<usize> {
        let distances = self.episode.distances_to_ball(frame, None);
        let (closest, dist) = arg_min(&distances, 0..PLAYER_COUNT);
        if vicinity_only && dist > self.vicinity_threshold_m {
            return None;
        }
        Some(closest)
    }

    /// Closest player to `ball` (or the frame's ball) on `exclude`'s side,
    /// never `exclude` itself.
    pub fn closest_teammate(&self, frame: usize, exclude: usize, ball: Option<&Point>) -> usize {
        let mut distances = self.episode.distances_to_ball(frame, ball);
        distances[exclude] = EXCLUDED_DISTANCE_M;

        let (teammate, dist) = arg_min(&distances, side_range(exclude));
        log::debug!(
            "Frame {}. Closest teammate idx: {}, distance: {:.3}.",
            frame,
            teammate,
            dist
        );
        teammate
    }

    /// Whether the ball is further than the vicinity threshold from `player`.
    #[inline]
    pub fn is_ball_faraway(&self, player: usize, frame: usize) -> bool {
        self.episode.player_ball_distance(player, frame) > self.vicinity_threshold_m
    }

    /// Whether `player` stays in control for every frame of `frames`.
    pub fn keeps_ball(&self, player: usize, frames: std::ops::RangeInclusive<usize>) -> bool {
        frames.into_iter().all(|frame| !self.is_ball_faraway(player, frame))
    }
}

/// First minimum within `range`.
fn arg_min(distances: &[f64; PLAYER_COUNT], range: std::ops::Range<usize>) -> (usize, f64) {
    let mut best = range.start;
    for idx in range {
        if distances[idx] < distances[best] {
            best = idx;
        }
    }
    (best, distances[best])
}
