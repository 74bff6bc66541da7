//! Frame accessor
//!
//! A frame is a flat record of 46 values: `(x, y)` for players 0-21 followed by the
//! ball's `(x, y)`. Indexing past the record is a caller bug and panics.

use crate::geometry::{Point, PLAYER_COUNT};

/// Values per frame: 22 players × 2 + ball × 2.
pub const FRAME_LEN: usize = PLAYER_COUNT * 2 + 2;

/// Borrowed read-only view over one frame record.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    values: &'a [f64],
}

impl<'a> FrameView<'a> {
    #[inline]
    pub fn new(values: &'a [f64]) -> Self {
        Self { values }
    }

    /// Ball position: the last two values of the record.
    #[inline]
    pub fn ball(&self) -> Point {
        let n = self.values.len();
        Point::new(self.values[n - 2], self.values[n - 1])
    }

    /// Position of `player` (values at `player * 2`).
    #[inline]
    pub fn player(&self, player: usize) -> Point {
        let idx = player * 2;
        Point::new(self.values[idx], self.values[idx + 1])
    }

    /// Euclidean distance from every player to the ball.
    ///
    /// With `ball` supplied, distances are measured against that point instead of
    /// the frame's own ball position.
    pub fn distances_to_ball(&self, ball: Option<&Point>) -> [f64; PLAYER_COUNT] {
        let ball = ball.copied().unwrap_or_else(|| self.ball());
        let mut distances = [0.0; PLAYER_COUNT];
        for (player, dist) in distances.iter_mut().enumerate() {
            *dist = (self.player(player) - ball).norm();
        }
        distances
    }
}
