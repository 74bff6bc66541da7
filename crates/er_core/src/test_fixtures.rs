//! Synthetic episodes for unit tests.
//!
//! Default layout keeps every player at least 8m from everyone else:
//! defending side on y = -20, attacking side on y = +20, x = -40 + 8 * slot.
//! The ball starts at the centre spot, out of everyone's vicinity.

use std::ops::Range;

use crate::episode::{Episode, FRAME_LEN};
use crate::geometry::{PLAYER_COUNT, SIDE_SIZE};

pub fn default_position(player: usize) -> (f64, f64) {
    if player < SIDE_SIZE {
        (-40.0 + 8.0 * player as f64, -20.0)
    } else {
        (-40.0 + 8.0 * (player - SIDE_SIZE) as f64, 20.0)
    }
}

pub struct EpisodeBuilder {
    frames: Vec<Vec<f64>>,
}

impl EpisodeBuilder {
    pub fn new(len: usize) -> Self {
        let mut frame = vec![0.0; FRAME_LEN];
        for player in 0..PLAYER_COUNT {
            let (x, y) = default_position(player);
            frame[player * 2] = x;
            frame[player * 2 + 1] = y;
        }
        Self {
            frames: vec![frame; len],
        }
    }

    pub fn player(mut self, player: usize, frames: Range<usize>, pos: (f64, f64)) -> Self {
        for frame in frames {
            self.frames[frame][player * 2] = pos.0;
            self.frames[frame][player * 2 + 1] = pos.1;
        }
        self
    }

    pub fn ball(mut self, frames: Range<usize>, pos: (f64, f64)) -> Self {
        for frame in frames {
            self.frames[frame][FRAME_LEN - 2] = pos.0;
            self.frames[frame][FRAME_LEN - 1] = pos.1;
        }
        self
    }

    /// Ball positions for consecutive frames starting at `start`.
    pub fn ball_path(mut self, start: usize, path: &[(f64, f64)]) -> Self {
        for (offset, &pos) in path.iter().enumerate() {
            self = self.ball(start + offset..start + offset + 1, pos);
        }
        self
    }

    /// Ball moving by `step` per frame from `from`, over `frames`.
    pub fn ball_line(mut self, frames: Range<usize>, from: (f64, f64), step: (f64, f64)) -> Self {
        let start = frames.start;
        for frame in frames {
            let k = (frame - start) as f64;
            self = self.ball(frame..frame + 1, (from.0 + step.0 * k, from.1 + step.1 * k));
        }
        self
    }

    /// Put `player` exactly on the ball for `frames`.
    pub fn player_on_ball(mut self, player: usize, frames: Range<usize>) -> Self {
        for frame in frames {
            self.frames[frame][player * 2] = self.frames[frame][FRAME_LEN - 2];
            self.frames[frame][player * 2 + 1] = self.frames[frame][FRAME_LEN - 1];
        }
        self
    }

    pub fn build(self) -> Episode {
        Episode::new(self.frames).expect("fixture frames have the right length")
    }
}
