//! # Episode
//!
//! An ordered, immutable sequence of tracking frames for one game sequence.
//! Construction checks the record length of every frame; after that all
//! accessors assume well-formed data.

mod frame;

pub use frame::{FrameView, FRAME_LEN};

use serde::{Deserialize, Serialize, Serializer};

use crate::error::EpisodeError;
use crate::geometry::{Point, PLAYER_COUNT};

/// Tracking data of one sequence, frame by frame.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>")]
pub struct Episode {
    frames: Vec<Vec<f64>>,
}

impl Episode {
    pub fn new(frames: Vec<Vec<f64>>) -> Result<Self, EpisodeError> {
        if let Some((frame, values)) = frames
            .iter()
            .enumerate()
            .find(|(_, values)| values.len() != FRAME_LEN)
        {
            return Err(EpisodeError::InvalidFrameLength {
                frame,
                found: values.len(),
                expected: FRAME_LEN,
            });
        }
        Ok(Self { frames })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Index of the last frame, `None` for an empty episode.
    #[inline]
    pub fn last_frame(&self) -> Option<usize> {
        self.frames.len().checked_sub(1)
    }

    #[inline]
    pub fn frame(&self, frame: usize) -> FrameView<'_> {
        FrameView::new(&self.frames[frame])
    }

    #[inline]
    pub fn ball_at(&self, frame: usize) -> Point {
        self.frame(frame).ball()
    }

    #[inline]
    pub fn player_at(&self, player: usize, frame: usize) -> Point {
        self.frame(frame).player(player)
    }

    /// Distances from all players to the ball (or to `ball` when given).
    pub fn distances_to_ball(&self, frame: usize, ball: Option<&Point>) -> [f64; PLAYER_COUNT] {
        self.frame(frame).distances_to_ball(ball)
    }

    /// Distance between one player and the ball at `frame`.
    #[inline]
    pub fn player_ball_distance(&self, player: usize, frame: usize) -> f64 {
        (self.player_at(player, frame) - self.ball_at(frame)).norm()
    }
}

impl TryFrom<Vec<Vec<f64>>> for Episode {
    type Error = EpisodeError;

    fn try_from(frames: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Episode::new(frames)
    }
}

impl Serialize for Episode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.frames.serialize(serializer)
    }
}
