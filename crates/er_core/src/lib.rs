//! # er_core - Soccer Event Recognition from Tracking Data
//!
//! Recognizes passes, failed passes and shots from per-frame positions of the
//! 22 players and the ball.
//!
//! ## Features
//! - Explicit possession state machine with a pure transition step
//! - Immutable, serde-backed configuration with named presets
//! - Parallel batch recognition over whole datasets
//! - Evaluation against hand labels with a ±3 frame window
//! - One-at-a-time threshold sweeps written as CSV
//!
//! ## Usage
//! ```rust
//! use er_core::{recognize_episode, Episode, RecognitionConfig};
//!
//! let frames = vec![vec![0.0; er_core::episode::FRAME_LEN]; 10];
//! let episode = Episode::new(frames).unwrap();
//! let events = recognize_episode(&episode, &RecognitionConfig::default());
//! assert!(events.is_empty());
//! ```

pub mod analysis;
pub mod calibration;
pub mod config;
pub mod dataset;
pub mod episode;
pub mod error;
pub mod evaluation;
pub mod geometry;
pub mod manifest;
pub mod recognition;

#[cfg(test)]
mod test_fixtures;

pub use calibration::{sweep, write_sweep_csv, SweepRow, TuningParameter};
pub use config::RecognitionConfig;
pub use dataset::{
    load_dataset, load_event_maps, output_path_for, recognize_dataset, save_event_maps, Dataset,
    EventMaps,
};
pub use episode::Episode;
pub use error::{CalibrationError, ConfigError, DatasetError, EpisodeError, EvaluationError};
pub use evaluation::{do_comparison, Comparison};
pub use manifest::RunManifest;
pub use recognition::{recognize_episode, Detection, Event, EventKind, EventMap, EventRecognizer};
