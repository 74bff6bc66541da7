//! # Event Recognition
//!
//! Turns an episode into an [`EventMap`] of passes, failed passes and shots.
//!
//! - `event` - Event types and the frame-keyed event map
//! - `state` - Possession state machine states
//! - `recognizer` - Frame-by-frame transition function and episode driver

pub mod event;
pub mod recognizer;
pub mod state;

pub use event::{Detection, Event, EventKind, EventMap};
pub use recognizer::{recognize_episode, EventRecognizer};
pub use state::ScanState;
