//! Scan state of the possession state machine.

/// Where the scan stands with respect to ball possession.
///
/// ```text
///  NoPossessor --(player in vicinity)--> Tracking
///  Tracking    --(ball leaves player)--> Faraway   (frame classified at once)
///  Faraway     --(same player again)---> Tracking  (no event)
///  Faraway     --(confirmed receiver)--> Tracking  (pass / shot / failed pass)
///  Faraway     --(ball out of play)----> NoPossessor
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Nobody is known to control the ball
    #[default]
    NoPossessor,
    /// `possessor` controls the ball
    Tracking { possessor: usize },
    /// The ball has left `possessor`, who last had it at `event_frame`
    Faraway { possessor: usize, event_frame: usize },
}
