//! # Event Recognizer
//!
//! Drives the possession state machine over an episode, one frame per step.
//!
//! ## Algorithm
//! 1. Find a player in the ball's vicinity and track them
//! 2. Find the frame where the ball leaves the tracked player
//! 3. From that frame on, classify what happened to the ball:
//!    - out over a touchline → failed pass (or tackle when it barely moved)
//!    - over a goal line → shot when inside the goal mouth, else as above
//!    - the same player again → nothing happened
//!    - a confirmed new player → pass to a teammate, or a shot check when the
//!      receiver is an opponent
//! 4. Repeat from the new possessor until the episode ends
//!
//! Every query is read-only; the only thing carried between frames is the
//! [`ScanState`].

use crate::analysis::{is_direction_changed, is_speed_changed, BallTrajectory, PossessionTracker};
use crate::config::RecognitionConfig;
use crate::episode::Episode;
use crate::geometry::{
    crosses_goal_line, crosses_sideline, is_in_goal_area, is_same_team, is_within_goal_mouth,
    reaches_goal_line, Point,
};

use super::event::{Detection, Event, EventMap};
use super::state::ScanState;

/// Event recognition over one episode.
#[derive(Debug, Clone, Copy)]
pub struct EventRecognizer<'a> {
    episode: &'a Episode,
    config: &'a RecognitionConfig,
    possession: PossessionTracker<'a>,
}

impl<'a> EventRecognizer<'a> {
    pub fn new(episode: &'a Episode, config: &'a RecognitionConfig) -> Self {
        Self {
            episode,
            config,
            possession: PossessionTracker::new(episode, config.thresholds.vicinity_threshold_m),
        }
    }

    /// Recognize all events of the episode.
    ///
    /// Tackles and regained possessions end a phase but are not recorded.
    pub fn find_events(&self) -> EventMap {
        let mut events = EventMap::new();
        for (frame, event) in self.detections().iter().filter_map(Detection::event) {
            log::info!("Frame {}. {}", frame, event);
            events.insert(frame, event);
        }
        events
    }

    /// Every detection in discovery order, transient ones included.
    pub fn detections(&self) -> Vec<Detection> {
        let mut state = ScanState::NoPossessor;
        let mut detections = Vec::new();
        for frame in 0..self.episode.len() {
            let (next, detection) = self.step(state, frame);
            if let Some(detection) = detection {
                detections.push(detection);
            }
            state = next;
        }
        detections
    }

    /// State transition for `frame`.
    pub fn step(&self, state: ScanState, frame: usize) -> (ScanState, Option<Detection>) {
        match state {
            ScanState::NoPossessor => match self.possession.closest_player(frame, true) {
                Some(possessor) => {
                    log::debug!("Frame {}. Player {} controls the ball.", frame, possessor);
                    (ScanState::Tracking { possessor }, None)
                }
                None => (state, None),
            },
            ScanState::Tracking { possessor } => {
                if self.possession.is_ball_faraway(possessor, frame) {
                    let event_frame = frame.saturating_sub(1);
                    log::debug!(
                        "Frame {}. Ball left player {} after frame {}.",
                        frame,
                        possessor,
                        event_frame
                    );
                    self.classify(possessor, event_frame, frame)
                } else {
                    (state, None)
                }
            }
            ScanState::Faraway {
                possessor,
                event_frame,
            } => self.classify(possessor, event_frame, frame),
        }
    }

    /// Decide what happened to a ball that left `possessor` after `event_frame`.
    fn classify(
        &self,
        possessor: usize,
        event_frame: usize,
        frame: usize,
    ) -> (ScanState, Option<Detection>) {
        let pitch = &self.config.pitch;
        let ball = self.episode.ball_at(frame);

        if crosses_sideline(&ball, pitch) {
            log::debug!("Frame {}. Ball crossed the sideline.", frame);
            let detection = self.verify_failed_pass(possessor, event_frame, frame, &ball);
            return (ScanState::NoPossessor, Some(detection));
        }

        if crosses_goal_line(&ball, pitch) {
            log::debug!("Frame {}. Ball crossed the goal line.", frame);
            let detection = if is_within_goal_mouth(&ball, pitch)
                && !pitch.goalkeepers.is_goalkeeper(possessor)
            {
                Detection::Event {
                    frame: event_frame,
                    event: Event::Shot { player: possessor },
                }
            } else {
                self.verify_failed_pass(possessor, event_frame, frame, &ball)
            };
            return (ScanState::NoPossessor, Some(detection));
        }

        let waiting = ScanState::Faraway {
            possessor,
            event_frame,
        };
        let Some(candidate) = self.possession.closest_player(frame, true) else {
            return (waiting, None);
        };
        log::debug!("Frame {}. Ball is in vicinity of player {}.", frame, candidate);

        if candidate == possessor {
            let detection = Detection::Retained {
                frame,
                player: possessor,
            };
            return (ScanState::Tracking { possessor }, Some(detection));
        }

        if !self.is_possession_changed(candidate, frame) {
            return (waiting, None);
        }

        let detection = if is_same_team(possessor, candidate) {
            Detection::Event {
                frame: event_frame,
                event: Event::Pass {
                    player: possessor,
                    target: candidate,
                },
            }
        } else {
            self.verify_shot(possessor, event_frame, frame, &ball)
        };
        (
            ScanState::Tracking {
                possessor: candidate,
            },
            Some(detection),
        )
    }

    /// Whether `candidate` really took over the ball at `frame`.
    ///
    /// True on the last frame, on a clear change of ball speed or direction, or
    /// when the candidate keeps the ball for the whole player grace period.
    fn is_possession_changed(&self, candidate: usize, frame: usize) -> bool {
        let last = self.episode.last_frame().unwrap_or(frame);
        if frame == last {
            log::debug!(
                "Frame {}. Last frame of the game. Player {} is considered to control the ball after.",
                frame,
                candidate
            );
            return true;
        }

        let t = &self.config.thresholds;
        let prev = frame.saturating_sub(t.grace_period_ball);
        let next = frame.saturating_add(t.grace_period_ball).min(last);
        if is_speed_changed(self.episode, prev, frame, next, t.min_speed_change_factor)
            || is_direction_changed(
                self.episode,
                prev,
                frame,
                next,
                t.min_trajectory_change_angle_rad,
            )
        {
            return true;
        }

        let furthest = frame.saturating_add(t.grace_period_player).min(last);
        self.possession.keeps_ball(candidate, frame..=furthest)
    }

    /// Failed pass from `possessor`, or a tackle when the ball barely moved.
    fn verify_failed_pass(
        &self,
        possessor: usize,
        event_frame: usize,
        frame: usize,
        ball: &Point,
    ) -> Detection {
        let origin = self.episode.player_at(possessor, event_frame);
        let travelled = (origin - ball).norm();
        if travelled < self.config.thresholds.min_failed_pass_length_m {
            log::debug!(
                "Frame {}. Ball travelled {:.3}m, less than the minimal failed pass length.",
                frame,
                travelled
            );
            return Detection::Tackle { frame };
        }

        // TODO: infer the target from the ball trajectory rather than proximity
        let target = self.possession.closest_teammate(frame, possessor, Some(ball));
        Detection::Event {
            frame: event_frame,
            event: Event::FailedPass {
                player: possessor,
                target,
            },
        }
    }

    /// Shot when the ball is in a goal area heading over the goal line inside the
    /// goal mouth; otherwise judged as a failed pass.
    fn verify_shot(
        &self,
        possessor: usize,
        event_frame: usize,
        frame: usize,
        ball: &Point,
    ) -> Detection {
        let pitch = &self.config.pitch;
        if is_in_goal_area(ball, pitch) && !pitch.goalkeepers.is_goalkeeper(possessor) {
            let mut trajectory =
                BallTrajectory::from_frame(self.episode, frame, &self.config.trajectory, pitch);
            if trajectory.any(|point| {
                reaches_goal_line(&point, pitch) && is_within_goal_mouth(&point, pitch)
            }) {
                return Detection::Event {
                    frame: event_frame,
                    event: Event::Shot { player: possessor },
                };
            }
        }
        self.verify_failed_pass(possessor, event_frame, frame, ball)
    }
}

/// Recognize events of `episode` under `config`.
pub fn recognize_episode(episode: &Episode, config: &RecognitionConfig) -> EventMap {
    EventRecognizer::new(episode, config).find_events()
}
