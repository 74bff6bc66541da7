//! Recognized events and the frame-keyed event map.

use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An event that is kept in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Completed pass to a teammate
    Pass { player: usize, target: usize },
    /// Pass attempt that did not reach a teammate; `target` is inferred
    FailedPass { player: usize, target: usize },
    /// Shot on goal
    Shot { player: usize },
}

/// Event category, used for counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Pass,
    FailedPass,
    Shot,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::Pass, EventKind::FailedPass, EventKind::Shot];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Pass => "pass",
            EventKind::FailedPass => "failed_pass",
            EventKind::Shot => "shot",
        }
    }
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::Pass { .. } => EventKind::Pass,
            Event::FailedPass { .. } => EventKind::FailedPass,
            Event::Shot { .. } => EventKind::Shot,
        }
    }

    /// Acting player.
    pub fn player(&self) -> usize {
        match *self {
            Event::Pass { player, .. } | Event::FailedPass { player, .. } | Event::Shot { player } => {
                player
            }
        }
    }

    /// Pass target, `None` for shots.
    pub fn target(&self) -> Option<usize> {
        match *self {
            Event::Pass { target, .. } | Event::FailedPass { target, .. } => Some(target),
            Event::Shot { .. } => None,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Event::Pass { player, target } => write!(f, "Pass by player {} to {}.", player, target),
            Event::FailedPass { player, target } => {
                write!(f, "Failed pass by player {} to {}.", player, target)
            }
            Event::Shot { player } => write!(f, "Shot by player {}.", player),
        }
    }
}

/// Outcome of one classifier step that produced something.
///
/// `Tackle` and `Retained` end a possession phase without being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// A recorded event, keyed by the last frame the actor had the ball
    Event { frame: usize, event: Event },
    /// Ball travelled too little to be a pass attempt
    Tackle { frame: usize },
    /// The previous possessor got the ball back
    Retained { frame: usize, player: usize },
}

impl Detection {
    pub fn event(&self) -> Option<(usize, Event)> {
        match *self {
            Detection::Event { frame, event } => Some((frame, event)),
            _ => None,
        }
    }
}

/// Frame number → event, in discovery order, one event per frame.
///
/// Serializes as a JSON object keyed by decimal frame strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventMap {
    entries: Vec<(usize, Event)>,
}

impl EventMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert, replacing in place (keeping position) if `frame` is already present.
    pub fn insert(&mut self, frame: usize, event: Event) -> Option<Event> {
        match self.entries.iter_mut().find(|(f, _)| *f == frame) {
            Some((_, existing)) => Some(std::mem::replace(existing, event)),
            None => {
                self.entries.push((frame, event));
                None
            }
        }
    }

    pub fn get(&self, frame: usize) -> Option<&Event> {
        self.entries.iter().find(|(f, _)| *f == frame).map(|(_, e)| e)
    }

    pub fn remove(&mut self, frame: usize) -> Option<Event> {
        let idx = self.entries.iter().position(|(f, _)| *f == frame)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Event)> {
        self.entries.iter().map(|(f, e)| (*f, e))
    }

    pub fn frames(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|(f, _)| *f)
    }

    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.entries.iter().map(|(_, e)| e)
    }
}

impl FromIterator<(usize, Event)> for EventMap {
    fn from_iter<I: IntoIterator<Item = (usize, Event)>>(iter: I) -> Self {
        let mut map = EventMap::new();
        for (frame, event) in iter {
            map.insert(frame, event);
        }
        map
    }
}

impl Serialize for EventMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (frame, event) in &self.entries {
            map.serialize_entry(&frame.to_string(), event)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EventMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EventMapVisitor;

        impl<'de> Visitor<'de> for EventMapVisitor {
            type Value = EventMap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from frame numbers to events")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<EventMap, A::Error> {
                let mut map = EventMap::new();
                while let Some((key, event)) = access.next_entry::<String, Event>()? {
                    let frame = key.parse::<usize>().map_err(|_| {
                        de::Error::invalid_value(de::Unexpected::Str(&key), &"a frame number")
                    })?;
                    map.insert(frame, event);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(EventMapVisitor)
    }
}
