//! # Evaluation
//!
//! Compares recognized events with hand labels.
//!
//! ## Matching
//!
//! An expected event matches an obtained one when both are structurally equal
//! and their frames differ by at most [`TIME_WINDOW_FRAMES`]. Frames are probed
//! in the order `f, f+1, f-1, f+2, f-2, f+3, f-3`; each obtained event can be
//! consumed by one expected event only.
//!
//! ## Scores
//!
//! - precision = tp / (tp + fp)
//! - recall = tp / (tp + fn)
//! - F-score = tp / (tp + ½(fp + fn))
//!
//! All rounded to 4 decimals, 0 when the denominator is 0. Per-category true
//! positives are derived as `expected - false negatives`.

mod report;

use serde::{Deserialize, Serialize};

use crate::dataset::EventMaps;
use crate::error::EvaluationError;
use crate::recognition::{Event, EventKind, EventMap};

/// Frames on either side of a label that still count as a match.
pub const TIME_WINDOW_FRAMES: usize = 3;

const SCORE_DECIMALS: i32 = 4;

// ============================================================================
// Counters
// ============================================================================

/// Events per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventCounters {
    pub total: usize,
    pub passes: usize,
    pub failed_passes: usize,
    pub shots: usize,
}

impl EventCounters {
    pub fn count(maps: &EventMaps) -> Self {
        maps.values().flat_map(EventMap::events).fold(
            Self::default(),
            |mut counters, event| {
                counters.add(event);
                counters
            },
        )
    }

    fn add(&mut self, event: &Event) {
        match event.kind() {
            EventKind::Pass => self.passes += 1,
            EventKind::FailedPass => self.failed_passes += 1,
            EventKind::Shot => self.shots += 1,
        }
        self.total += 1;
    }

    pub fn of(&self, kind: EventKind) -> usize {
        match kind {
            EventKind::Pass => self.passes,
            EventKind::FailedPass => self.failed_passes,
            EventKind::Shot => self.shots,
        }
    }
}

/// Raw match outcome of one or more sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchCounts {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

impl std::ops::AddAssign for MatchCounts {
    fn add_assign(&mut self, other: Self) {
        self.true_positive += other.true_positive;
        self.false_positive += other.false_positive;
        self.false_negative += other.false_negative;
    }
}

// ============================================================================
// Matching
// ============================================================================

/// Consume every expected event that has a match in `obtained`.
///
/// On return `expected` holds the undetected events and `obtained` the
/// incorrectly recognized ones.
pub fn compare_events(obtained: &mut EventMap, expected: &mut EventMap) -> MatchCounts {
    let mut counts = MatchCounts::default();
    let labels: Vec<(usize, Event)> = expected.iter().map(|(f, e)| (f, *e)).collect();
    for (frame, event) in labels {
        if find_match(frame, &event, obtained) {
            counts.true_positive += 1;
            expected.remove(frame);
        }
    }
    counts.false_negative = expected.len();
    counts.false_positive = obtained.len();
    counts
}

/// Look for `event` around `frame`, removing the first match from `obtained`.
pub fn find_match(frame: usize, event: &Event, obtained: &mut EventMap) -> bool {
    let offsets = (1..=TIME_WINDOW_FRAMES)
        .flat_map(|i| [frame.checked_add(i), frame.checked_sub(i)])
        .flatten();

    for candidate in std::iter::once(frame).chain(offsets) {
        if obtained.get(candidate) == Some(event) {
            obtained.remove(candidate);
            return true;
        }
    }
    false
}

// ============================================================================
// Statistics
// ============================================================================

/// Scores of one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub precision: f64,
    pub recall: f64,
    pub f_score: f64,
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

impl CategoryStats {
    pub fn new(true_positive: usize, false_positive: usize, false_negative: usize) -> Self {
        let tp = true_positive as f64;
        let fp = false_positive as f64;
        let fn_ = false_negative as f64;
        Self {
            precision: ratio(tp, tp + fp),
            recall: ratio(tp, tp + fn_),
            f_score: ratio(tp, tp + 0.5 * (fp + fn_)),
            true_positive,
            false_positive,
            false_negative,
        }
    }
}

impl From<MatchCounts> for CategoryStats {
    fn from(counts: MatchCounts) -> Self {
        Self::new(
            counts.true_positive,
            counts.false_positive,
            counts.false_negative,
        )
    }
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        round_to(numerator / denominator, SCORE_DECIMALS)
    } else {
        0.0
    }
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Event counts behind a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ComparisonCounters {
    pub expected: EventCounters,
    pub obtained: EventCounters,
    /// Recognized but unmatched
    pub false_positive: EventCounters,
    /// Labelled but not detected
    pub false_negative: EventCounters,
}

/// Full result of comparing an output with its labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    pub overall: CategoryStats,
    pub passes: CategoryStats,
    pub failed_passes: CategoryStats,
    pub shots: CategoryStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counters: Option<ComparisonCounters>,
}

impl Comparison {
    pub fn category(&self, kind: EventKind) -> &CategoryStats {
        match kind {
            EventKind::Pass => &self.passes,
            EventKind::FailedPass => &self.failed_passes,
            EventKind::Shot => &self.shots,
        }
    }
}

/// Compare every labelled sequence. Inputs are left untouched.
pub fn do_comparison(
    obtained: &EventMaps,
    expected: &EventMaps,
    include_counters: bool,
) -> Result<Comparison, EvaluationError> {
    if obtained.len() != expected.len() {
        return Err(EvaluationError::SequenceCountMismatch {
            obtained: obtained.len(),
            expected: expected.len(),
        });
    }

    let mut unmatched = obtained.clone();
    let mut undetected = expected.clone();
    let mut overall = MatchCounts::default();
    for (sequence, labels) in undetected.iter_mut() {
        let found = unmatched
            .get_mut(sequence)
            .ok_or_else(|| EvaluationError::MissingSequence(sequence.clone()))?;
        overall += compare_events(found, labels);
    }

    let expected_counts = EventCounters::count(expected);
    let fp_events = EventCounters::count(&unmatched);
    let fn_events = EventCounters::count(&undetected);
    let per_kind = |kind: EventKind| {
        CategoryStats::new(
            expected_counts.of(kind) - fn_events.of(kind),
            fp_events.of(kind),
            fn_events.of(kind),
        )
    };

    let comparison = Comparison {
        overall: overall.into(),
        passes: per_kind(EventKind::Pass),
        failed_passes: per_kind(EventKind::FailedPass),
        shots: per_kind(EventKind::Shot),
        counters: include_counters.then(|| ComparisonCounters {
            expected: expected_counts,
            obtained: EventCounters::count(obtained),
            false_positive: fp_events,
            false_negative: fn_events,
        }),
    };
    log::debug!(
        "Compared {} sequences: tp {}, fp {}, fn {}",
        expected.len(),
        overall.true_positive,
        overall.false_positive,
        overall.false_negative
    );
    Ok(comparison)
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn pass(player: usize, target: usize) -> Event {
        Event::Pass { player, target }
    }

    fn single(map: EventMap) -> EventMaps {
        BTreeMap::from([("sequence_1".to_string(), map)])
    }

    #[test]
    fn test_find_match_window_order() {
        // Both f+1 and f-1 hold the event; f+1 is probed first
        let mut obtained: EventMap = [(9, pass(1, 2)), (11, pass(1, 2))].into_iter().collect();
        assert!(find_match(10, &pass(1, 2), &mut obtained));
        assert_eq!(obtained.frames().collect::<Vec<_>>(), vec![9]);
    }

    #[test]
    fn test_find_match_exact_frame_first() {
        let mut obtained: EventMap = [(11, pass(1, 2)), (10, pass(1, 2))].into_iter().collect();
        assert!(find_match(10, &pass(1, 2), &mut obtained));
        assert_eq!(obtained.frames().collect::<Vec<_>>(), vec![11]);
    }

    #[test]
    fn test_find_match_limits() {
        let mut obtained: EventMap = [(14, pass(1, 2))].into_iter().collect();
        assert!(!find_match(10, &pass(1, 2), &mut obtained));
        assert!(find_match(11, &pass(1, 2), &mut obtained));

        // Near frame zero the window is clipped
        let mut obtained: EventMap = [(0, Event::Shot { player: 4 })].into_iter().collect();
        assert!(find_match(2, &Event::Shot { player: 4 }, &mut obtained));

        // Same frame, different target
        let mut obtained: EventMap = [(10, pass(1, 3))].into_iter().collect();
        assert!(!find_match(10, &pass(1, 2), &mut obtained));
        assert_eq!(obtained.len(), 1);
    }

    #[test]
    fn test_compare_events_consumes_matches() {
        let mut obtained: EventMap = [
            (10, pass(1, 2)),
            (30, Event::Shot { player: 2 }),
            (50, pass(4, 5)),
        ]
        .into_iter()
        .collect();
        let mut expected: EventMap = [
            (12, pass(1, 2)),
            (30, Event::Shot { player: 2 }),
            (70, Event::FailedPass { player: 6, target: 7 }),
        ]
        .into_iter()
        .collect();

        let counts = compare_events(&mut obtained, &mut expected);
        assert_eq!(
            counts,
            MatchCounts {
                true_positive: 2,
                false_positive: 1,
                false_negative: 1
            }
        );
        assert_eq!(obtained.frames().collect::<Vec<_>>(), vec![50]);
        assert_eq!(expected.frames().collect::<Vec<_>>(), vec![70]);
    }

    #[test]
    fn test_category_stats() {
        let stats = CategoryStats::new(6, 1, 2);
        assert_eq!(stats.precision, 0.8571);
        assert_eq!(stats.recall, 0.75);
        assert_eq!(stats.f_score, 0.8);

        let empty = CategoryStats::new(0, 0, 0);
        assert_eq!((empty.precision, empty.recall, empty.f_score), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_do_comparison_per_category() {
        let obtained = single(
            [
                (10, pass(1, 2)),
                (20, Event::Shot { player: 2 }),
                (40, Event::FailedPass { player: 3, target: 4 }),
            ]
            .into_iter()
            .collect(),
        );
        let expected = single(
            [
                (11, pass(1, 2)),
                (20, Event::Shot { player: 3 }),
            ]
            .into_iter()
            .collect(),
        );

        let comparison = do_comparison(&obtained, &expected, true).unwrap();
        assert_eq!(comparison.overall.true_positive, 1);
        assert_eq!(comparison.overall.false_positive, 2);
        assert_eq!(comparison.overall.false_negative, 1);
        assert_eq!(comparison.overall.f_score, 0.4);

        assert_eq!(comparison.passes.precision, 1.0);
        assert_eq!(comparison.shots.true_positive, 0);
        assert_eq!(comparison.shots.false_positive, 1);
        assert_eq!(comparison.shots.false_negative, 1);
        assert_eq!(comparison.failed_passes.precision, 0.0);

        let counters = comparison.counters.unwrap();
        assert_eq!(counters.expected.total, 2);
        assert_eq!(counters.obtained.total, 3);
        assert_eq!(counters.false_positive.failed_passes, 1);

        // Inputs are untouched
        assert_eq!(obtained["sequence_1"].len(), 3);
        assert!(do_comparison(&obtained, &expected, false)
            .unwrap()
            .counters
            .is_none());
    }

    #[test]
    fn test_do_comparison_sequence_errors() {
        let expected = single(EventMap::new());
        assert_eq!(
            do_comparison(&EventMaps::new(), &expected, false),
            Err(EvaluationError::SequenceCountMismatch {
                obtained: 0,
                expected: 1
            })
        );

        let other = BTreeMap::from([("sequence_2".to_string(), EventMap::new())]);
        assert_eq!(
            do_comparison(&other, &expected, false),
            Err(EvaluationError::MissingSequence("sequence_1".to_string()))
        );
    }

    #[test]
    fn test_perfect_match() {
        let maps = single([(5, pass(0, 1)), (9, Event::Shot { player: 1 })].into_iter().collect());
        let comparison = do_comparison(&maps, &maps, false).unwrap();
        assert_eq!(comparison.overall.f_score, 1.0);
        assert_eq!(comparison.passes.recall, 1.0);
        assert_eq!(comparison.failed_passes, CategoryStats::default());
    }
}
