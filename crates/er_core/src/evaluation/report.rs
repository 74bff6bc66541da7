//! Human-readable comparison report.

use std::fmt;

use super::{CategoryStats, Comparison, EventCounters};
use crate::recognition::EventKind;

fn category_title(kind: EventKind) -> &'static str {
    match kind {
        EventKind::Pass => "Passes",
        EventKind::FailedPass => "Failed Passes",
        EventKind::Shot => "Shots",
    }
}

fn write_counters(f: &mut fmt::Formatter, title: &str, counters: &EventCounters) -> fmt::Result {
    writeln!(f, "{}", title)?;
    writeln!(
        f,
        "\tPasses: {}, failed passes: {}, shots: {}",
        counters.passes, counters.failed_passes, counters.shots
    )?;
    writeln!(f, "\tTotal number of events: {}", counters.total)
}

fn write_scores(f: &mut fmt::Formatter, stats: &CategoryStats) -> fmt::Result {
    writeln!(f, "\t\tPrecision: {:.2}%", stats.precision * 100.0)?;
    writeln!(f, "\t\tRecall: {:.2}%", stats.recall * 100.0)?;
    writeln!(f, "\t\tF-Score: {:.2}%", stats.f_score * 100.0)
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(counters) = &self.counters {
            write_counters(f, "Expected events:", &counters.expected)?;
            write_counters(f, "Obtained events:", &counters.obtained)?;
            write_counters(
                f,
                "False Positive (recognized incorrectly) events:",
                &counters.false_positive,
            )?;
            write_counters(
                f,
                "False Negative (not detected) events:",
                &counters.false_negative,
            )?;
        }

        writeln!(f, "\nPrecision and recall by category:")?;
        for kind in EventKind::ALL {
            writeln!(f, "\t{}:", category_title(kind))?;
            write_scores(f, self.category(kind))?;
        }

        writeln!(f, "\nOverall statistics:")?;
        writeln!(
            f,
            "Recognized correctly: {}, incorrectly: {}; not detected: {}.",
            self.overall.true_positive, self.overall.false_positive, self.overall.false_negative
        )?;
        write_scores(f, &self.overall)
    }
}
