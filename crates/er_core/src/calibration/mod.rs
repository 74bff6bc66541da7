//! # Threshold Calibration
//!
//! One-at-a-time parameter sweeps against a labelled dataset.
//!
//! ## Algorithm
//! 1. Take the grid of values for one [`TuningParameter`]
//! 2. For each value, clone the base configuration and set the parameter
//! 3. Recognize the whole dataset and compare it with the labels
//! 4. Collect one [`SweepRow`] per value, in grid order
//!
//! Every grid point runs on its own configuration value, so points are
//! evaluated in parallel.

mod parameter;

pub use parameter::TuningParameter;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::RecognitionConfig;
use crate::dataset::{recognize_dataset, Dataset, EventMaps};
use crate::error::CalibrationError;
use crate::evaluation::{do_comparison, CategoryStats, Comparison};

/// Scores for one parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRow {
    pub value: f64,
    pub comparison: Comparison,
}

impl SweepRow {
    fn overall(&self) -> &CategoryStats {
        &self.comparison.overall
    }
}

/// Evaluate every grid value of `parameter`.
pub fn sweep(
    parameter: TuningParameter,
    dataset: &Dataset,
    labels: &EventMaps,
    base: &RecognitionConfig,
) -> Result<Vec<SweepRow>, CalibrationError> {
    sweep_values(parameter, &parameter.values(), dataset, labels, base)
}

/// Evaluate `parameter` at the given values.
pub fn sweep_values(
    parameter: TuningParameter,
    values: &[f64],
    dataset: &Dataset,
    labels: &EventMaps,
    base: &RecognitionConfig,
) -> Result<Vec<SweepRow>, CalibrationError> {
    log::info!(
        "Sweeping {} over {} values (base {})",
        parameter,
        values.len(),
        parameter.get(base)
    );
    values
        .par_iter()
        .map(|&value| -> Result<SweepRow, CalibrationError> {
            let config = parameter.apply(base, value);
            let obtained = recognize_dataset(dataset, &config);
            let comparison = do_comparison(&obtained, labels, false)?;
            log::debug!(
                "{} = {}: F-score {}",
                parameter,
                value,
                comparison.overall.f_score
            );
            Ok(SweepRow { value, comparison })
        })
        .collect()
}

/// Row with the highest overall F-score (first one on ties).
pub fn best_row(rows: &[SweepRow]) -> Option<&SweepRow> {
    rows.iter().fold(None, |best: Option<&SweepRow>, row| match best {
        Some(b) if b.overall().f_score >= row.overall().f_score => Some(b),
        _ => Some(row),
    })
}

// ============================================================================
// CSV output
// ============================================================================

const CATEGORIES: [&str; 3] = ["passes", "failed_passes", "shots"];

/// `<dir>/[full_]<parameter>.csv`.
pub fn sweep_csv_path(dir: &Path, parameter: TuningParameter, full: bool) -> PathBuf {
    let prefix = if full { "full_" } else { "" };
    dir.join(format!("{}{}.csv", prefix, parameter.name()))
}

fn header(parameter: TuningParameter, full: bool) -> Vec<String> {
    let mut header: Vec<String> = [parameter.name(), "precision", "recall", "f-score"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    if full {
        for category in CATEGORIES {
            for score in ["precision", "recall", "f_score"] {
                header.push(format!("{}_{}", category, score));
            }
        }
    }
    header
}

fn record(row: &SweepRow, full: bool) -> Vec<String> {
    let scores = |stats: &CategoryStats| {
        [stats.precision, stats.recall, stats.f_score]
            .into_iter()
            .map(|v| v.to_string())
    };
    let mut record = vec![row.value.to_string()];
    record.extend(scores(row.overall()));
    if full {
        let c = &row.comparison;
        for stats in [&c.passes, &c.failed_passes, &c.shots] {
            record.extend(scores(stats));
        }
    }
    record
}

/// Write sweep rows as CSV into `dir`, returning the file path.
pub fn write_sweep_csv(
    dir: &Path,
    parameter: TuningParameter,
    rows: &[SweepRow],
    full: bool,
) -> Result<PathBuf, CalibrationError> {
    fs::create_dir_all(dir).map_err(|source| CalibrationError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = sweep_csv_path(dir, parameter, full);

    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(header(parameter, full))?;
    for row in rows {
        writer.write_record(record(row, full))?;
    }
    writer.flush().map_err(|source| CalibrationError::Io {
        path: path.clone(),
        source,
    })?;

    log::info!("Saved {} rows to {}", rows.len(), path.display());
    Ok(path)
}

// ========== Tests ==========
