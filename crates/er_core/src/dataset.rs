//! # Dataset I/O and Batch Recognition
//!
//! Input datasets are JSON objects mapping sequence ids to frame arrays:
//! `{"sequence_1": [[x0, y0, ..., ball_x, ball_y], ...], ...}`.
//! Outputs and hand labels share one shape: sequence id → event map.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::RecognitionConfig;
use crate::episode::Episode;
use crate::error::{DatasetError, EpisodeError};
use crate::recognition::{recognize_episode, EventMap};

/// Event maps of many sequences, ordered by sequence id.
pub type EventMaps = BTreeMap<String, EventMap>;

/// All episodes of one input file.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Dataset {
    sequences: BTreeMap<String, Episode>,
    #[serde(skip)]
    sha256: String,
}

impl Dataset {
    /// Validate raw frame arrays per sequence.
    pub fn from_raw(raw: BTreeMap<String, Vec<Vec<f64>>>) -> Result<Self, EpisodeError> {
        let mut sequences = BTreeMap::new();
        for (sequence, frames) in raw {
            if sequence.trim().is_empty() {
                return Err(EpisodeError::EmptySequenceId);
            }
            let episode = Episode::new(frames).map_err(|source| EpisodeError::InSequence {
                sequence: sequence.clone(),
                source: Box::new(source),
            })?;
            sequences.insert(sequence, episode);
        }
        Ok(Self {
            sequences,
            sha256: String::new(),
        })
    }

    pub fn from_episodes(sequences: BTreeMap<String, Episode>) -> Self {
        Self {
            sequences,
            sha256: String::new(),
        }
    }

    pub fn get(&self, sequence: &str) -> Result<&Episode, DatasetError> {
        self.sequences
            .get(sequence)
            .ok_or_else(|| DatasetError::SequenceNotFound(sequence.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Episode)> {
        self.sequences.iter()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Checksum of the file the dataset was read from (empty when built in memory).
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Keep only `sequence`, for single-sequence debugging.
    pub fn restrict_to(&self, sequence: &str) -> Result<Dataset, DatasetError> {
        let episode = self.get(sequence)?.clone();
        Ok(Dataset {
            sequences: BTreeMap::from([(sequence.to_string(), episode)]),
            sha256: self.sha256.clone(),
        })
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Read and validate a dataset file.
pub fn load_dataset(path: &Path) -> Result<Dataset, DatasetError> {
    let bytes = fs::read(path).map_err(|e| DatasetError::io(path, e))?;
    let raw: BTreeMap<String, Vec<Vec<f64>>> =
        serde_json::from_slice(&bytes).map_err(|e| DatasetError::json(path, e))?;
    let mut dataset = Dataset::from_raw(raw)?;
    dataset.sha256 = sha256_hex(&bytes);
    log::info!(
        "Loaded {} sequences from {}",
        dataset.len(),
        path.display()
    );
    Ok(dataset)
}

/// Read event maps (labels or a previous output).
pub fn load_event_maps(path: &Path) -> Result<EventMaps, DatasetError> {
    let text = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
    serde_json::from_str(&text).map_err(|e| DatasetError::json(path, e))
}

/// Write event maps as pretty JSON, creating parent directories.
pub fn save_event_maps(path: &Path, maps: &EventMaps) -> Result<(), DatasetError> {
    write_json(path, maps)
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), DatasetError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DatasetError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(value).map_err(|e| DatasetError::json(path, e))?;
    fs::write(path, json).map_err(|e| DatasetError::io(path, e))?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

/// `<out_dir>/<input stem><suffix>`.
pub fn derived_path(input: &Path, out_dir: &Path, suffix: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    out_dir.join(format!("{}{}", stem, suffix))
}

/// `<out_dir>/<input stem>_out.json`.
pub fn output_path_for(input: &Path, out_dir: &Path) -> PathBuf {
    derived_path(input, out_dir, "_out.json")
}

/// Recognize every sequence, in parallel.
pub fn recognize_dataset(dataset: &Dataset, config: &RecognitionConfig) -> EventMaps {
    dataset
        .sequences
        .par_iter()
        .map(|(sequence, episode)| {
            log::debug!("Processing {}", sequence);
            (sequence.clone(), recognize_episode(episode, config))
        })
        .collect()
}
