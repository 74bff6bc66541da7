//! Run manifest written next to every recognition output.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::RecognitionConfig;
use crate::dataset::{derived_path, write_json, Dataset, EventMaps};
use crate::error::DatasetError;
use crate::evaluation::EventCounters;

/// Provenance of one output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Creation time (RFC3339)
    pub created_at: String,
    /// SHA256 of the input dataset file (hex)
    pub dataset_sha256: String,
    /// Number of sequences processed
    pub sequences: usize,
    /// Recognized events by category
    pub events: EventCounters,
    /// Configuration the events were recognized with
    pub config: RecognitionConfig,
}

impl RunManifest {
    pub fn new(dataset: &Dataset, output: &EventMaps, config: &RecognitionConfig) -> Self {
        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            dataset_sha256: dataset.sha256().to_string(),
            sequences: output.len(),
            events: EventCounters::count(output),
            config: config.clone(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DatasetError> {
        write_json(path, self)
    }
}

/// `<out_dir>/<input stem>_manifest.json`.
pub fn manifest_path_for(input: &Path, out_dir: &Path) -> PathBuf {
    derived_path(input, out_dir, "_manifest.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognition::Event;
    use std::collections::BTreeMap;

    #[test]
    fn test_manifest_counts_and_saves() {
        let output: EventMaps = BTreeMap::from([
            (
                "sequence_1".to_string(),
                [
                    (3, Event::Pass { player: 1, target: 2 }),
                    (9, Event::Shot { player: 2 }),
                ]
                .into_iter()
                .collect(),
            ),
            ("sequence_2".to_string(), Default::default()),
        ]);
        let manifest = RunManifest::new(
            &Dataset::default(),
            &output,
            &RecognitionConfig::default(),
        );
        assert_eq!(manifest.sequences, 2);
        assert_eq!(manifest.events.total, 2);
        assert_eq!(manifest.events.shots, 1);
        assert!(chrono::DateTime::parse_from_rfc3339(&manifest.created_at).is_ok());

        let dir = tempfile::tempdir().unwrap();
        let path = manifest_path_for(Path::new("data/test_data.json"), dir.path());
        assert!(path.ends_with("test_data_manifest.json"));
        manifest.save(&path).unwrap();

        let loaded: RunManifest =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, manifest);
    }
}
