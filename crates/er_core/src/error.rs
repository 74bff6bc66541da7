use std::path::PathBuf;

use thiserror::Error;

/// Malformed tracking data.
#[derive(Error, Debug)]
pub enum EpisodeError {
    #[error("Frame {frame} has {found} values, expected {expected}")]
    InvalidFrameLength {
        frame: usize,
        found: usize,
        expected: usize,
    },

    #[error("Empty sequence id")]
    EmptySequenceId,

    #[error("Sequence {sequence}: {source}")]
    InSequence {
        sequence: String,
        #[source]
        source: Box<EpisodeError>,
    },
}

/// Invalid or unreadable recognition configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Dataset, label and output file failures.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Episode(#[from] EpisodeError),

    #[error("Sequence not found: {0}")]
    SequenceNotFound(String),
}

/// Obtained and expected outputs that cannot be compared.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Sequence count mismatch: obtained {obtained}, expected {expected}")]
    SequenceCountMismatch { obtained: usize, expected: usize },

    #[error("Sequence {0} missing from obtained output")]
    MissingSequence(String),
}

/// Parameter sweep failures.
#[derive(Error, Debug)]
pub enum CalibrationError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("Unknown tuning parameter: {0}")]
    UnknownParameter(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DatasetError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &std::path::Path, source: serde_json::Error) -> Self {
        DatasetError::Json {
            path: path.to_path_buf(),
            source,
        }
    }
}
