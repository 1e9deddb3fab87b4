use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dataset directory not found: {0}")]
    DatasetNotFound(PathBuf),

    #[error("Dataset directory contains no samples: {0}")]
    EmptyDataset(PathBuf),

    #[error("Label index not found: {0}")]
    LabelIndexNotFound(PathBuf),

    #[error("Malformed label record at line {line}: {reason}")]
    LabelParse { line: usize, reason: String },

    #[error("No label entry for sample: {0}")]
    MissingLabel(String),

    #[error("Unknown network name: {0}")]
    UnknownNetwork(String),

    #[error("Unsupported preprocessing mode: {0}")]
    UnsupportedPreprocess(String),

    #[error("Model loading error: {0}")]
    ModelLoad(String),

    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
