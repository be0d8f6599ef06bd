use std::path::PathBuf;

use thiserror::Error;

use crate::graph::EntityId;

/// Top-level error type for pocket detection.
#[derive(Debug, Error)]
pub enum PocketError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Detection(#[from] DetectionError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Errors related to the structure of the adjacency graph.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("duplicate entity id: {0}")]
    DuplicateEntity(EntityId),
}

/// Errors raised while running the detection pipeline.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("detection superseded by a newer request")]
    Cancelled,
}

/// Errors raised while reading graph data from JSON.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid entity id {0:?}")]
    InvalidId(String),

    #[error("invalid edge key {0:?}, expected \"<entity>-<neighbor>\"")]
    InvalidEdgeKey(String),
}

/// Convenience type alias for results using [`PocketError`].
pub type Result<T> = std::result::Result<T, PocketError>;
