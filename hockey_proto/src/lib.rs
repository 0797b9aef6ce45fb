//! Persisted formats for the air hockey table
//!
//! Scene documents are JSON so they can be edited by hand. Frame snapshots use
//! postcard for compact binary recordings.

pub mod scene;
pub mod snapshot;

pub use scene::*;
pub use snapshot::*;

/// Errors raised while reading or writing persisted data
#[derive(Debug, thiserror::Error)]
pub enum ProtoError {
    #[error("scene json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot encoding error: {0}")]
    Postcard(#[from] postcard::Error),

    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
