use std::path::PathBuf;

use splatter_mesh::MeshError;
use splatter_serde::{EncodeError, Platform};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid mesh: {0}")]
    InvalidMesh(#[from] MeshError),
    #[error("no usable faces: all {degenerate} faces are degenerate")]
    NoUsableFaces { degenerate: usize },
    #[error("failed to encode {platform} payload: {source}")]
    Encode {
        platform: Platform,
        #[source]
        source: EncodeError,
    },
    #[error("failed to prepare output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {platform} payload to {}: {source}", path.display())]
    Write {
        platform: Platform,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    /// The platform this error is specific to, if any.
    pub fn platform(&self) -> Option<Platform> {
        match self {
            Self::Encode { platform, .. } | Self::Write { platform, .. } => Some(*platform),
            _ => None,
        }
    }
}
