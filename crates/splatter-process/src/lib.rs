//! Mesh to splat preview conversion.
//!
//! [`convert`] runs the whole pipeline for one mesh: face analysis, splat
//! synthesis, encoding for every [`Platform`] and writing the payloads. It is
//! the only entry point the job pipeline needs.

pub mod args_file;
pub mod config;
pub mod convert;
pub mod error;
pub mod message;
pub mod output;
pub mod result;

pub use config::ConvertConfig;
pub use convert::{EncodedPayloads, convert, convert_with_progress, encode_all, mesh_to_splats};
pub use error::ConvertError;
pub use message::ConvertStage;
pub use output::preview_path;
pub use result::{ConversionResult, PlatformOutputs};

pub use splatter_mesh::Mesh;
pub use splatter_serde::Platform;
