use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use splatter_serde::Platform;

use crate::error::ConvertError;

/// Locations of the three committed payloads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformOutputs {
    pub web: PathBuf,
    pub desktop: PathBuf,
    pub android: PathBuf,
}

impl PlatformOutputs {
    pub fn get(&self, platform: Platform) -> &PathBuf {
        match platform {
            Platform::Web => &self.web,
            Platform::Desktop => &self.desktop,
            Platform::Android => &self.android,
        }
    }
}

/// Outcome handed back to the job pipeline.
///
/// Serializes as `{"status": "success", "splat_count": .., "outputs": {..}}`
/// or `{"status": "error", "error": ".."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConversionResult {
    Success {
        splat_count: usize,
        outputs: PlatformOutputs,
    },
    #[serde(rename = "error")]
    Failure {
        error: String,
        /// Platform whose payload failed, for encode and write errors.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        platform: Option<Platform>,
        /// Files from this conversion that could not be cleaned up. They are
        /// incomplete and must not be served.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        invalid_outputs: Vec<PathBuf>,
    },
}

impl ConversionResult {
    pub(crate) fn failure(err: &ConvertError, invalid_outputs: Vec<PathBuf>) -> Self {
        Self::Failure {
            error: err.to_string(),
            platform: err.platform(),
            invalid_outputs,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn splat_count(&self) -> Option<usize> {
        match self {
            Self::Success { splat_count, .. } => Some(*splat_count),
            Self::Failure { .. } => None,
        }
    }

    pub fn outputs(&self) -> Option<&PlatformOutputs> {
        match self {
            Self::Success { outputs, .. } => Some(outputs),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error, .. } => Some(error),
        }
    }
}
