use std::{
    fs,
    path::{Path, PathBuf},
};

use splatter_serde::Platform;

use crate::{error::ConvertError, result::PlatformOutputs};

const STAGING_SUFFIX: &str = "partial";

/// Conventional location of a platform payload inside a conversion's output
/// directory.
pub fn preview_path(output_dir: &Path, platform: Platform) -> PathBuf {
    output_dir.join(platform.file_name())
}

fn staging_path(output_dir: &Path, platform: Platform) -> PathBuf {
    output_dir.join(format!("{}.{STAGING_SUFFIX}", platform.file_name()))
}

/// Remove a payload file. Returns whether something was removed; anything
/// that is not a file was never written by a conversion and is left alone.
fn remove_payload_file(path: &Path) -> std::io::Result<bool> {
    let removed = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(false),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    };
    match removed {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Writes payloads next to their final location and only moves them into
/// place once all of them were written.
///
/// Every file this writer touched is tracked, so a failed conversion can
/// remove all of them again.
pub(crate) struct StagedOutput {
    dir: PathBuf,
    staged: Vec<(Platform, PathBuf)>,
    committed: Vec<PathBuf>,
}

impl StagedOutput {
    /// Prepare `dir`, removing payloads of any earlier conversion so a failed
    /// run cannot leave an older, mismatched set behind.
    pub(crate) fn create(dir: &Path) -> Result<Self, ConvertError> {
        let dir_err = |source| ConvertError::OutputDir {
            path: dir.to_path_buf(),
            source,
        };

        fs::create_dir_all(dir).map_err(dir_err)?;
        for platform in Platform::ALL {
            for path in [preview_path(dir, platform), staging_path(dir, platform)] {
                if remove_payload_file(&path).map_err(dir_err)? {
                    log::info!("Removed previous payload {}", path.display());
                }
            }
        }

        Ok(Self {
            dir: dir.to_path_buf(),
            staged: vec![],
            committed: vec![],
        })
    }

    pub(crate) fn stage(&mut self, platform: Platform, bytes: &[u8]) -> Result<(), ConvertError> {
        let path = staging_path(&self.dir, platform);
        // Track before writing, a failed write can still leave a file behind.
        self.staged.push((platform, path.clone()));
        fs::write(&path, bytes).map_err(|source| ConvertError::Write {
            platform,
            path,
            source,
        })
    }

    /// Move every staged payload to its final name. On failure the payloads
    /// not yet moved stay staged, so [`Self::rollback`] still sees them.
    pub(crate) fn commit(&mut self) -> Result<PlatformOutputs, ConvertError> {
        let mut pending = std::mem::take(&mut self.staged).into_iter();
        while let Some((platform, staged)) = pending.next() {
            let target = preview_path(&self.dir, platform);
            if let Err(source) = fs::rename(&staged, &target) {
                self.staged.push((platform, staged));
                self.staged.extend(pending);
                return Err(ConvertError::Write {
                    platform,
                    path: target,
                    source,
                });
            }
            self.committed.push(target);
        }

        Ok(PlatformOutputs {
            web: preview_path(&self.dir, Platform::Web),
            desktop: preview_path(&self.dir, Platform::Desktop),
            android: preview_path(&self.dir, Platform::Android),
        })
    }

    /// Remove everything written so far. Returns the files that could not be
    /// removed.
    pub(crate) fn rollback(self) -> Vec<PathBuf> {
        self.staged
            .into_iter()
            .map(|(_, path)| path)
            .chain(self.committed)
            .filter(|path| match remove_payload_file(path) {
                Ok(_) => false,
                Err(e) => {
                    log::warn!("Failed to remove incomplete payload {}: {e}", path.display());
                    true
                }
            })
            .collect()
    }
}
