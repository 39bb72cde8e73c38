//! Atomic JSON checkpoint save/load.

use crate::data::{CheckpointData, SUPPORTED_VERSIONS};
use crate::error::{CheckpointError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Saves and loads simulation checkpoints under a single directory, using
/// a temp-file-then-rename pattern so a crash mid-write never leaves a
/// corrupt checkpoint behind.
pub struct Checkpointer {
    dir: PathBuf,
}

impl Checkpointer {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn filename(round_number: u64) -> String {
        format!("checkpoint_round_{round_number:04}.json")
    }

    pub fn save(&self, data: &CheckpointData) -> Result<PathBuf> {
        let filename = Self::filename(data.round_number);
        let path = self.dir.join(&filename);
        // Spec'd temp-file name appends `.tmp` after the full extension,
        // rather than replacing it.
        let temp_path = self.dir.join(format!("{filename}.tmp"));

        let contents = serde_json::to_string_pretty(data)?;
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, &path)?;

        Ok(path)
    }

    pub fn load(&self, path: &Path) -> Result<CheckpointData> {
        if !path.exists() {
            return Err(CheckpointError::NotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        let data: CheckpointData = serde_json::from_str(&contents)?;

        if !SUPPORTED_VERSIONS.contains(&data.version.as_str()) {
            return Err(CheckpointError::UnsupportedVersion(data.version));
        }

        Ok(data)
    }

    /// The most recent checkpoint in the directory, by round number.
    pub fn latest_checkpoint(&self) -> Result<Option<PathBuf>> {
        let mut checkpoints: Vec<PathBuf> = fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.starts_with("checkpoint_round_") && n.ends_with(".json"))
                    .unwrap_or(false)
            })
            .collect();
        checkpoints.sort();
        Ok(checkpoints.pop())
    }

    pub fn checkpoint_for_round(&self, round_number: u64) -> Option<PathBuf> {
        let path = self.dir.join(Self::filename(round_number));
        path.exists().then_some(path)
    }
}
