//! Core domain: persisted "levels unlocked" progress.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROGRESS_PATH: &str = "saves/progress.json";

/// Error type for progress persistence failures.
#[derive(Debug)]
pub struct ProgressError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ProgressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Progress store {}: {}", self.path, self.message)
    }
}

impl std::error::Error for ProgressError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SaveData {
    levels_unlocked: u32,
}

/// Loads and saves the single persisted integer.
pub trait ProgressStore {
    fn load(&self) -> Result<u32, ProgressError>;
    fn save(&self, levels_unlocked: u32) -> Result<(), ProgressError>;
}

#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn error(&self, message: impl Into<String>) -> ProgressError {
        ProgressError {
            path: self.path.display().to_string(),
            message: message.into(),
        }
    }
}

impl Default for FileProgressStore {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_PATH)
    }
}

impl ProgressStore for FileProgressStore {
    /// A missing save file is created with one unlocked level.
    fn load(&self) -> Result<u32, ProgressError> {
        if !Path::new(&self.path).exists() {
            self.save(1)?;
            return Ok(1);
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| self.error(format!("IO error: {}", e)))?;
        let data: SaveData = serde_json::from_str(&contents)
            .map_err(|e| self.error(format!("Parse error: {}", e)))?;

        Ok(data.levels_unlocked)
    }

    fn save(&self, levels_unlocked: u32) -> Result<(), ProgressError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| self.error(format!("IO error: {}", e)))?;
            }
        }

        let json = serde_json::to_string_pretty(&SaveData { levels_unlocked })
            .map_err(|e| self.error(format!("Encode error: {}", e)))?;
        fs::write(&self.path, json).map_err(|e| self.error(format!("IO error: {}", e)))
    }
}

/// In-memory view of the persisted progress
#[derive(Resource, Debug)]
pub struct Progress {
    pub levels_unlocked: u32,
    store: FileProgressStore,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            levels_unlocked: 1,
            store: FileProgressStore::default(),
        }
    }
}

impl Progress {
    pub fn with_store(store: FileProgressStore) -> Self {
        Self {
            levels_unlocked: 1,
            store,
        }
    }

    pub fn load(&mut self) -> Result<u32, ProgressError> {
        self.levels_unlocked = self.store.load()?;
        Ok(self.levels_unlocked)
    }

    /// Unlocks the next level when `level_number` is the furthest reached.
    /// Returns true if the counter advanced.
    pub fn complete_level(&mut self, level_number: u32) -> Result<bool, ProgressError> {
        if self.levels_unlocked > level_number {
            return Ok(false);
        }

        self.levels_unlocked += 1;
        self.store.save(self.levels_unlocked)?;
        Ok(true)
    }
}
