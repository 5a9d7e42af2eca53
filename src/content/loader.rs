//! Loader for RON content files at startup.

use bevy::prelude::*;
use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::validation::validate_level;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Parse a single RON struct from text.
pub fn parse_single<T>(file_name: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Load a single RON struct from disk.
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    parse_single(&file_name, &contents)
}

pub fn load_tuning(base_path: &Path) -> Result<GameplayTuning, ContentLoadError> {
    load_single_file(&base_path.join("tuning.ron"))
}

/// Load `level_N.ron` and reject levels that fail validation.
pub fn load_level(
    base_path: &Path,
    level_number: u32,
    default_goal: u32,
) -> Result<LevelDef, ContentLoadError> {
    let path = base_path.join(format!("level_{}.ron", level_number));
    let level: LevelDef = load_single_file(&path)?;

    let errors = validate_level(&level, default_goal);
    if !errors.is_empty() {
        for error in &errors {
            warn!("{}", error);
        }
        return Err(ContentLoadError {
            file: path.display().to_string(),
            message: format!("{} validation error(s)", errors.len()),
        });
    }
    Ok(level)
}
