//! Path utilities for source files and output locations

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::domain::settings::SUPPORTED_FORMATS;
use crate::error::{SplitKitError, SplitKitResult};

/// Path helpers shared by the planner and the CLI
pub struct PathUtils;

impl PathUtils {
    /// Lower-cased extension without the dot, empty when there is none
    pub fn get_extension(path: &Path) -> String {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }

    /// File name without its final extension
    pub fn get_stem(path: &Path) -> SplitKitResult<String> {
        path.file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| SplitKitError::InvalidInput {
                path: path.display().to_string(),
                message: "cannot derive a base name".to_string(),
            })
    }

    /// Whether the extension is one of the supported audio formats
    pub fn is_supported_audio(path: &Path) -> bool {
        SUPPORTED_FORMATS.contains(&Self::get_extension(path).as_str())
    }

    /// Supported audio files under `dir`, sorted by path
    pub fn collect_audio_files(dir: &Path, recursive: bool) -> SplitKitResult<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(SplitKitError::InvalidInput {
                path: dir.display().to_string(),
                message: "not a directory".to_string(),
            });
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).max_depth(max_depth) {
            let entry = entry.map_err(|e| SplitKitError::InvalidInput {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
            if entry.file_type().is_file() && Self::is_supported_audio(entry.path()) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Directory the segments of `input` land in when none is configured
    pub fn default_output_dir(input: &Path) -> PathBuf {
        match input.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}
