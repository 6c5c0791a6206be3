//! Directory listing for a tape side.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Supported audio file extensions.
const SUPPORTED_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "flac", "aac", "opus", "wma"];

/// Check if a file has a supported audio extension.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List the audio files of a folder, sorted by file name.
///
/// A missing folder is an empty side, not an error.
pub fn list_audio_files(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %dir.display(), "Side folder missing, treating as empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_audio_file(path))
        .collect();

    // read_dir order is platform dependent; ids must not be.
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
