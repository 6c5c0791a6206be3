//! Embedded tag and cover art extraction.

use lofty::file::TaggedFileExt;
use lofty::prelude::Accessor;
use lofty::read_from_path;
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::models::TrackMetadata;

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";

lazy_static::lazy_static! {
    static ref TITLE_SEPARATORS: Regex = Regex::new(r"[_-]").unwrap();
}

/// Raw values found in a file's tag. Blank values are `None`.
#[derive(Debug, Default)]
pub struct EmbeddedTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    /// Bytes of the first embedded picture.
    pub cover: Option<Vec<u8>>,
}

fn non_blank(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read the tag of an audio file.
///
/// Returns `None` when the file cannot be parsed or carries no tag at all.
pub fn read_embedded(path: &Path) -> Option<EmbeddedTags> {
    let tagged_file = match read_from_path(path) {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Could not parse tags");
            return None;
        }
    };

    let tag = tagged_file
        .primary_tag()
        .or_else(|| tagged_file.first_tag())?;

    Some(EmbeddedTags {
        title: non_blank(tag.title()),
        artist: non_blank(tag.artist()),
        album: non_blank(tag.album()),
        cover: tag.pictures().first().map(|p| p.data().to_vec()),
    })
}

/// Title derived from a file name: the stem with `_` and `-` turned into spaces.
pub fn title_from_filename(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    TITLE_SEPARATORS.replace_all(&stem, " ").into_owned()
}

/// Write cover bytes to `{covers_dir}/{track_id}.jpg` and return its URL.
fn save_cover(covers_dir: &Path, track_id: &str, bytes: &[u8]) -> Option<String> {
    let file_name = format!("{}.jpg", track_id);
    let target = covers_dir.join(&file_name);

    match fs::write(&target, bytes) {
        Ok(()) => {
            tracing::debug!(path = %target.display(), size = bytes.len(), "Saved cover");
            Some(format!("/covers/{}", file_name))
        }
        Err(e) => {
            tracing::warn!(path = %target.display(), error = %e, "Failed to save cover");
            None
        }
    }
}

/// Build the metadata of a track, falling back to defaults for missing tags.
///
/// Never fails: an unreadable file yields the file name derived title and
/// unknown artist/album.
pub fn read_metadata(path: &Path, track_id: &str, covers_dir: &Path) -> TrackMetadata {
    let tags = read_embedded(path).unwrap_or_default();

    let album_cover_url = tags
        .cover
        .as_deref()
        .and_then(|bytes| save_cover(covers_dir, track_id, bytes));

    TrackMetadata {
        title: tags.title.unwrap_or_else(|| title_from_filename(path)),
        artist: tags.artist.unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        album: tags.album.unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        album_cover_url,
    }
}
