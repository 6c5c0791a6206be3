//! Shared data types returned by the API.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::AppError;
use crate::library::Library;
use crate::session::SessionStore;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<Library>,
    pub session: Arc<SessionStore>,
}

impl AppState {
    pub fn new(library: Library) -> Self {
        Self {
            library: Arc::new(library),
            session: Arc::new(SessionStore::default()),
        }
    }
}

/// One of the two sides of the tape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            _ => Err(AppError::unknown_side(s)),
        }
    }
}

/// Metadata extracted from a file's tags, with fallbacks already applied.
///
/// This is what the metadata cache stores per file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_cover_url: Option<String>,
}

/// A playable track as listed in a playlist.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// `{side}-{index}`, index being zero-based.
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub filename: String,
    pub url: String,
    pub album_cover_url: Option<String>,
    pub size_bytes: u64,
    /// 1-based position within the side.
    pub ordinal: usize,
}

/// Both sides of the tape.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlists {
    pub side_a: Vec<Track>,
    pub side_b: Vec<Track>,
}

impl Playlists {
    pub fn counts(&self) -> TrackCounts {
        TrackCounts {
            side_a: self.side_a.len(),
            side_b: self.side_b.len(),
        }
    }
}

/// Number of tracks per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackCounts {
    pub side_a: usize,
    pub side_b: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_parsing_is_case_insensitive() {
        assert_eq!("a".parse::<Side>().unwrap(), Side::A);
        assert_eq!("B".parse::<Side>().unwrap(), Side::B);
        assert!(matches!("c".parse::<Side>(), Err(AppError::NotFound(_))));
        assert!("".parse::<Side>().is_err());
    }

    #[test]
    fn test_track_serializes_camel_case() {
        let track = Track {
            id: "A-0".to_string(),
            title: "Song".to_string(),
            artist: "Unknown Artist".to_string(),
            album: "Unknown Album".to_string(),
            filename: "song.mp3".to_string(),
            url: "/musics/sideA/song.mp3".to_string(),
            album_cover_url: None,
            size_bytes: 42,
            ordinal: 1,
        };

        let json = serde_json::to_value(&track).unwrap();
        assert_eq!(json["albumCoverUrl"], serde_json::Value::Null);
        assert_eq!(json["sizeBytes"], 42);
        assert_eq!(json["ordinal"], 1);
    }
}
