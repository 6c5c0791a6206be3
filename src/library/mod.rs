//! Music library: scans both tape sides and caches their tag metadata.

pub mod cache;
pub mod scan;
pub mod tags;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::AppResult;
use crate::models::{Playlists, Side, Track};

pub use cache::MetadataCache;

/// A side folder and the URL it is served under below `/musics`.
#[derive(Debug, Clone)]
struct SideFolder {
    path: PathBuf,
    /// Percent-encoded per segment, so nested folders keep their `/`.
    url_path: String,
}

impl SideFolder {
    fn new(music_dir: &Path, name: &str) -> Self {
        let url_path = name
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");

        Self {
            path: music_dir.join(name),
            url_path,
        }
    }
}

/// Scanner over the two side folders.
#[derive(Debug)]
pub struct Library {
    side_a: SideFolder,
    side_b: SideFolder,
    covers_dir: PathBuf,
    cache: MetadataCache,
}

impl Library {
    pub fn new(
        music_dir: impl AsRef<Path>,
        side_a_dir: &str,
        side_b_dir: &str,
        covers_dir: impl Into<PathBuf>,
    ) -> Self {
        let music_dir = music_dir.as_ref();
        Self {
            side_a: SideFolder::new(music_dir, side_a_dir),
            side_b: SideFolder::new(music_dir, side_b_dir),
            covers_dir: covers_dir.into(),
            cache: MetadataCache::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.music_dir,
            &config.side_a_dir,
            &config.side_b_dir,
            config.covers_dir.clone(),
        )
    }

    pub fn cache(&self) -> &MetadataCache {
        &self.cache
    }

    fn folder(&self, side: Side) -> &SideFolder {
        match side {
            Side::A => &self.side_a,
            Side::B => &self.side_b,
        }
    }

    /// Scan one side. Tags are read only for files missing from the cache.
    pub fn scan_side(&self, side: Side) -> AppResult<Vec<Track>> {
        let folder = self.folder(side);

        let tracks = scan::list_audio_files(&folder.path)?
            .into_iter()
            .enumerate()
            .map(|(index, path)| self.build_track(side, folder, index, path))
            .collect::<AppResult<Vec<_>>>()?;

        tracing::debug!(side = %side, count = tracks.len(), "Scanned side");
        Ok(tracks)
    }

    /// Scan both sides.
    pub fn scan(&self) -> AppResult<Playlists> {
        let playlists = Playlists {
            side_a: self.scan_side(Side::A)?,
            side_b: self.scan_side(Side::B)?,
        };

        let counts = playlists.counts();
        tracing::info!(
            side_a = counts.side_a,
            side_b = counts.side_b,
            cached = self.cache.len(),
            "Library scanned"
        );
        Ok(playlists)
    }

    /// Forget every cached entry, then scan again.
    pub fn refresh(&self) -> AppResult<Playlists> {
        let removed = self.cache.clear();
        tracing::info!(removed, "Metadata cache cleared");
        self.scan()
    }

    fn build_track(
        &self,
        side: Side,
        folder: &SideFolder,
        index: usize,
        path: PathBuf,
    ) -> AppResult<Track> {
        let id = format!("{}-{}", side, index);
        let size_bytes = fs::metadata(&path)?.len();
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let metadata = match self.cache.lookup(&path) {
            Some(metadata) => metadata,
            None => {
                let metadata = tags::read_metadata(&path, &id, &self.covers_dir);
                tracing::debug!(path = %path.display(), title = %metadata.title, "Read tags");
                self.cache.store(path.clone(), metadata.clone());
                metadata
            }
        };

        Ok(Track {
            url: format!(
                "/musics/{}/{}",
                folder.url_path,
                urlencoding::encode(&filename)
            ),
            id,
            title: metadata.title,
            artist: metadata.artist,
            album: metadata.album,
            filename,
            album_cover_url: metadata.album_cover_url,
            size_bytes,
            ordinal: index + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackMetadata;
    use tempfile::{tempdir, TempDir};

    fn library_with(side_a: &[&str], side_b: &[&str]) -> (TempDir, Library) {
        let dir = tempdir().unwrap();
        let music = dir.path().join("musics");
        for (folder, files) in [("sideA", side_a), ("sideB", side_b)] {
            fs::create_dir_all(music.join(folder)).unwrap();
            for name in files {
                fs::write(music.join(folder).join(name), b"not really audio").unwrap();
            }
        }
        let covers = dir.path().join("covers");
        fs::create_dir_all(&covers).unwrap();

        let library = Library::new(&music, "sideA", "sideB", covers);
        (dir, library)
    }

    #[test]
    fn test_scan_assigns_ids_and_ordinals() {
        let (_dir, library) = library_with(&["02-track.mp3", "01_song.mp3"], &[]);

        let tracks = library.scan_side(Side::A).unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, "A-0");
        assert_eq!(tracks[0].ordinal, 1);
        assert_eq!(tracks[0].title, "01 song");
        assert_eq!(tracks[0].url, "/musics/sideA/01_song.mp3");
        assert_eq!(tracks[0].size_bytes, 16);
        assert_eq!(tracks[1].id, "A-1");
        assert_eq!(tracks[1].ordinal, 2);
        assert_eq!(tracks[1].title, "02 track");
    }

    #[test]
    fn test_count_matches_allow_list() {
        let (_dir, library) = library_with(
            &["a.mp3", "b.FLAC", "readme.txt", "c.m4a"],
            &["d.wav", "cover.png"],
        );

        let playlists = library.scan().unwrap();

        assert_eq!(playlists.side_a.len(), 3);
        assert_eq!(playlists.side_b.len(), 1);
        assert_eq!(playlists.side_b[0].id, "B-0");
    }

    #[test]
    fn test_missing_side_is_empty() {
        let dir = tempdir().unwrap();
        let library = Library::new(dir.path(), "sideA", "sideB", dir.path().join("covers"));

        let playlists = library.scan().unwrap();

        assert!(playlists.side_a.is_empty());
        assert!(playlists.side_b.is_empty());
    }

    #[test]
    fn test_repeated_scans_are_stable() {
        let (_dir, library) = library_with(&["c.mp3", "a.mp3", "b.mp3"], &[]);

        let first = library.scan_side(Side::A).unwrap();
        let second = library.scan_side(Side::A).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_url_is_encoded() {
        let (_dir, library) = library_with(&["my song #1.mp3"], &[]);

        let tracks = library.scan_side(Side::A).unwrap();

        assert_eq!(tracks[0].url, "/musics/sideA/my%20song%20%231.mp3");
        assert_eq!(tracks[0].filename, "my song #1.mp3");
    }

    #[test]
    fn test_cache_hit_and_refresh() {
        let (dir, library) = library_with(&["01_song.mp3"], &[]);
        let path = dir.path().join("musics").join("sideA").join("01_song.mp3");

        library.scan().unwrap();
        assert_eq!(library.cache().len(), 1);

        // A cached entry wins over the file's own tags.
        let cached = TrackMetadata {
            title: "Cached Title".to_string(),
            artist: "Cached Artist".to_string(),
            album: "Cached Album".to_string(),
            album_cover_url: None,
        };
        library.cache().store(path.clone(), cached.clone());

        let tracks = library.scan_side(Side::A).unwrap();
        assert_eq!(tracks[0].title, "Cached Title");
        assert_eq!(library.cache().lookup(&path), Some(cached));

        let playlists = library.refresh().unwrap();
        assert_eq!(playlists.side_a[0].title, "01 song");
        assert_eq!(playlists.side_a[0].artist, "Unknown Artist");
    }

    #[test]
    fn test_cache_hit_returns_extracted_entry() {
        let (dir, library) = library_with(&[], &[]);
        let path = dir.path().join("musics").join("sideA").join("tagged.wav");
        let cover: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x42];
        tags::fixtures::write_tagged_wav(&path, "Tape Song", "Side Artist", "Mixtape", &[cover]);

        let first = library.scan_side(Side::A).unwrap();
        assert_eq!(first[0].title, "Tape Song");
        assert_eq!(first[0].album, "Mixtape");
        assert_eq!(first[0].album_cover_url.as_deref(), Some("/covers/A-0.jpg"));
        assert_eq!(fs::read(dir.path().join("covers").join("A-0.jpg")).unwrap(), cover);

        let extracted = library.cache().lookup(&path).unwrap();
        assert_eq!(extracted.title, "Tape Song");
        assert_eq!(extracted.artist, "Side Artist");

        // Tags are not read again while the entry is cached.
        fs::write(&path, b"not really audio").unwrap();
        let second = library.scan_side(Side::A).unwrap();
        assert_eq!(library.cache().lookup(&path), Some(extracted));
        assert_eq!(second[0].title, first[0].title);
        assert_eq!(second[0].album_cover_url, first[0].album_cover_url);

        let refreshed = library.refresh().unwrap();
        assert_eq!(refreshed.side_a[0].title, "tagged");
        assert_eq!(refreshed.side_a[0].album_cover_url, None);
    }

    #[test]
    fn test_nested_side_folder_url() {
        let dir = tempdir().unwrap();
        let music = dir.path().join("musics");
        fs::create_dir_all(music.join("tapes").join("side a")).unwrap();
        fs::write(music.join("tapes").join("side a").join("x y.mp3"), b"x").unwrap();

        let library = Library::new(&music, "tapes/side a", "tapes/b", dir.path().join("covers"));
        let tracks = library.scan_side(Side::A).unwrap();

        assert_eq!(tracks[0].url, "/musics/tapes/side%20a/x%20y.mp3");
    }
}
