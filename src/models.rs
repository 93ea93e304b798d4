use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Remote service identifiers carried by a track.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackIds {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spotify: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tidal: Option<String>,
}

impl TrackIds {
    pub fn is_empty(&self) -> bool {
        self.spotify.is_none() && self.tidal.is_none()
    }
}

/// One song built from a single CSV row. Absent fields are skipped on output,
/// never written as empty strings or nulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artists: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isrc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TrackIds>,
}

impl Track {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artists: None,
            album: None,
            date: None,
            isrc: None,
            location: None,
            id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    pub name: String,
    /// Reserved for remote playlist ids; always empty on import.
    #[serde(default)]
    pub id: BTreeMap<String, String>,
    pub songs: Vec<Track>,
}

impl Playlist {
    pub fn new(name: impl Into<String>, songs: Vec<Track>) -> Self {
        Self { name: name.into(), id: BTreeMap::new(), songs }
    }
}

/// Ordered output of one import: the songs_dict handed to downstream stages.
pub type SongsCollection = Vec<Playlist>;

/// A file dropped during folder processing, with the reason it was dropped.
#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of an import: the playlists produced plus the files that failed.
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    pub playlists: SongsCollection,
    pub skipped: Vec<SkippedFile>,
}
