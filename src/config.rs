use crate::error::{ImportError, Result};
use crate::filter::NameFilter;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_COL_PLAYLIST: &str = "playlist";
pub const DEFAULT_COL_TITLE: &str = "Track Name";
pub const DEFAULT_COL_ARTISTS: &str = "Artist Name";
pub const DEFAULT_COL_ALBUM: &str = "Album Name";
pub const DEFAULT_COL_DATE: &str = "date";
pub const DEFAULT_COL_ISRC: &str = "isrc";
pub const DEFAULT_COL_LOCATION: &str = "location";
pub const DEFAULT_COL_SPOTIFY_ID: &str = "Track ID";
pub const DEFAULT_COL_TIDAL_ID: &str = "tidal_id";

pub const SOURCE_FILE_NAME: &str = "From file name";
pub const SOURCE_CSV_COLUMN: &str = "From CSV column";

/// Raw plugin settings, every value a string as entered by the user.
/// Blank values are treated like missing ones when resolved into [`Settings`].
#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    #[serde(default)]
    pub path: String,
    #[serde(default = "default_no")]
    pub include_subfolders: String,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_yes")]
    pub has_header: String,
    #[serde(default = "default_playlist_source")]
    pub playlist_source: String,

    // Column name overrides
    #[serde(default = "default_col_playlist")]
    pub col_playlist: String,
    #[serde(default = "default_col_title")]
    pub col_title: String,
    #[serde(default = "default_col_artists")]
    pub col_artists: String,
    #[serde(default = "default_col_album")]
    pub col_album: String,
    #[serde(default = "default_col_date")]
    pub col_date: String,
    #[serde(default = "default_col_isrc")]
    pub col_isrc: String,
    #[serde(default = "default_col_location")]
    pub col_location: String,
    #[serde(default = "default_col_spotify_id")]
    pub col_spotify_id: String,
    #[serde(default = "default_col_tidal_id")]
    pub col_tidal_id: String,

    /// Regex on playlist names; blank imports everything.
    #[serde(default)]
    pub filter: String,
}

fn default_no() -> String { "No".into() }
fn default_yes() -> String { "Yes".into() }
fn default_delimiter() -> String { ",".into() }
fn default_playlist_source() -> String { SOURCE_FILE_NAME.into() }
fn default_col_playlist() -> String { DEFAULT_COL_PLAYLIST.into() }
fn default_col_title() -> String { DEFAULT_COL_TITLE.into() }
fn default_col_artists() -> String { DEFAULT_COL_ARTISTS.into() }
fn default_col_album() -> String { DEFAULT_COL_ALBUM.into() }
fn default_col_date() -> String { DEFAULT_COL_DATE.into() }
fn default_col_isrc() -> String { DEFAULT_COL_ISRC.into() }
fn default_col_location() -> String { DEFAULT_COL_LOCATION.into() }
fn default_col_spotify_id() -> String { DEFAULT_COL_SPOTIFY_ID.into() }
fn default_col_tidal_id() -> String { DEFAULT_COL_TIDAL_ID.into() }

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            include_subfolders: default_no(),
            delimiter: default_delimiter(),
            has_header: default_yes(),
            playlist_source: default_playlist_source(),
            col_playlist: default_col_playlist(),
            col_title: default_col_title(),
            col_artists: default_col_artists(),
            col_album: default_col_album(),
            col_date: default_col_date(),
            col_isrc: default_col_isrc(),
            col_location: default_col_location(),
            col_spotify_id: default_col_spotify_id(),
            col_tidal_id: default_col_tidal_id(),
            filter: String::new(),
        }
    }
}

impl ImportConfig {
    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: ImportConfig = toml::from_str(&s)?;
        Ok(cfg)
    }

    /// Build from a plugin-style settings map. Unknown keys are ignored.
    pub fn from_map(settings: &HashMap<String, String>) -> Result<Self> {
        let value = serde_json::to_value(settings)
            .map_err(|e| ImportError::config(format!("invalid settings: {}", e)))?;
        serde_json::from_value(value)
            .map_err(|e| ImportError::config(format!("invalid settings: {}", e)))
    }

    /// Validate and type the raw settings. Only the path, delimiter and filter
    /// can fail; everything else falls back to its default.
    pub fn resolve(&self) -> Result<Settings> {
        let path = self.path.trim();
        if path.is_empty() {
            return Err(ImportError::config("CSV File or Folder Path is required."));
        }

        let playlist_source = match self.playlist_source.trim() {
            "" | SOURCE_FILE_NAME => PlaylistSource::FileName,
            _ => PlaylistSource::Column,
        };

        Ok(Settings {
            path: PathBuf::from(path),
            include_subfolders: yes_no(&self.include_subfolders, false),
            delimiter: parse_delimiter(&self.delimiter)?,
            has_header: yes_no(&self.has_header, true),
            playlist_source,
            fields: FieldNames {
                playlist: pick(&self.col_playlist, DEFAULT_COL_PLAYLIST),
                title: pick(&self.col_title, DEFAULT_COL_TITLE),
                artists: pick(&self.col_artists, DEFAULT_COL_ARTISTS),
                album: pick(&self.col_album, DEFAULT_COL_ALBUM),
                date: pick(&self.col_date, DEFAULT_COL_DATE),
                isrc: pick(&self.col_isrc, DEFAULT_COL_ISRC),
                location: pick(&self.col_location, DEFAULT_COL_LOCATION),
                spotify_id: pick(&self.col_spotify_id, DEFAULT_COL_SPOTIFY_ID),
                tidal_id: pick(&self.col_tidal_id, DEFAULT_COL_TIDAL_ID),
            },
            filter: NameFilter::new(&self.filter)?,
        })
    }
}

fn pick(value: &str, default: &str) -> String {
    let v = value.trim();
    if v.is_empty() { default.to_string() } else { v.to_string() }
}

fn yes_no(value: &str, default: bool) -> bool {
    match value.trim() {
        "" => default,
        v => v == "Yes",
    }
}

/// Whitespace delimiters are legal, so the value is not trimmed.
/// A literal `\t` is accepted for tab.
fn parse_delimiter(value: &str) -> Result<u8> {
    if value.is_empty() {
        return Ok(b',');
    }
    if value == "\\t" {
        return Ok(b'\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => Err(ImportError::config(format!(
            "CSV Delimiter must be a single ASCII character, got {:?}",
            value
        ))),
    }
}

/// Where playlist names come from in single-file mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistSource {
    /// One playlist per file, named after the file.
    FileName,
    /// Playlists grouped by the value of the playlist column.
    Column,
}

/// The logical fields a CSV row can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Playlist,
    Title,
    Artists,
    Album,
    Date,
    Isrc,
    Location,
    SpotifyId,
    TidalId,
}

/// Column names configured for each logical field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub playlist: String,
    pub title: String,
    pub artists: String,
    pub album: String,
    pub date: String,
    pub isrc: String,
    pub location: String,
    pub spotify_id: String,
    pub tidal_id: String,
}

impl FieldNames {
    pub fn name(&self, field: Field) -> &str {
        match field {
            Field::Playlist => &self.playlist,
            Field::Title => &self.title,
            Field::Artists => &self.artists,
            Field::Album => &self.album,
            Field::Date => &self.date,
            Field::Isrc => &self.isrc,
            Field::Location => &self.location,
            Field::SpotifyId => &self.spotify_id,
            Field::TidalId => &self.tidal_id,
        }
    }
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            playlist: DEFAULT_COL_PLAYLIST.into(),
            title: DEFAULT_COL_TITLE.into(),
            artists: DEFAULT_COL_ARTISTS.into(),
            album: DEFAULT_COL_ALBUM.into(),
            date: DEFAULT_COL_DATE.into(),
            isrc: DEFAULT_COL_ISRC.into(),
            location: DEFAULT_COL_LOCATION.into(),
            spotify_id: DEFAULT_COL_SPOTIFY_ID.into(),
            tidal_id: DEFAULT_COL_TIDAL_ID.into(),
        }
    }
}

/// Typed settings for one import run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub path: PathBuf,
    pub include_subfolders: bool,
    pub delimiter: u8,
    pub has_header: bool,
    pub playlist_source: PlaylistSource,
    pub fields: FieldNames,
    pub filter: NameFilter,
}

impl Settings {
    /// Settings for `path` with every other value at its default.
    pub fn for_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            include_subfolders: false,
            delimiter: b',',
            has_header: true,
            playlist_source: PlaylistSource::FileName,
            fields: FieldNames::default(),
            filter: NameFilter::default(),
        }
    }
}
