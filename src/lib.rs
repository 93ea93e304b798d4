//! Core library for csv-playlist-import: CSV files -> songs_dict playlists.
pub mod config;
pub mod error;
pub mod filter;
pub mod importer;
pub mod models;
pub mod paths;
pub mod playlist;
pub mod reader;
pub mod track;

pub use config::{ImportConfig, Settings};
pub use error::ImportError;
pub use importer::{import, run, run_component};
pub use models::{ImportOutcome, Playlist, SongsCollection, Track, TrackIds};
