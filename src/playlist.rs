use crate::config::{Field, FieldNames};
use crate::error::Result;
use crate::models::{Playlist, Track};
use crate::paths::playlist_name_for;
use crate::reader::{CsvTable, Layout};
use crate::track::build_track;
use std::collections::HashMap;
use std::path::Path;

/// Read one CSV file as a single playlist named after the file.
///
/// - Rows are turned into tracks in file order; rows without a title are dropped.
/// - Headerless files use the [`Layout::Tracks`] column order.
/// - A file yielding no tracks produces `None` rather than an empty playlist.
pub fn read_file_playlist(
    path: &Path,
    delimiter: u8,
    has_header: bool,
    fields: &FieldNames,
) -> Result<Option<Playlist>> {
    let table = CsvTable::read(path, delimiter, has_header)?;
    Ok(playlist_from_table(playlist_name_for(path), &table, fields))
}

pub fn playlist_from_table(name: String, table: &CsvTable, fields: &FieldNames) -> Option<Playlist> {
    let songs: Vec<Track> = table
        .rows(fields, Layout::Tracks)
        .filter_map(|row| build_track(&row))
        .collect();

    if songs.is_empty() || name.is_empty() {
        return None;
    }
    Some(Playlist::new(name, songs))
}

/// Read one CSV file holding several playlists, grouped by the playlist column.
/// Playlists come out in the order their names first appear.
pub fn read_column_playlists(
    path: &Path,
    delimiter: u8,
    has_header: bool,
    fields: &FieldNames,
) -> Result<Vec<Playlist>> {
    let table = CsvTable::read(path, delimiter, has_header)?;
    Ok(group_by_column(&table, fields))
}

pub fn group_by_column(table: &CsvTable, fields: &FieldNames) -> Vec<Playlist> {
    let mut grouper = PlaylistGrouper::default();
    for row in table.rows(fields, Layout::PlaylistTracks) {
        let name = row.cell(Field::Playlist);
        if name.is_empty() {
            continue;
        }
        if let Some(track) = build_track(&row) {
            grouper.push(name, track);
        }
    }
    grouper.finish()
}

/// Accumulates tracks into named buckets while remembering first-seen order.
#[derive(Debug, Default)]
pub struct PlaylistGrouper {
    playlists: Vec<Playlist>,
    index: HashMap<String, usize>,
}

impl PlaylistGrouper {
    pub fn push(&mut self, name: &str, track: Track) {
        let idx = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.playlists.push(Playlist::new(name, Vec::new()));
                let i = self.playlists.len() - 1;
                self.index.insert(name.to_string(), i);
                i
            }
        };
        self.playlists[idx].songs.push(track);
    }

    /// Buckets are only created on a push, so none of them is empty.
    pub fn finish(self) -> Vec<Playlist> {
        self.playlists
    }
}
