use crate::config::Field;
use crate::models::{Track, TrackIds};
use crate::reader::Row;
use std::path::PathBuf;

/// Build a track from one decoded row. Returns `None` when the row has no
/// title. Optional fields are only set when their cell is non-blank; values
/// are passed through without format checks.
pub fn build_track(row: &Row<'_>) -> Option<Track> {
    let title = row.cell(Field::Title);
    if title.is_empty() {
        return None;
    }

    let mut track = Track::new(title);

    let artists = split_artists(row.cell(Field::Artists));
    if !artists.is_empty() {
        track.artists = Some(artists);
    }

    track.album = non_empty(row.cell(Field::Album));
    track.date = non_empty(row.cell(Field::Date));
    track.isrc = non_empty(row.cell(Field::Isrc));
    track.location = non_empty(row.cell(Field::Location)).map(PathBuf::from);

    let ids = TrackIds {
        spotify: non_empty(row.cell(Field::SpotifyId)),
        tidal: non_empty(row.cell(Field::TidalId)),
    };
    if !ids.is_empty() {
        track.id = Some(ids);
    }

    Some(track)
}

/// Split a `;`-separated artist cell into trimmed, non-empty names.
pub fn split_artists(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(String::from)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() { None } else { Some(value.to_string()) }
}
