use crate::config::{PlaylistSource, Settings};
use crate::error::{ImportError, Result};
use crate::models::{ImportOutcome, Playlist, SkippedFile};
use crate::paths::{resolve_input, InputTarget};
use crate::playlist::{read_column_playlists, read_file_playlist};
use tracing::{debug, info, warn};

/// Component name this importer answers to in the sync pipeline.
pub const INPUT_COMPONENT: &str = "inputs";

/// Run an import and return the songs_dict.
pub fn run(settings: &Settings) -> Result<Vec<Playlist>> {
    Ok(import(settings)?.playlists)
}

/// Entry point used by the pipeline, which names the component it is driving.
pub fn run_component(settings: &Settings, component: &str) -> Result<Vec<Playlist>> {
    if component != INPUT_COMPONENT {
        return Err(ImportError::config(format!(
            "csv import only supports the '{}' component, got '{}'",
            INPUT_COMPONENT, component
        )));
    }
    run(settings)
}

/// Run an import, keeping track of folder files that had to be skipped.
///
/// A folder produces one playlist per CSV file and tolerates per-file read
/// failures. A single file is read per `settings.playlist_source` and any read
/// failure aborts the run.
pub fn import(settings: &Settings) -> Result<ImportOutcome> {
    let fields = &settings.fields;
    let mut outcome = ImportOutcome::default();

    match resolve_input(&settings.path, settings.include_subfolders)? {
        InputTarget::Folder { files, .. } => {
            debug!("importing {} CSV file(s) from {}", files.len(), settings.path.display());
            for csv_path in files {
                match read_file_playlist(&csv_path, settings.delimiter, settings.has_header, fields) {
                    Ok(Some(playlist)) => outcome.playlists.push(playlist),
                    Ok(None) => debug!("no tracks in {}", csv_path.display()),
                    Err(e) => {
                        warn!("Skipping {}: {}", csv_path.display(), e);
                        outcome.skipped.push(SkippedFile { path: csv_path, reason: e.to_string() });
                    }
                }
            }
        }
        InputTarget::File(path) => match settings.playlist_source {
            PlaylistSource::FileName => {
                if let Some(playlist) = read_file_playlist(&path, settings.delimiter, settings.has_header, fields)? {
                    outcome.playlists.push(playlist);
                }
            }
            PlaylistSource::Column => {
                outcome.playlists = read_column_playlists(&path, settings.delimiter, settings.has_header, fields)?;
            }
        },
    }

    if settings.filter.is_active() {
        let before = outcome.playlists.len();
        outcome.playlists = settings.filter.apply(outcome.playlists);
        debug!("name filter kept {} of {} playlist(s)", outcome.playlists.len(), before);
    }

    info!("Imported {} playlist(s) from {}.", outcome.playlists.len(), settings.path.display());
    Ok(outcome)
}
