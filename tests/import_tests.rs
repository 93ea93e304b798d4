use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use csv_playlist_import::config::{ImportConfig, PlaylistSource, Settings};
use csv_playlist_import::filter::NameFilter;
use csv_playlist_import::{import, run, run_component, Playlist};

const EXPORTIFY_HEADER: &str = "Track URI,Track Name,Artist Name,Album Name,Track ID\n";

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn names(playlists: &[Playlist]) -> Vec<&str> {
    playlists.iter().map(|p| p.name.as_str()).collect()
}

fn titles(p: &Playlist) -> Vec<&str> {
    p.songs.iter().map(|t| t.title.as_str()).collect()
}

#[test]
fn single_file_named_after_file() {
    let td = tempdir().unwrap();
    let f = td.path().join("Liked_Songs.csv");
    write(
        &f,
        &format!(
            "{}spotify:track:1,Song One,A; B ; C,Album,id1\nspotify:track:2,,Nobody,,id2\nspotify:track:3,Song Two,,,\n",
            EXPORTIFY_HEADER
        ),
    );

    let out = run(&Settings::for_path(&f)).unwrap();
    assert_eq!(names(&out), vec!["Liked_Songs"]);
    let p = &out[0];
    assert!(p.id.is_empty());
    assert_eq!(titles(p), vec!["Song One", "Song Two"]);
    assert_eq!(
        p.songs[0].artists,
        Some(vec!["A".to_string(), "B".to_string(), "C".to_string()])
    );
    assert_eq!(p.songs[0].id.as_ref().unwrap().spotify.as_deref(), Some("id1"));
    assert!(p.songs[1].artists.is_none());
    assert!(p.songs[1].id.is_none());
}

#[test]
fn folder_yields_one_playlist_per_file_in_sorted_order() {
    let td = tempdir().unwrap();
    let root = td.path();
    write(&root.join("b.csv"), "Track Name\nb1\n");
    write(&root.join("a.csv"), "Track Name\na1\na2\n");
    write(&root.join("empty.csv"), "Track Name\n\n");
    write(&root.join("nested").join("c.csv"), "Track Name\nc1\n");

    let mut settings = Settings::for_path(root);
    // folder mode ignores the playlist source
    settings.playlist_source = PlaylistSource::Column;
    let out = run(&settings).unwrap();
    assert_eq!(names(&out), vec!["a", "b"]);
    assert_eq!(titles(&out[0]), vec!["a1", "a2"]);

    settings.include_subfolders = true;
    let out = run(&settings).unwrap();
    assert_eq!(names(&out), vec!["a", "b", "c"]);
}

#[test]
fn folder_skips_unreadable_files_and_continues() {
    let td = tempdir().unwrap();
    let root = td.path();
    write(&root.join("a.csv"), "Track Name\nfine\n");
    fs::write(root.join("b.csv"), b"Track Name\n\xff\xfe\xfd\n").unwrap();
    write(&root.join("c.csv"), "Track Name\nalso fine\n");

    let outcome = import(&Settings::for_path(root)).unwrap();
    assert_eq!(names(&outcome.playlists), vec!["a", "c"]);
    assert_eq!(outcome.skipped.len(), 1);
    assert_eq!(outcome.skipped[0].path, root.join("b.csv"));
}

#[test]
fn column_mode_groups_in_first_seen_order() {
    let td = tempdir().unwrap();
    let f = td.path().join("multi.csv");
    write(
        &f,
        "playlist,title,artists\np1,t1,x\np2,t2,y\np1,t3,z\n,t4,orphan\n",
    );

    let mut settings = Settings::for_path(&f);
    settings.playlist_source = PlaylistSource::Column;
    settings.fields.title = "TITLE".into();
    settings.fields.artists = "Artists".into();

    let out = run(&settings).unwrap();
    assert_eq!(names(&out), vec!["p1", "p2"]);
    assert_eq!(titles(&out[0]), vec!["t1", "t3"]);
    assert_eq!(titles(&out[1]), vec!["t2"]);
    assert_eq!(out[0].songs[1].artists, Some(vec!["z".to_string()]));
}

#[test]
fn headerless_column_mode_with_semicolons() {
    let td = tempdir().unwrap();
    let f = td.path().join("multi.csv");
    write(&f, "Road;Drive\n\n;Orphan\nRoad;Cruise;Band\nlonely\n");

    let mut settings = Settings::for_path(&f);
    settings.playlist_source = PlaylistSource::Column;
    settings.has_header = false;
    settings.delimiter = b';';

    let out = run(&settings).unwrap();
    assert_eq!(names(&out), vec!["Road"]);
    assert_eq!(titles(&out[0]), vec!["Drive", "Cruise"]);
    // a row with a blank playlist cell contributes nothing
    assert_eq!(out.iter().map(|p| p.songs.len()).sum::<usize>(), 2);
}

#[test]
fn headerless_file_mode_tolerates_short_rows() {
    let td = tempdir().unwrap();
    let f = td.path().join("short.csv");
    write(&f, "T1\nT2,Artist,Album,2001,ISRC1,/m/t2.mp3,sp,td\n");

    let mut settings = Settings::for_path(&f);
    settings.has_header = false;
    let out = run(&settings).unwrap();
    let songs = &out[0].songs;
    assert_eq!(songs[0], csv_playlist_import::Track::new("T1"));
    assert_eq!(songs[1].isrc.as_deref(), Some("ISRC1"));
    assert_eq!(songs[1].id.as_ref().unwrap().tidal.as_deref(), Some("td"));
}

#[test]
fn filter_prunes_by_playlist_name() {
    let td = tempdir().unwrap();
    let root = td.path();
    write(&root.join("Liked Songs.csv"), "Track Name\nx\n");
    write(&root.join("Liked 2020.csv"), "Track Name\ny\n");
    write(&root.join("Discover Weekly.csv"), "Track Name\nz\n");

    let mut settings = Settings::for_path(root);
    settings.filter = NameFilter::new("^Liked").unwrap();
    let out = run(&settings).unwrap();
    assert_eq!(names(&out), vec!["Liked 2020", "Liked Songs"]);

    settings.filter = NameFilter::new("").unwrap();
    assert_eq!(run(&settings).unwrap().len(), 3);
}

#[test]
fn repeated_runs_are_identical() {
    let td = tempdir().unwrap();
    let f = td.path().join("multi.csv");
    write(&f, "playlist,Track Name\np1,a\np2,b\np1,c\n");
    let mut settings = Settings::for_path(&f);
    settings.playlist_source = PlaylistSource::Column;

    let first = serde_json::to_value(run(&settings).unwrap()).unwrap();
    let second = serde_json::to_value(run(&settings).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn settings_map_drives_the_whole_run() {
    let td = tempdir().unwrap();
    let f = td.path().join("list.csv");
    write(&f, "Name|Who\nSong|Band\n");

    let settings: HashMap<String, String> = [
        ("path", f.to_str().unwrap()),
        ("delimiter", "|"),
        ("col_title", "name"),
        ("col_artists", "WHO"),
        ("filter", ""),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let resolved = ImportConfig::from_map(&settings).unwrap().resolve().unwrap();
    let out = run_component(&resolved, "inputs").unwrap();
    let json = serde_json::to_value(&out).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "name": "list",
            "id": {},
            "songs": [{ "title": "Song", "artists": ["Band"] }]
        }])
    );
}

#[test]
fn nonexistent_path_is_configuration_error() {
    let td = tempdir().unwrap();
    let err = run(&Settings::for_path(td.path().join("missing"))).unwrap_err();
    assert!(err.is_configuration());
}
