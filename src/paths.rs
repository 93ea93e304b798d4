use crate::error::{ImportError, Result};
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// What the configured path points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputTarget {
    File(PathBuf),
    /// A folder and the CSV files found in it, sorted by path.
    Folder { root: PathBuf, files: Vec<PathBuf> },
}

/// Resolve the configured path into a single file or a sorted list of CSV
/// files. A folder with no CSV files is not an error, only a warning.
pub fn resolve_input(path: &Path, include_subfolders: bool) -> Result<InputTarget> {
    if path.is_file() {
        return Ok(InputTarget::File(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(ImportError::config(format!(
            "Path does not exist (file or folder): {}",
            path.display()
        )));
    }

    let files = csv_files_in_folder(path, include_subfolders);
    if files.is_empty() {
        warn!("No CSV files found in folder: {}", path.display());
    }
    Ok(InputTarget::Folder { root: path.to_path_buf(), files })
}

/// Sorted `.csv` files directly inside `folder`, or anywhere below it when
/// `include_subfolders` is set. Hidden files and folders are skipped the way a
/// shell glob would skip them.
pub fn csv_files_in_folder(folder: &Path, include_subfolders: bool) -> Vec<PathBuf> {
    let mut walker = WalkDir::new(folder).follow_links(true).min_depth(1);
    if !include_subfolders {
        walker = walker.max_depth(1);
    }

    let mut files: Vec<PathBuf> = walker
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| is_csv(p))
        .collect();

    // whole-path text order, so `a-b/` sorts before `a/`
    files.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    files
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .map(|s| s.starts_with('.'))
            .unwrap_or(false)
}

fn is_csv(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("csv")
}

/// Playlist name for a file: its base name without the extension.
pub fn playlist_name_for(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_path_is_configuration_error() {
        let td = tempdir().unwrap();
        let err = resolve_input(&td.path().join("nope.csv"), false).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn single_file_any_extension() {
        let td = tempdir().unwrap();
        let f = td.path().join("list.txt");
        fs::write(&f, "x").unwrap();
        assert_eq!(resolve_input(&f, false).unwrap(), InputTarget::File(f));
    }

    #[test]
    fn folder_listing_is_sorted_and_filtered() {
        let td = tempdir().unwrap();
        let root = td.path();
        fs::write(root.join("b.csv"), "").unwrap();
        fs::write(root.join("a.csv"), "").unwrap();
        fs::write(root.join("notes.txt"), "").unwrap();
        fs::write(root.join(".hidden.csv"), "").unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("c.csv"), "").unwrap();

        let flat = csv_files_in_folder(root, false);
        assert_eq!(flat, vec![root.join("a.csv"), root.join("b.csv")]);

        let deep = csv_files_in_folder(root, true);
        assert_eq!(
            deep,
            vec![root.join("a.csv"), root.join("b.csv"), root.join("sub").join("c.csv")]
        );
    }

    #[test]
    fn empty_folder_is_not_an_error() {
        let td = tempdir().unwrap();
        match resolve_input(td.path(), true).unwrap() {
            InputTarget::Folder { files, .. } => assert!(files.is_empty()),
            other => panic!("unexpected target {:?}", other),
        }
    }

    #[test]
    fn recursive_listing_sorts_on_path_text() {
        let td = tempdir().unwrap();
        let root = td.path();
        fs::create_dir_all(root.join("a")).unwrap();
        fs::create_dir_all(root.join("a-b")).unwrap();
        fs::write(root.join("a").join("x.csv"), "").unwrap();
        fs::write(root.join("a-b").join("y.csv"), "").unwrap();

        let files = csv_files_in_folder(root, true);
        assert_eq!(files, vec![root.join("a-b").join("y.csv"), root.join("a").join("x.csv")]);
    }

    #[test]
    fn name_strips_extension_only() {
        assert_eq!(playlist_name_for(Path::new("/x/Liked_Songs.csv")), "Liked_Songs");
        assert_eq!(playlist_name_for(Path::new("/x/my.mix.csv")), "my.mix");
    }
}
