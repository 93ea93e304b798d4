use crate::error::{ImportError, Result};
use crate::models::Playlist;
use regex::Regex;

/// Regex filter over playlist names. An empty pattern keeps everything.
///
/// Matching is unanchored and case-sensitive; patterns can opt into
/// case-insensitivity with `(?i)`.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    re: Option<Regex>,
}

impl NameFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Ok(Self { re: None });
        }
        let re = Regex::new(pattern).map_err(|e| {
            ImportError::config(format!("Invalid playlist name filter '{}': {}", pattern, e))
        })?;
        Ok(Self { re: Some(re) })
    }

    pub fn is_active(&self) -> bool {
        self.re.is_some()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.re.as_ref().map_or(true, |re| re.is_match(name))
    }

    pub fn apply(&self, playlists: Vec<Playlist>) -> Vec<Playlist> {
        if !self.is_active() {
            return playlists;
        }
        playlists.into_iter().filter(|p| self.matches(&p.name)).collect()
    }
}

/// Keep only playlists whose name matches `pattern`.
pub fn filter_playlists(playlists: Vec<Playlist>, pattern: &str) -> Result<Vec<Playlist>> {
    Ok(NameFilter::new(pattern)?.apply(playlists))
}
