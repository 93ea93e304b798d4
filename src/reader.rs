//! CSV decoding and column resolution.
//!
//! A file is decoded either with a header row, where cells are found by column
//! name, or without one, where cells are found by a fixed position per logical
//! field. Both shapes are exposed through [`Row::cell`].

use crate::config::{Field, FieldNames};
use crate::error::{ImportError, Result};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Fixed column order used when a file has no header row. Rows shorter than
/// the layout (8 columns for `Tracks`, 9 for `PlaylistTracks`) read as if
/// padded with empty cells, since a missing position resolves to `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// title, artists, album, date, isrc, location, spotify_id, tidal_id
    Tracks,
    /// playlist followed by the [`Layout::Tracks`] columns
    PlaylistTracks,
}

impl Layout {
    /// Rows with fewer cells than this are skipped.
    pub fn min_cells(self) -> usize {
        match self {
            Layout::Tracks => 1,
            Layout::PlaylistTracks => 2,
        }
    }

    pub fn position(self, field: Field) -> Option<usize> {
        let offset = match self {
            Layout::Tracks => 0,
            Layout::PlaylistTracks => 1,
        };
        let idx = match field {
            Field::Playlist => return if offset == 1 { Some(0) } else { None },
            Field::Title => 0,
            Field::Artists => 1,
            Field::Album => 2,
            Field::Date => 3,
            Field::Isrc => 4,
            Field::Location => 5,
            Field::SpotifyId => 6,
            Field::TidalId => 7,
        };
        Some(idx + offset)
    }
}

/// Column lookup built from a header row.
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    /// lowercase name -> name as written in the file
    by_lower: HashMap<String, String>,
    /// name as written -> column position; a repeated name keeps its last position
    positions: HashMap<String, usize>,
}

impl HeaderIndex {
    pub fn new(header: &StringRecord) -> Self {
        let mut by_lower = HashMap::new();
        let mut positions = HashMap::new();
        for (i, name) in header.iter().enumerate() {
            positions.insert(name.to_string(), i);
            if !name.is_empty() {
                by_lower.insert(name.to_lowercase(), name.to_string());
            }
        }
        Self { by_lower, positions }
    }

    /// Case-insensitive lookup of the header actually present in the file.
    pub fn lookup(&self, configured: &str) -> Option<&str> {
        self.by_lower.get(&configured.to_lowercase()).map(String::as_str)
    }

    /// Column position for a configured name: the case-insensitive match if
    /// any, otherwise the configured name used verbatim.
    pub fn column(&self, configured: &str) -> Option<usize> {
        let actual = self.lookup(configured).unwrap_or(configured);
        self.positions.get(actual).copied()
    }
}

/// A data row bound to the information needed to resolve its cells.
#[derive(Debug, Clone, Copy)]
pub enum Row<'a> {
    Named {
        record: &'a StringRecord,
        header: &'a HeaderIndex,
        fields: &'a FieldNames,
    },
    Positional {
        record: &'a StringRecord,
        layout: Layout,
    },
}

impl<'a> Row<'a> {
    /// Trimmed cell value for `field`, or `""` when the column is unknown,
    /// missing from this row or blank.
    pub fn cell(&self, field: Field) -> &'a str {
        let idx = match *self {
            Row::Named { header, fields, .. } => {
                let configured = fields.name(field).trim();
                if configured.is_empty() {
                    return "";
                }
                header.column(configured)
            }
            Row::Positional { layout, .. } => layout.position(field),
        };
        let record = match *self {
            Row::Named { record, .. } | Row::Positional { record, .. } => record,
        };
        idx.and_then(|i| record.get(i)).map(str::trim).unwrap_or("")
    }
}

/// A fully loaded CSV file.
#[derive(Debug, Clone)]
pub struct CsvTable {
    header: Option<HeaderIndex>,
    records: Vec<StringRecord>,
}

impl CsvTable {
    /// Read the whole file at `path`. The file handle is released before this
    /// returns, whether decoding succeeded or not.
    pub fn read(path: &Path, delimiter: u8, has_header: bool) -> Result<Self> {
        let reader = builder(delimiter)
            .from_path(path)
            .map_err(|e| ImportError::read(path, e))?;
        let table = Self::collect(reader, path, has_header)?;
        debug!("read {} record(s) from {}", table.len(), path.display());
        Ok(table)
    }

    /// Decode from in-memory CSV text.
    pub fn from_text(text: &str, delimiter: u8, has_header: bool) -> Result<Self> {
        let reader = builder(delimiter).from_reader(text.as_bytes());
        Self::collect(reader, Path::new("<memory>"), has_header)
    }

    fn collect<R: std::io::Read>(mut reader: csv::Reader<R>, origin: &Path, has_header: bool) -> Result<Self> {
        let mut records = Vec::new();
        for rec in reader.records() {
            records.push(rec.map_err(|e| ImportError::read(origin, e))?);
        }
        let header = if has_header && !records.is_empty() {
            Some(HeaderIndex::new(&records.remove(0)))
        } else {
            None
        };
        Ok(Self { header, records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Data rows in file order. With a header, every record is yielded and
    /// resolved by name through `fields`. Without one, blank records and
    /// records shorter than `layout.min_cells()` are skipped.
    pub fn rows<'a>(&'a self, fields: &'a FieldNames, layout: Layout) -> impl Iterator<Item = Row<'a>> + 'a {
        self.records.iter().filter_map(move |record| match &self.header {
            Some(header) => Some(Row::Named { record, header, fields }),
            None => {
                if is_blank(record) || record.len() < layout.min_cells() {
                    return None;
                }
                Some(Row::Positional { record, layout })
            }
        })
    }
}

fn builder(delimiter: u8) -> ReaderBuilder {
    let mut b = ReaderBuilder::new();
    b.delimiter(delimiter).has_headers(false).flexible(true);
    b
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|c| c.trim().is_empty())
}
