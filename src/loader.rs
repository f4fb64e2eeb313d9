//! CSV loaders for the face table, starmap vectors, and symbol map.
//!
//! The geometry core performs no file I/O itself: these collaborators hand
//! it fully parsed, range-checked, immutable tables. All three formats are
//! plain comma-separated rows, and the first line may optionally be a header
//! (skipped only if it fails to parse, matching the original tooling's
//! files, which carried headers inconsistently).

use std::fmt;
use std::io::{self, BufRead};

use glam::DVec3;

use crate::orientation::{StarmapAnchors, StarmapVector};
use crate::types::{FaceEntry, FaceTable, SymbolMap};
use crate::PentakisError;

/// Errors from reading or validating a table file.
#[derive(Debug)]
pub enum LoadError {
    Io(io::Error),
    /// A row after the optional header failed to parse. `line` is 1-based.
    Parse { line: usize, message: String },
    /// The starmap file does not contain a row for the requested anchor.
    MissingAnchor { symbol: u32 },
    /// The parsed table failed count or range validation.
    Table(PentakisError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "i/o error: {}", e),
            LoadError::Parse { line, message } => {
                write!(
                    f,
                    "unable to parse line {} ({}), is it formatted correctly?",
                    line, message
                )
            }
            LoadError::MissingAnchor { symbol } => {
                write!(f, "no starmap vector found for symbol id {}", symbol)
            }
            LoadError::Table(e) => write!(f, "invalid table: {}", e),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

/// Read all rows, skipping blank lines and at most one leading header line.
fn parse_rows<R: BufRead, T>(
    reader: R,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Vec<T>, LoadError> {
    let mut rows = Vec::new();
    let mut may_be_header = true;
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        match parse(text) {
            Some(row) => {
                rows.push(row);
                may_be_header = false;
            }
            None if may_be_header => may_be_header = false,
            None => {
                return Err(LoadError::Parse {
                    line: idx + 1,
                    message: format!("malformed row {:?}", text),
                })
            }
        }
    }
    Ok(rows)
}

/// Load the 60-entry face table: one `ico,dod_a,dod_b` triple per row,
/// in symbol order starting at symbol id 1.
pub fn load_face_table<R: BufRead>(reader: R) -> Result<FaceTable, LoadError> {
    let rows = parse_rows(reader, |text| {
        let mut fields = text.split(',');
        let ico = fields.next()?.trim().parse().ok()?;
        let dod_a = fields.next()?.trim().parse().ok()?;
        let dod_b = fields.next()?.trim().parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(FaceEntry { ico, dod_a, dod_b })
    })?;
    FaceTable::new(rows).map_err(LoadError::Table)
}

/// Load every starmap vector: one `id,x,y,z` row per measured symbol.
pub fn load_starmap<R: BufRead>(reader: R) -> Result<Vec<StarmapVector>, LoadError> {
    parse_rows(reader, |text| {
        let mut fields = text.split(',');
        let symbol = fields.next()?.trim().parse().ok()?;
        let x = fields.next()?.trim().parse().ok()?;
        let y = fields.next()?.trim().parse().ok()?;
        let z = fields.next()?.trim().parse().ok()?;
        if fields.next().is_some() {
            return None;
        }
        Some(StarmapVector {
            symbol,
            direction: DVec3::new(x, y, z),
        })
    })
}

/// Load the 64-entry symbol map: one symbol identifier per row, in slot
/// order starting at slot 0.
pub fn load_symbol_map<R: BufRead>(reader: R) -> Result<SymbolMap, LoadError> {
    let rows = parse_rows(reader, |text| text.trim().parse::<u32>().ok())?;
    SymbolMap::new(rows).map_err(LoadError::Table)
}

/// Pick the two anchor vectors out of a loaded starmap.
pub fn find_anchors(
    starmap: &[StarmapVector],
    symbol_a: u32,
    symbol_b: u32,
) -> Result<StarmapAnchors, LoadError> {
    let find = |symbol: u32| {
        starmap
            .iter()
            .find(|sv| sv.symbol == symbol)
            .copied()
            .ok_or(LoadError::MissingAnchor { symbol })
    };
    Ok(StarmapAnchors {
        a: find(symbol_a)?,
        b: find(symbol_b)?,
    })
}
