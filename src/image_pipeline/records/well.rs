//! Well identifiers from plate-imager file names.
//!
//! Exports are named like `B7_04_1_1_Bright Field_001.tif`: the file stem is
//! split on a delimiter and one token is taken as the well.

use std::path::Path;

/// Pads a letter+digit token to the three-character form (`B7` -> `B07`).
/// Anything else is returned unchanged.
pub fn normalize_well(token: &str) -> String {
    let mut chars = token.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(row), Some(column), None) => format!("{}0{}", row, column),
        _ => token.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WellIdParser {
    delimiter: char,
    position: usize,
}

impl Default for WellIdParser {
    fn default() -> Self {
        Self {
            delimiter: '_',
            position: 0,
        }
    }
}

impl WellIdParser {
    pub fn new(delimiter: char, position: usize) -> Self {
        Self {
            delimiter,
            position,
        }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Well for `path`, or an empty string when the stem has too few tokens.
    pub fn parse(&self, path: &Path) -> String {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.split(self.delimiter).nth(self.position))
            .map(|token| normalize_well(token.trim()))
            .unwrap_or_default()
    }
}
