//! The test-vector text format: a rectangular grid of single digits
//! `0`-`5`, one per [`NodeState`] variant in its declared order, rows
//! separated by newlines. Columns may be adjacent (as the writer emits
//! them) or separated by whitespace — the reader accepts both.
//!
//! Rows are time steps. A stimulus file has one column per netlist input;
//! a golden-reference file has one column per input followed by one per
//! output, and [`split_columns`] is how a harness divides the two.

use crate::error::FormatError;
use foundation::lattice::NodeState;
use std::path::Path;

/// A parsed vector file: one row of [`NodeState`]s per time step. Every row
/// has the same length (`width`).
#[derive(Debug, Clone, Default)]
pub struct Vector {
    /// `rows[t][c]` is the state recorded at time step `t`, column `c`.
    pub rows: Vec<Vec<NodeState>>,
}

impl Vector {
    /// The common column count of every row, or `0` for an empty vector.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |row| row.len())
    }

    /// The number of time steps (rows).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether this vector has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Splits each row at column `start`, returning the columns before and
    /// from `start` onward as two vectors. Used by the test harness to
    /// divide a combined input+output golden file at the netlist's input
    /// width.
    pub fn split_columns(&self, start: usize) -> (Vector, Vector) {
        let mut left = Vec::with_capacity(self.rows.len());
        let mut right = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            left.push(row[..start].to_vec());
            right.push(row[start..].to_vec());
        }
        (Vector { rows: left }, Vector { rows: right })
    }
}

/// Parses a vector from its text form. Blank lines are skipped; every
/// non-blank row must have the same width or the file is malformed.
pub fn parse_vector(text: &str) -> Result<Vector, FormatError> {
    let mut rows = Vec::new();
    let mut width = None;

    for line in text.lines() {
        let mut row = Vec::new();
        for ch in line.chars() {
            if ch.is_whitespace() {
                continue;
            }
            let digit = ch.to_digit(10).ok_or(FormatError::Grammar)? as u8;
            row.push(NodeState::from_digit(digit).ok_or(FormatError::Grammar)?);
        }
        if row.is_empty() {
            continue;
        }
        match width {
            None => width = Some(row.len()),
            Some(w) if w != row.len() => return Err(FormatError::Grammar),
            Some(_) => {}
        }
        rows.push(row);
    }

    Ok(Vector { rows })
}

/// Renders a vector in its text form: adjacent digits per row, one row per
/// line.
pub fn write_vector(vector: &Vector) -> String {
    let mut out = String::with_capacity(vector.rows.len() * (vector.width() + 1));
    for row in &vector.rows {
        for state in row {
            out.push((b'0' + state.to_digit()) as char);
        }
        out.push('\n');
    }
    out
}

/// Reads and parses a vector file.
pub fn read_vector_file(path: impl AsRef<Path>) -> Result<Vector, FormatError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FormatError::Open {
                path: path.to_path_buf(),
                source,
            }
        } else {
            FormatError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    parse_vector(&text)
}

/// Writes a vector file.
pub fn write_vector_file(vector: &Vector, path: impl AsRef<Path>) -> Result<(), FormatError> {
    let path = path.as_ref();
    std::fs::write(path, write_vector(vector)).map_err(|source| FormatError::Write {
        path: path.to_path_buf(),
        source,
    })
}
