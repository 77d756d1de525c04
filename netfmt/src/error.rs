//! The error type shared by both text-format readers/writers, and its
//! mapping onto [`foundation::error::SimError`]'s combinable bitset.

use foundation::error::SimError;
use std::path::PathBuf;

/// Everything that can go wrong reading or writing a netlist or vector
/// file.
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// The file could not be opened.
    #[error("could not open {path}: {source}")]
    Open {
        /// The path that failed to open.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// Reading from an already-open file failed.
    #[error("could not read {path}: {source}")]
    Read {
        /// The path being read.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// Writing to an already-open file failed.
    #[error("could not write {path}: {source}")]
    Write {
        /// The path being written.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: std::io::Error,
    },
    /// Text did not match the netlist or vector grammar (an unrecognized
    /// leading character, a non-rectangular vector, a digit outside
    /// `0`-`5`, ...).
    #[error("malformed netlist or test-vector text")]
    Grammar,
    /// A vector's column count didn't match the netlist it was checked
    /// against.
    #[error("vector width does not match the netlist's input/output count")]
    WidthMismatch,
}

impl From<&FormatError> for SimError {
    /// Maps a format failure onto the core's boundary error taxonomy: open
    /// failures are `FOPEN`, read/write failures are `IO`, grammar
    /// violations are `FFORMAT`, and width mismatches are `PARAM`.
    fn from(err: &FormatError) -> SimError {
        match err {
            FormatError::Open { .. } => SimError::FOPEN,
            FormatError::Read { .. } | FormatError::Write { .. } => SimError::IO,
            FormatError::Grammar => SimError::FFORMAT,
            FormatError::WidthMismatch => SimError::PARAM,
        }
    }
}
