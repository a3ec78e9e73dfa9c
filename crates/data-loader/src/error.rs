//! Error types for the data-loader crate.
//!
//! Loads are all-or-nothing: any variant below aborts the whole file and
//! carries enough context (1-based line number, offending value) for a
//! caller or test to assert on the exact failure kind.

use crate::types::MovieId;
use std::path::PathBuf;
use thiserror::Error;

/// A file-level load failure. Row-level skips (out-of-range rating,
/// unknown movie, duplicate rating) never produce a `LoadError`; they are
/// counted on the resulting model instead.
#[derive(Error, Debug)]
pub enum LoadError {
    /// File could not be found
    #[error("file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// I/O error occurred while reading the file
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exists but has no non-blank lines
    #[error("file is empty: {}", path.display())]
    FileEmpty { path: PathBuf },

    /// Row violated the field-count / non-empty / numeric rules
    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    /// Movie name does not end in `<title> (YYYY)`
    #[error("invalid title format at line {line}: {name:?}")]
    InvalidTitleFormat { line: usize, name: String },

    /// Movie id was negative
    #[error("negative movie id {id} at line {line}")]
    NegativeMovieId { line: usize, id: i64 },

    /// User id was negative
    #[error("negative user id {id} at line {line}")]
    NegativeUserId { line: usize, id: i64 },

    /// A different id is already bound to this (title, year) concept
    #[error("line {line}: {concept:?} is already bound to movie id {existing_id}")]
    ConceptIdConflict {
        line: usize,
        concept: String,
        existing_id: MovieId,
    },

    /// This id is already bound to a different (title, year) concept
    #[error("line {line}: movie id {id} is already bound to {existing_concept:?}")]
    IdReuseConflict {
        line: usize,
        id: MovieId,
        existing_concept: String,
    },

    /// A display-equivalent name is already recorded under another id
    #[error("line {line}: {name:?} matches existing movie {canonical:?} with id {existing_id}")]
    DisplayNameIdConflict {
        line: usize,
        name: String,
        canonical: String,
        existing_id: MovieId,
    },
}

impl LoadError {
    /// The 1-based line number the abort is attributable to, if the
    /// failure happened inside the file rather than opening it.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::FileNotFound { .. } | LoadError::Io { .. } | LoadError::FileEmpty { .. } => {
                None
            }
            LoadError::MalformedRow { line, .. }
            | LoadError::InvalidTitleFormat { line, .. }
            | LoadError::NegativeMovieId { line, .. }
            | LoadError::NegativeUserId { line, .. }
            | LoadError::ConceptIdConflict { line, .. }
            | LoadError::IdReuseConflict { line, .. }
            | LoadError::DisplayNameIdConflict { line, .. } => Some(*line),
        }
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, LoadError>;
