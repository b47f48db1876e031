//! Error types for the libkwg crate.

use thiserror::Error;

use crate::tilemapping::MachineLetter;

/// The error type for loading word graphs and running queries against them.
///
/// Absent words, empty hook sets and unranked words are not errors; those
/// are reported as `None` or empty results by the query functions.
#[derive(Debug, Error)]
pub enum Error {
    /// An error originating from I/O operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The node array or its file name is malformed.
    #[error("Invalid format: {0}")]
    Format(String),

    /// A letter code outside the alphabet's valid range.
    #[error("Invalid letter code {0}")]
    InvalidLetter(MachineLetter),

    /// A human-readable word contains a letter the alphabet does not know.
    #[error("Unknown letter {0:?}")]
    UnknownLetter(String),

    /// The word graph has no alphabet assigned yet.
    #[error("Word graph has no alphabet")]
    MissingAlphabet,

    /// The query forbids blanks but the rack contains at least one.
    #[error("Rack has blanks")]
    HasBlanks,

    /// A letter distribution table could not be parsed.
    #[error("Letter distribution CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A letter distribution table parsed but has invalid contents.
    #[error("Invalid letter distribution: {0}")]
    Distribution(String),

    /// No letter distribution can be derived from the lexicon name.
    #[error("Cannot determine alphabet from lexicon name {0}")]
    UnknownLexicon(String),

    /// The configuration has no data path to load files from.
    #[error("Could not find data-path in the configuration")]
    MissingDataPath,
}

/// A convenience `Result` type alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
