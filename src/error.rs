// src/error.rs

use std::path::PathBuf;

use thiserror::Error;

/// Fatal setup errors.
///
/// None of these are recoverable: each one means the physics model cannot be
/// evaluated meaningfully, so the top-level driver converts an `Err` into a
/// terminating diagnostic. The library itself never exits the process, which
/// keeps every stage testable.
#[derive(Debug, Error)]
pub enum SetupError {
    /// A crystal structure name outside the supported set, or (for the
    /// per-material neighbour tables) a structure with no defined shell.
    #[error("unknown crystal structure '{structure}' for {scope}")]
    UnknownCrystalStructure { structure: String, scope: String },

    /// Only generic Hamiltonians are implemented at present.
    #[error("unsupported Hamiltonian type '{0}': only generic Hamiltonians are implemented")]
    UnsupportedHamiltonian(String),

    /// A direction vector with zero Euclidean norm cannot be normalised.
    #[error("cannot normalise zero-length {0} vector")]
    ZeroNormVector(String),

    /// The named input file could not be opened.
    #[error("input file '{}' not found", path.display())]
    InputFileNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The input file was read but could not be parsed.
    #[error("failed to parse input file '{}'", path.display())]
    InputParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
