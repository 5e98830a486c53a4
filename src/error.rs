//! Errors of the sampling and differentiation pipeline.

use thiserror::Error;

/// Analysis error.
///
/// All of them abort the current analysis; no partial curve is
/// returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The perceptual model name is not one [`crate::PerceptualModel`]
    /// knows about.
    #[error("unsupported perceptual model “{0}”")]
    UnsupportedModel(String),

    /// At least two grid points are needed.
    #[error("invalid resolution {0}: at least 2 samples are required")]
    InvalidResolution(usize),

    /// Fewer than two samples survived deduplication.
    #[error("insufficient samples: {0} (at least 2 are needed to differentiate)")]
    InsufficientSamples(usize),

    /// Two consecutive samples share the same parameter.
    #[error("degenerate step at index {index} (q = {parameter})")]
    DegenerateStep {
        /// Index of the first sample of the pair.
        index: usize,
        /// Its parameter value.
        parameter: f64,
    },

    /// Arrays that must be index aligned have different lengths.
    #[error("length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// Expected length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// No built-in colormap has this name.
    #[error("unknown colormap “{0}”")]
    UnknownColormap(String),
}

/// Result type for the analysis.
pub type Result<T> = std::result::Result<T, Error>;
