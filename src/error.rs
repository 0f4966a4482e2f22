use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, DatasetError>;

/// An error accessing the labeled dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    /// The dataset file does not exist.
    #[error("dataset file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// A required top-level array is missing from the container.
    #[error("container is missing required array `{0}`")]
    MissingArray(&'static str),
    /// A required array does not have the expected number of dimensions.
    #[error("array `{name}` has {ndim} dimensions, expected {expected}")]
    WrongNdim {
        /// Name of the offending array.
        name: &'static str,
        /// Number of dimensions found in the file.
        ndim: usize,
        /// Number of dimensions the format requires.
        expected: usize,
    },
    /// A required array has the right rank but an unsupported shape.
    #[error("array `{name}` has unsupported shape {shape:?}")]
    BadShape {
        /// Name of the offending array.
        name: &'static str,
        /// Shape found in the file.
        shape: Vec<usize>,
    },
    /// The parallel per-sample arrays disagree on the sample count.
    #[error("array `{name}` holds {len} samples, but `images` holds {expected}")]
    LengthMismatch {
        /// Name of the offending array.
        name: &'static str,
        /// Sample count of the offending array.
        len: usize,
        /// Sample count of the `images` array.
        expected: usize,
    },
    /// A string reference entry resolves to something other than a dataset.
    #[error("string reference does not point to a dataset")]
    BadStringReference,
    /// A character code in string data is not a valid Unicode scalar value.
    #[error("invalid character code {0} in string data")]
    BadCharCode(u32),
    /// The sample index is outside `0..len`.
    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The dataset length.
        len: usize,
    },
    /// The accessor was used after [`close`](crate::LabeledDataset::close).
    #[error("dataset accessor used after close")]
    Closed,
    /// An error reported by the HDF5 library.
    #[error(transparent)]
    Hdf5(#[from] hdf5::Error),
}
