use std::path::PathBuf;

/// Alias for `Result<T, ModelError>`.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while reading model files or writing analysis results.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// A model or force-set file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The file that was requested.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A model or force-set file was read but is not a valid document.
    #[error("cannot parse {}: {source}", path.display())]
    Parse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// An analysis could not write its results file.
    #[error("cannot write results to {}: {source}", path.display())]
    Write {
        /// The results file being written.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Recorded results cannot be resampled at the requested interval.
    #[error("cannot resample results: {0}")]
    Resample(String),
}
