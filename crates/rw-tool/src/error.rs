use std::path::PathBuf;

use rw_model::{ModelError, ModelId};

/// Alias for `Result<T, ToolError>`.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors raised while assembling a model or managing its analyses.
///
/// None of these are retried; every failure ends the call it occurred in.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    /// The base model or a supplementary force-set file is missing or
    /// unparsable.
    #[error("load error: {0}")]
    Load(#[source] ModelError),

    /// The merged actuator set failed its post-setup check.
    #[error("actuator set check failed: {0}")]
    Validation(String),

    /// Analyses were requested but no model is installed.
    #[error("a model has not been set")]
    NoModel,

    /// Analyses are already attached to this model by this tool.
    #[error("analyses are already attached to model {0}")]
    AlreadyAttached(ModelId),

    /// The directory that relative paths resolve against is unusable.
    #[error("cannot resolve directory {}: {source}", path.display())]
    Directory {
        /// The directory that could not be resolved.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The setup file could not be read.
    #[error("cannot read setup file {}: {source}", path.display())]
    ConfigRead {
        /// The setup file.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The setup file is not a valid setup document.
    #[error("invalid setup file {}: {source}", path.display())]
    ConfigParse {
        /// The setup file.
        path: PathBuf,
        /// The underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// The results directory could not be created.
    #[error("cannot create results directory {}: {source}", path.display())]
    ResultsDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// An analysis failed to write its results.
    #[error(transparent)]
    Results(ModelError),
}
