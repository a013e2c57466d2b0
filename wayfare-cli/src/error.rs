//! Error types emitted by the Wayfare CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use wayfare_core::{InvalidCategoryError, TripQueryError};
use wayfare_model::{DatasetError, ModelFileError, ModelFitError};

/// Errors emitted by the Wayfare CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// Neither a training dataset nor a saved model was supplied.
    #[error("rank needs a model: set --{training} or --{model}")]
    MissingModelSource {
        training: &'static str,
        model: &'static str,
    },
    /// Two mutually exclusive options were both supplied.
    #[error("--{first} and --{second} cannot be combined")]
    ConflictingArguments {
        first: &'static str,
        second: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The preferred climate was not recognised.
    #[error("invalid climate preference: {0}")]
    InvalidClimate(#[from] InvalidCategoryError),
    /// The traveller query was rejected.
    #[error("invalid query: {0}")]
    InvalidQuery(#[from] TripQueryError),
    /// Loading training data failed.
    #[error("failed to load training data: {0}")]
    Dataset(#[from] DatasetError),
    /// Fitting the model failed.
    #[error("failed to fit model: {0}")]
    Fit(#[from] ModelFitError),
    /// Reading or writing a model file failed.
    #[error(transparent)]
    ModelFile(#[from] ModelFileError),
    /// Opening the candidates file failed.
    #[error("failed to open candidates file at {path:?}: {source}")]
    OpenCandidates {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The candidates file did not contain a JSON array of candidates.
    #[error("failed to parse candidates file at {path:?}: {source}")]
    ParseCandidates {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Serialising command output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
