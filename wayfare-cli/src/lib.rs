//! Command-line interface for fitting the Wayfare model and ranking trips.
//!
//! `wayfare fit` trains the logistic model from historical outcomes and
//! saves its coefficients; `wayfare rank` scores a JSON list of candidate
//! destinations for one traveller query. Options can come from CLI flags,
//! configuration files, or `WAYFARE_*` environment variables.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};

mod error;
mod fit;
mod rank;

pub use error::CliError;

use fit::{FitArgs, run_fit};
use rank::{RankArgs, run_rank};

const ARG_TRAINING: &str = "training";
const ARG_OUTPUT: &str = "output";
const ARG_MAX_ITERATIONS: &str = "max-iterations";
const ARG_TOLERANCE: &str = "tolerance";
const ARG_CANDIDATES: &str = "candidates";
const ARG_MODEL: &str = "model";
const ARG_CLIMATE: &str = "climate";
const ARG_PARTY_SIZE: &str = "party-size";
const ARG_MIN_PRICE: &str = "min-price";
const ARG_MAX_PRICE: &str = "max-price";
const ARG_MAX_DISTANCE: &str = "max-distance";
const ARG_TOP_K: &str = "top-k";
const ARG_FORMAT: &str = "format";
const ENV_FIT_TRAINING: &str = "WAYFARE_CMDS_FIT_TRAINING";
const ENV_RANK_CANDIDATES: &str = "WAYFARE_CMDS_RANK_CANDIDATES";
const ENV_RANK_CLIMATE: &str = "WAYFARE_CMDS_RANK_CLIMATE";
const ENV_RANK_PARTY_SIZE: &str = "WAYFARE_CMDS_RANK_PARTY_SIZE";

/// Default path for `fit --output`.
const DEFAULT_MODEL_PATH: &str = "model.json";

/// Run the Wayfare CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when argument parsing, configuration loading, or the
/// selected command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Fit(args) => run_fit(args),
        Command::Rank(args) => run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wayfare",
    about = "Fit the trip satisfaction model and rank destinations",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Fit the logistic model to historical trip outcomes.
    Fit(FitArgs),
    /// Rank candidate destinations for a traveller.
    Rank(RankArgs),
}

/// Check that `path` is an existing regular file.
fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match wayfare_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `value` as pretty JSON followed by a newline.
fn write_json<T: serde::Serialize>(writer: &mut dyn std::io::Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(payload.as_bytes())
        .and_then(|()| writer.write_all(b"\n"))
        .map_err(CliError::WriteOutput)
}

#[cfg(test)]
mod tests;
