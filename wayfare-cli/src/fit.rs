//! Fit command implementation for the Wayfare CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::Write;
use wayfare_model::{
    Coefficients, FitOptions, FitReport, LogisticModel, load_training_records, write_model_file,
};

use crate::{
    ARG_MAX_ITERATIONS, ARG_OUTPUT, ARG_TOLERANCE, ARG_TRAINING, CliError, DEFAULT_MODEL_PATH,
    ENV_FIT_TRAINING, require_existing, write_json,
};

/// CLI arguments for the `fit` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Fit the logistic satisfaction model to historical trip \
                 outcomes (CSV or JSON with columns admit, per, dis, din, \
                 nativo_extranjero, preferencia_clima) and save the fitted \
                 coefficients as JSON.",
    about = "Fit the satisfaction model"
)]
#[ortho_config(prefix = "WAYFARE")]
pub(crate) struct FitArgs {
    /// Path to the historical training data (`.csv` or `.json`).
    #[arg(long = ARG_TRAINING, value_name = "path")]
    #[serde(default)]
    pub(crate) training: Option<Utf8PathBuf>,
    /// Where to write the fitted model (defaults to `model.json`).
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Upper bound on Newton iterations.
    #[arg(long = ARG_MAX_ITERATIONS, value_name = "n")]
    #[serde(default)]
    pub(crate) max_iterations: Option<u32>,
    /// Convergence threshold on the largest coefficient change.
    #[arg(long = ARG_TOLERANCE, value_name = "value")]
    #[serde(default)]
    pub(crate) tolerance: Option<f64>,
}

impl FitArgs {
    pub(crate) fn into_config(self) -> Result<FitConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        FitConfig::try_from(merged)
    }
}

/// Resolved `fit` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FitConfig {
    /// Path to the training dataset.
    pub(crate) training: Utf8PathBuf,
    /// Path of the model file to write.
    pub(crate) output: Utf8PathBuf,
    /// Newton–Raphson tunables.
    pub(crate) options: FitOptions,
}

impl FitConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.training, ARG_TRAINING)
    }
}

impl TryFrom<FitArgs> for FitConfig {
    type Error = CliError;

    fn try_from(args: FitArgs) -> Result<Self, Self::Error> {
        let training = args.training.ok_or(CliError::MissingArgument {
            field: ARG_TRAINING,
            env: ENV_FIT_TRAINING,
        })?;
        let output = args
            .output
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_MODEL_PATH));
        let defaults = FitOptions::default();
        let options = FitOptions {
            max_iterations: args.max_iterations.unwrap_or(defaults.max_iterations),
            tolerance: args.tolerance.unwrap_or(defaults.tolerance),
        };
        Ok(Self {
            training,
            output,
            options,
        })
    }
}

/// Summary printed after a successful fit.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct FitSummary {
    pub(crate) model_path: Utf8PathBuf,
    pub(crate) report: FitReport,
    pub(crate) coefficients: Coefficients,
}

pub(super) fn run_fit(args: FitArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_fit_with(args, &mut stdout)
}

pub(super) fn run_fit_with(args: FitArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let summary = fit_and_save(&config.training, &config.output, config.options)?;
    write_json(writer, &summary)
}

fn fit_and_save(
    training: &Utf8Path,
    output: &Utf8Path,
    options: FitOptions,
) -> Result<FitSummary, CliError> {
    let records = load_training_records(training)?;
    let fitted = LogisticModel::fit_with(&records, options)?;
    write_model_file(output, &fitted.model)?;
    info!(
        "fitted {} records from {training} in {} iterations",
        fitted.report.records, fitted.report.iterations
    );
    Ok(FitSummary {
        model_path: output.to_path_buf(),
        report: fitted.report,
        coefficients: *fitted.model.coefficients(),
    })
}
