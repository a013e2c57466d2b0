//! Rank command implementation for the Wayfare CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::str::FromStr;
use wayfare_core::{Climate, Predictor, Ranking, RankingEngine, RawCandidate, TripQuery};
use wayfare_fs::open_utf8_file;
use wayfare_model::{LogisticModel, load_training_records, read_model_file};

use crate::{
    ARG_CANDIDATES, ARG_CLIMATE, ARG_FORMAT, ARG_MAX_DISTANCE, ARG_MAX_PRICE, ARG_MIN_PRICE,
    ARG_MODEL, ARG_PARTY_SIZE, ARG_TOP_K, ARG_TRAINING, CliError, ENV_RANK_CANDIDATES,
    ENV_RANK_CLIMATE, ENV_RANK_PARTY_SIZE, require_existing, write_json,
};

/// Printed in text mode when nothing could be ranked.
pub(crate) const NO_OPTIONS_MESSAGE: &str = "No options found.";

/// Output rendering for `rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Numbered lines such as `1. Lisbon (180.00€) – 91.2%`.
    #[default]
    Text,
    /// The full ranking, including warnings, as JSON.
    Json,
}

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Rank candidate destinations for one traveller. Candidates \
                 are read from a JSON array of {city, price_eur, distance_km, \
                 climate, is_foreign} objects. The model is either fitted on \
                 the fly from --training or loaded from a file written by \
                 `wayfare fit`.",
    about = "Rank candidate destinations"
)]
#[ortho_config(prefix = "WAYFARE")]
pub(crate) struct RankArgs {
    /// Path to a JSON file containing the candidate destinations.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) candidates: Option<Utf8PathBuf>,
    /// Fit the model from this training dataset before ranking.
    #[arg(long = ARG_TRAINING, value_name = "path")]
    #[serde(default)]
    pub(crate) training: Option<Utf8PathBuf>,
    /// Load a model previously saved by `wayfare fit`.
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Preferred climate: polar, dry or tropical.
    #[arg(long = ARG_CLIMATE, value_name = "climate")]
    #[serde(default)]
    pub(crate) climate: Option<String>,
    /// Number of travellers.
    #[arg(long = ARG_PARTY_SIZE, value_name = "n")]
    #[serde(default)]
    pub(crate) party_size: Option<u32>,
    /// Lowest acceptable price in euros.
    #[arg(long = ARG_MIN_PRICE, value_name = "eur")]
    #[serde(default)]
    pub(crate) min_price: Option<f64>,
    /// Highest acceptable price in euros.
    #[arg(long = ARG_MAX_PRICE, value_name = "eur")]
    #[serde(default)]
    pub(crate) max_price: Option<f64>,
    /// Furthest acceptable distance in kilometres.
    #[arg(long = ARG_MAX_DISTANCE, value_name = "km")]
    #[serde(default)]
    pub(crate) max_distance: Option<f64>,
    /// Number of options to return (defaults to 3).
    #[arg(long = ARG_TOP_K, value_name = "n")]
    #[serde(default)]
    pub(crate) top_k: Option<usize>,
    /// Output format.
    #[arg(long = ARG_FORMAT, value_enum)]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Where the ranking model comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ModelSource {
    /// Fit on this dataset at start-up.
    Training(Utf8PathBuf),
    /// Load saved coefficients from this file.
    Saved(Utf8PathBuf),
}

impl ModelSource {
    fn path(&self) -> (&Utf8Path, &'static str) {
        match self {
            Self::Training(path) => (path, ARG_TRAINING),
            Self::Saved(path) => (path, ARG_MODEL),
        }
    }
}

/// Resolved `rank` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RankConfig {
    pub(crate) candidates: Utf8PathBuf,
    pub(crate) model_source: ModelSource,
    pub(crate) query: TripQuery,
    pub(crate) format: OutputFormat,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.candidates, ARG_CANDIDATES)?;
        let (path, field) = self.model_source.path();
        require_existing(path, field)
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let candidates = args.candidates.ok_or(CliError::MissingArgument {
            field: ARG_CANDIDATES,
            env: ENV_RANK_CANDIDATES,
        })?;
        let model_source = match (args.training, args.model) {
            (Some(training), None) => ModelSource::Training(training),
            (None, Some(model)) => ModelSource::Saved(model),
            (Some(_), Some(_)) => {
                return Err(CliError::ConflictingArguments {
                    first: ARG_TRAINING,
                    second: ARG_MODEL,
                });
            }
            (None, None) => {
                return Err(CliError::MissingModelSource {
                    training: ARG_TRAINING,
                    model: ARG_MODEL,
                });
            }
        };
        let climate_label = args.climate.ok_or(CliError::MissingArgument {
            field: ARG_CLIMATE,
            env: ENV_RANK_CLIMATE,
        })?;
        let party_size = args.party_size.ok_or(CliError::MissingArgument {
            field: ARG_PARTY_SIZE,
            env: ENV_RANK_PARTY_SIZE,
        })?;
        let climate = Climate::from_str(&climate_label)?;
        let query = build_query(
            TripQuery::new(party_size, climate)?,
            (args.min_price, args.max_price),
            args.max_distance,
            args.top_k,
        )?;
        Ok(Self {
            candidates,
            model_source,
            query,
            format: args.format.unwrap_or_default(),
        })
    }
}

fn build_query(
    base: TripQuery,
    prices: (Option<f64>, Option<f64>),
    max_distance: Option<f64>,
    top_k: Option<usize>,
) -> Result<TripQuery, CliError> {
    let priced = match prices {
        (None, None) => base,
        (min, max) => base.with_price_range(min.unwrap_or(0.0), max.unwrap_or(f64::MAX))?,
    };
    let bounded = match max_distance {
        Some(km) => priced.with_max_distance(km)?,
        None => priced,
    };
    Ok(match top_k {
        Some(k) => bounded.with_top_k(k)?,
        None => bounded,
    })
}

/// Builds the predictor used for one `rank` invocation.
pub(super) trait PredictorBuilder {
    fn build(&self, source: &ModelSource) -> Result<Box<dyn Predictor>, CliError>;
}

pub(super) struct DefaultPredictorBuilder;

impl PredictorBuilder for DefaultPredictorBuilder {
    fn build(&self, source: &ModelSource) -> Result<Box<dyn Predictor>, CliError> {
        let model = match source {
            ModelSource::Training(path) => {
                let records = load_training_records(path)?;
                LogisticModel::fit(&records)?.model
            }
            ModelSource::Saved(path) => read_model_file(path)?,
        };
        Ok(Box::new(model))
    }
}

pub(super) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &DefaultPredictorBuilder, &mut stdout)
}

pub(super) fn run_rank_with(
    args: RankArgs,
    builder: &dyn PredictorBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let candidates = load_candidates(&config.candidates)?;
    let engine = RankingEngine::new(builder.build(&config.model_source)?);
    let ranking = engine.rank_query(&config.query, &candidates);
    write_ranking(writer, &ranking, config.format)
}

/// Loads a JSON array of [`RawCandidate`]s from disk.
pub(super) fn load_candidates(path: &Utf8Path) -> Result<Vec<RawCandidate>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenCandidates {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseCandidates {
        path: path.to_path_buf(),
        source,
    })
}

fn write_ranking(
    writer: &mut dyn Write,
    ranking: &Ranking,
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => write_json(writer, ranking),
        OutputFormat::Text if ranking.is_empty() => {
            writeln!(writer, "{NO_OPTIONS_MESSAGE}").map_err(CliError::WriteOutput)
        }
        OutputFormat::Text => ranking
            .ranked_options()
            .iter()
            .try_for_each(|option| writeln!(writer, "{option}"))
            .map_err(CliError::WriteOutput),
    }
}
