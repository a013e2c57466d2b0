//! Logistic satisfaction model for the Wayfare recommender.
//!
//! This crate fits a [`LogisticModel`] to historical trip outcomes by
//! maximum likelihood, loads those outcomes from CSV or JSON files, and
//! persists fitted coefficients. The fitted model implements
//! [`Predictor`](wayfare_core::Predictor), so it plugs straight into a
//! [`RankingEngine`](wayfare_core::RankingEngine).
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use wayfare_core::{Climate, RankingEngine, RawCandidate, TripQuery};
//! use wayfare_model::{LogisticModel, load_training_records};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = load_training_records(Utf8Path::new("data/trips.csv"))?;
//! let fitted = LogisticModel::fit(&records)?;
//! let engine = RankingEngine::new(fitted.model);
//! let query = TripQuery::new(2, Climate::Dry)?;
//! let raw = vec![RawCandidate::new("Madrid", 120.0, 400.0, "dry", false)];
//! for option in engine.rank_query(&query, &raw).ranked_options() {
//!     println!("{option}");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod artefact;
mod dataset;
mod linalg;
mod logit;

pub use artefact::{MODEL_FILE_VERSION, ModelFileError, read_model_file, write_model_file};
pub use dataset::{
    DatasetError, DatasetFormat, load_training_records, read_csv_records, read_json_records,
};
pub use logit::{
    COEFFICIENT_COUNT, Coefficients, FitOptions, FitReport, FittedModel, LogisticModel,
    ModelFitError,
};
