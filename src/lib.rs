//! Facade crate for the Wayfare destination recommender.
//!
//! This crate re-exports the core ranking types and, behind the `model`
//! feature, the logistic model with its dataset and persistence helpers.
//!
//! # Examples
//!
//! ```
//! use wayfare_engine::{Climate, Coefficients, LogisticModel, RankingEngine, RawCandidate, TripQuery};
//!
//! # fn main() -> Result<(), wayfare_engine::TripQueryError> {
//! let model = LogisticModel::new(Coefficients {
//!     intercept: 2.0,
//!     price_eur: -0.01,
//!     climate_match: 0.3,
//!     ..Coefficients::default()
//! });
//! let engine = RankingEngine::new(model);
//! let query = TripQuery::new(2, Climate::Dry)?.with_top_k(1)?;
//! let raw = vec![
//!     RawCandidate::new("Marrakesh", 240.0, 1_800.0, "dry", true),
//!     RawCandidate::new("Longyearbyen", 240.0, 3_500.0, "polar", true),
//! ];
//! let ranking = engine.rank_query(&query, &raw);
//! assert_eq!(ranking.options[0].candidate.city, "Marrakesh");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub use wayfare_core::{
    Candidate, Climate, ClimateMatch, DEFAULT_TOP_K, FeatureEncoder, FeatureVector,
    InvalidCategoryError, Prediction, Predictor, RankedOption, Ranking, RankingEngine,
    RankingWarning, RawCandidate, ScoredCandidate, TrainingRecord, TrainingRecordError, TripQuery,
    TripQueryError, climate_match_score, is_foreign,
};

#[cfg(feature = "model")]
pub use wayfare_model::{
    Coefficients, DatasetError, FitOptions, FitReport, FittedModel, LogisticModel, ModelFileError,
    ModelFitError, load_training_records, read_model_file, write_model_file,
};
