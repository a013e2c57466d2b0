//! Core domain types for the Wayfare destination recommender.
//!
//! The crate covers the pure part of the pipeline: climate encoding, feature
//! derivation, the [`Predictor`] seam and the [`RankingEngine`]. It performs
//! no I/O; candidate sources and model fitting live elsewhere.
//!
//! # Examples
//!
//! ```
//! use wayfare_core::{Climate, RankingEngine, RawCandidate, TripQuery};
//! use wayfare_core::test_support::FixedPredictor;
//!
//! # fn main() -> Result<(), wayfare_core::TripQueryError> {
//! let query = TripQuery::new(2, Climate::Tropical)?;
//! let engine = RankingEngine::new(FixedPredictor::climate_and_price());
//! let raw = vec![
//!     RawCandidate::new("Reykjavík", 420.0, 2_900.0, "polar", true),
//!     RawCandidate::new("Tenerife", 180.0, 2_000.0, "tropical", false),
//! ];
//! let ranking = engine.rank_query(&query, &raw);
//! assert_eq!(ranking.ranked_options()[0].city, "Tenerife");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidate;
mod climate;
mod features;
mod predictor;
mod query;
mod ranking;
pub mod test_support;
mod training;

pub use candidate::{Candidate, RankedOption, RawCandidate, ScoredCandidate, is_foreign};
pub use climate::{
    Climate, ClimateMatch, InvalidCategoryError, POLAR_THRESHOLD_CELSIUS,
    TROPICAL_THRESHOLD_CELSIUS, climate_match_score,
};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureEncoder, FeatureVector};
pub use predictor::{DECISION_THRESHOLD, Prediction, Predictor, logistic, sanitise_probability};
pub use query::{TripQuery, TripQueryError};
pub use ranking::{DEFAULT_TOP_K, Ranking, RankingEngine, RankingWarning};
pub use training::{TrainingRecord, TrainingRecordError};
