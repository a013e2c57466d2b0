//! Destination candidates at each stage of the ranking pipeline.
//!
//! A [`RawCandidate`] arrives from a candidate source with an unchecked
//! climate label. Encoding turns it into a [`Candidate`] whose features are
//! ready for scoring, and scoring yields a [`ScoredCandidate`]. Presenters
//! receive [`RankedOption`] triples.

use std::fmt;

use crate::{ClimateMatch, FeatureVector};

/// A destination option as supplied by a candidate source.
///
/// # Examples
/// ```
/// use wayfare_core::RawCandidate;
///
/// let raw = RawCandidate::new("Lisbon", 180.0, 1_005.0, "dry", true);
/// assert_eq!(raw.city, "Lisbon");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawCandidate {
    /// Destination city name.
    pub city: String,
    /// Trip price in euros.
    pub price_eur: f64,
    /// Distance from the departure city in kilometres.
    pub distance_km: f64,
    /// Climate classification label, e.g. `"tropical"`.
    pub climate: String,
    /// Whether the destination country differs from the traveller's.
    pub is_foreign: bool,
}

impl RawCandidate {
    /// Construct a raw candidate.
    pub fn new(
        city: impl Into<String>,
        price_eur: f64,
        distance_km: f64,
        climate: impl Into<String>,
        is_foreign: bool,
    ) -> Self {
        Self {
            city: city.into(),
            price_eur,
            distance_km,
            climate: climate.into(),
            is_foreign,
        }
    }
}

/// A destination with its model features derived.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candidate {
    /// Destination city name.
    pub city: String,
    /// Trip price in euros.
    pub price_eur: f64,
    /// Distance from the departure city in kilometres.
    pub distance_km: f64,
    /// Climate match against the traveller's preference.
    pub climate_match: ClimateMatch,
    /// Whether the destination country differs from the traveller's.
    pub is_foreign: bool,
    /// Party size carried over from the query.
    pub party_size: u32,
}

impl Candidate {
    /// Numeric climate match score (2, 5 or 10).
    #[must_use]
    pub const fn climate_match_score(&self) -> u8 {
        self.climate_match.score()
    }

    /// Feature vector consumed by a [`Predictor`](crate::Predictor).
    #[must_use]
    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            party_size: f64::from(self.party_size),
            distance_km: self.distance_km,
            price_eur: self.price_eur,
            is_foreign: f64::from(u8::from(self.is_foreign)),
            climate_match: f64::from(self.climate_match_score()),
        }
    }
}

/// A candidate together with its predicted probability.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoredCandidate {
    /// The candidate that was scored.
    pub candidate: Candidate,
    /// Probability of a satisfied traveller, within `0.0..=1.0`.
    pub probability: f64,
    /// `true` when `probability` reaches the decision threshold.
    pub decision: bool,
}

/// The `{city, price, probability}` view handed to presenters.
///
/// # Examples
/// ```
/// use wayfare_core::RankedOption;
///
/// let option = RankedOption {
///     rank: 1,
///     city: "Porto".to_owned(),
///     price_eur: 129.5,
///     probability: 0.8734,
/// };
/// assert_eq!(option.to_string(), "1. Porto (129.50€) – 87.3%");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedOption {
    /// One-based position in the ranking.
    pub rank: usize,
    /// Destination city name.
    pub city: String,
    /// Trip price in euros.
    pub price_eur: f64,
    /// Probability of a satisfied traveller.
    pub probability: f64,
}

impl RankedOption {
    /// Probability expressed as a percentage.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "percentages scale the probability"
    )]
    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }
}

impl fmt::Display for RankedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} ({:.2}€) – {:.1}%",
            self.rank,
            self.city,
            self.price_eur,
            self.percent()
        )
    }
}

/// Report whether a traveller from `origin_country` is foreign to
/// `destination_country`.
///
/// Country codes compare case-insensitively after trimming.
///
/// # Examples
/// ```
/// use wayfare_core::is_foreign;
///
/// assert!(is_foreign("ES", "PT"));
/// assert!(!is_foreign("es", " ES"));
/// ```
#[must_use]
pub fn is_foreign(origin_country: &str, destination_country: &str) -> bool {
    !origin_country
        .trim()
        .eq_ignore_ascii_case(destination_country.trim())
}
