//! Deterministic predictors and candidate builders for unit and behaviour
//! tests.

use crate::{Candidate, ClimateMatch, FEATURE_COUNT, FeatureVector, Predictor, logistic};

/// Logistic predictor with hand-picked coefficients.
///
/// Lets tests inject a known model instead of fitting one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPredictor {
    /// Intercept term.
    pub intercept: f64,
    /// Weights in [`FEATURE_NAMES`](crate::FEATURE_NAMES) order.
    pub weights: [f64; FEATURE_COUNT],
}

impl FixedPredictor {
    /// Create a predictor from an intercept and feature weights.
    #[must_use]
    pub const fn new(intercept: f64, weights: [f64; FEATURE_COUNT]) -> Self {
        Self { intercept, weights }
    }

    /// Predictor whose only signal is price: 200 € scores exactly 0.5 and
    /// cheaper trips score higher.
    #[must_use]
    pub const fn price_sensitive() -> Self {
        Self::new(2.0, [0.0, 0.0, -0.01, 0.0, 0.0])
    }

    /// Predictor that favours cheap trips with a good climate match.
    #[must_use]
    pub const fn climate_and_price() -> Self {
        Self::new(1.0, [0.0, -0.000_5, -0.01, 0.0, 0.4])
    }
}

impl Predictor for FixedPredictor {
    #[expect(
        clippy::float_arithmetic,
        reason = "linear predictor sums weighted features"
    )]
    fn probability(&self, features: &FeatureVector) -> f64 {
        let linear = self
            .weights
            .iter()
            .zip(features.to_array())
            .fold(self.intercept, |acc, (weight, value)| acc + weight * value);
        logistic(linear)
    }
}

/// Build a domestic, exact-climate candidate for two travellers 500 km away.
#[must_use]
pub fn candidate(city: &str, price_eur: f64) -> Candidate {
    Candidate {
        city: city.to_owned(),
        price_eur,
        distance_km: 500.0,
        climate_match: ClimateMatch::Exact,
        is_foreign: false,
        party_size: 2,
    }
}
