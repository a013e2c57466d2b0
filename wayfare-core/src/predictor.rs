//! Turn feature vectors into satisfaction probabilities.
//!
//! The [`Predictor`] trait is the seam between ranking and whatever model
//! backs it. Implementations are pure: the same vector must always yield the
//! same probability.

use std::sync::Arc;

use crate::FeatureVector;

/// Probabilities at or above this value count as a positive decision.
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Probability and decision for one feature vector.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prediction {
    /// Probability within `0.0..=1.0`.
    pub probability: f64,
    /// `probability >= DECISION_THRESHOLD`.
    pub decision: bool,
}

impl Prediction {
    /// Build a prediction from a raw probability, sanitising it first.
    ///
    /// # Examples
    /// ```
    /// use wayfare_core::Prediction;
    ///
    /// let prediction = Prediction::from_probability(0.5);
    /// assert!(prediction.decision);
    /// assert!(!Prediction::from_probability(f64::NAN).decision);
    /// ```
    #[must_use]
    pub fn from_probability(probability: f64) -> Self {
        let clean = sanitise_probability(probability);
        Self {
            probability: clean,
            decision: clean >= DECISION_THRESHOLD,
        }
    }
}

/// Estimate the probability that a traveller is satisfied with a trip.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so one fitted model
/// can serve concurrent queries, and must not validate input ranges: callers
/// own that concern.
///
/// # Examples
///
/// ```rust
/// use wayfare_core::{FeatureVector, Predictor};
///
/// struct CoinFlip;
///
/// impl Predictor for CoinFlip {
///     fn probability(&self, _features: &FeatureVector) -> f64 {
///         0.5
///     }
/// }
///
/// let prediction = CoinFlip.predict(&FeatureVector::default());
/// assert_eq!(prediction.probability, 0.5);
/// assert!(prediction.decision);
/// ```
pub trait Predictor: Send + Sync {
    /// Return the probability for `features`.
    fn probability(&self, features: &FeatureVector) -> f64;

    /// Return the sanitised probability together with its decision.
    fn predict(&self, features: &FeatureVector) -> Prediction {
        Prediction::from_probability(self.probability(features))
    }
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn probability(&self, features: &FeatureVector) -> f64 {
        (**self).probability(features)
    }
}

impl<P: Predictor + ?Sized> Predictor for Arc<P> {
    fn probability(&self, features: &FeatureVector) -> f64 {
        (**self).probability(features)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn probability(&self, features: &FeatureVector) -> f64 {
        (**self).probability(features)
    }
}

/// Clamp a probability into `0.0..=1.0`.
///
/// Non-finite values map to `0.0` and negative zero is normalised so that
/// equal probabilities compare equal when ranking.
#[must_use]
pub fn sanitise_probability(probability: f64) -> f64 {
    if !probability.is_finite() || probability <= 0.0 {
        return 0.0;
    }
    probability.min(1.0)
}

/// Numerically stable logistic function `1 / (1 + e^-z)`.
///
/// Infinite inputs saturate to `0.0` or `1.0`; NaN propagates.
///
/// # Examples
/// ```
/// use wayfare_core::logistic;
///
/// assert_eq!(logistic(0.0), 0.5);
/// assert_eq!(logistic(f64::INFINITY), 1.0);
/// assert_eq!(logistic(f64::NEG_INFINITY), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "the logistic function is inherently floating point"
)]
pub fn logistic(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
