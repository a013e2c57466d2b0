//! Traveller queries: preference, party size, search window and result count.

use thiserror::Error;

use crate::{Climate, DEFAULT_TOP_K, FeatureEncoder, RawCandidate};

/// Parameters of one recommendation request.
///
/// # Examples
/// ```
/// use wayfare_core::{Climate, RawCandidate, TripQuery};
///
/// # fn main() -> Result<(), wayfare_core::TripQueryError> {
/// let query = TripQuery::new(2, Climate::Dry)?
///     .with_price_range(100.0, 400.0)?
///     .with_max_distance(1_500.0)?;
/// assert!(query.accepts(&RawCandidate::new("Seville", 150.0, 400.0, "dry", false)));
/// assert!(!query.accepts(&RawCandidate::new("Tromsø", 150.0, 3_200.0, "polar", true)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripQuery {
    party_size: u32,
    preferred_climate: Climate,
    price_range: Option<(f64, f64)>,
    max_distance_km: Option<f64>,
    top_k: usize,
}

/// Errors returned while building a [`TripQuery`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripQueryError {
    /// The party must contain at least one traveller.
    #[error("party size must be at least 1")]
    InvalidPartySize,
    /// Prices were negative, not finite, or the minimum exceeded the maximum.
    #[error("price range {min}..={max} is invalid")]
    InvalidPriceRange {
        /// Lower bound supplied.
        min: f64,
        /// Upper bound supplied.
        max: f64,
    },
    /// The distance limit was not a positive finite number.
    #[error("maximum distance {km} must be a positive number of kilometres")]
    InvalidDistance {
        /// Limit supplied.
        km: f64,
    },
    /// At least one result must be requested.
    #[error("top-k must be at least 1")]
    InvalidTopK,
}

impl TripQuery {
    /// Start a query for `party_size` travellers preferring `preferred_climate`.
    ///
    /// # Errors
    /// Returns [`TripQueryError::InvalidPartySize`] for an empty party.
    pub const fn new(party_size: u32, preferred_climate: Climate) -> Result<Self, TripQueryError> {
        if party_size == 0 {
            return Err(TripQueryError::InvalidPartySize);
        }
        Ok(Self {
            party_size,
            preferred_climate,
            price_range: None,
            max_distance_km: None,
            top_k: DEFAULT_TOP_K,
        })
    }

    /// Restrict candidates to prices within `min..=max` euros.
    ///
    /// # Errors
    /// Returns [`TripQueryError::InvalidPriceRange`] when either bound is
    /// negative or not finite, or when `min > max`.
    pub fn with_price_range(mut self, min: f64, max: f64) -> Result<Self, TripQueryError> {
        let valid = min.is_finite() && max.is_finite() && min >= 0.0 && min <= max;
        if !valid {
            return Err(TripQueryError::InvalidPriceRange { min, max });
        }
        self.price_range = Some((min, max));
        Ok(self)
    }

    /// Restrict candidates to destinations within `km` kilometres.
    ///
    /// # Errors
    /// Returns [`TripQueryError::InvalidDistance`] unless `km` is positive and
    /// finite.
    pub fn with_max_distance(mut self, km: f64) -> Result<Self, TripQueryError> {
        if !km.is_finite() || km <= 0.0 {
            return Err(TripQueryError::InvalidDistance { km });
        }
        self.max_distance_km = Some(km);
        Ok(self)
    }

    /// Request `top_k` results instead of the default three.
    ///
    /// # Errors
    /// Returns [`TripQueryError::InvalidTopK`] when `top_k` is zero.
    pub const fn with_top_k(mut self, top_k: usize) -> Result<Self, TripQueryError> {
        if top_k == 0 {
            return Err(TripQueryError::InvalidTopK);
        }
        self.top_k = top_k;
        Ok(self)
    }

    /// Number of travellers.
    #[must_use]
    pub const fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Climate the travellers prefer.
    #[must_use]
    pub const fn preferred_climate(&self) -> Climate {
        self.preferred_climate
    }

    /// Inclusive price window, if any.
    #[must_use]
    pub const fn price_range(&self) -> Option<(f64, f64)> {
        self.price_range
    }

    /// Distance limit in kilometres, if any.
    #[must_use]
    pub const fn max_distance_km(&self) -> Option<f64> {
        self.max_distance_km
    }

    /// Number of results to return.
    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Encoder applying this query's preference and party size.
    #[must_use]
    pub const fn encoder(&self) -> FeatureEncoder {
        FeatureEncoder::new(self.preferred_climate, self.party_size)
    }

    /// Report whether `candidate` falls inside the price and distance window.
    #[must_use]
    pub fn accepts(&self, candidate: &RawCandidate) -> bool {
        let price_ok = self
            .price_range
            .is_none_or(|(min, max)| (min..=max).contains(&candidate.price_eur));
        let distance_ok = self
            .max_distance_km
            .is_none_or(|limit| candidate.distance_km <= limit);
        price_ok && distance_ok
    }
}
