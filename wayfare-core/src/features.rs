//! Feature vectors and the encoder that derives them from raw candidates.

use crate::{Candidate, Climate, InvalidCategoryError, RawCandidate};

/// Number of model features, excluding the intercept.
pub const FEATURE_COUNT: usize = 5;

/// Column names of the features in training datasets, in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "per",
    "dis",
    "din",
    "nativo_extranjero",
    "preferencia_clima",
];

/// Numeric inputs to the scoring model.
///
/// Values are not range-checked: a predictor evaluates whatever it is given.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureVector {
    /// Number of travellers.
    pub party_size: f64,
    /// Distance in kilometres.
    pub distance_km: f64,
    /// Price in euros.
    pub price_eur: f64,
    /// `1.0` for a foreign destination, `0.0` otherwise.
    pub is_foreign: f64,
    /// Climate match score (2, 5 or 10 for encoded candidates).
    pub climate_match: f64,
}

impl FeatureVector {
    /// Features in [`FEATURE_NAMES`] order.
    #[must_use]
    pub const fn to_array(self) -> [f64; FEATURE_COUNT] {
        [
            self.party_size,
            self.distance_km,
            self.price_eur,
            self.is_foreign,
            self.climate_match,
        ]
    }

    /// Build a vector from values in [`FEATURE_NAMES`] order.
    #[must_use]
    pub const fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [party_size, distance_km, price_eur, is_foreign, climate_match] = values;
        Self {
            party_size,
            distance_km,
            price_eur,
            is_foreign,
            climate_match,
        }
    }
}

/// Turns raw candidates into scored-ready [`Candidate`]s for one query.
///
/// # Examples
/// ```
/// use wayfare_core::{Climate, ClimateMatch, FeatureEncoder, RawCandidate};
///
/// # fn main() -> Result<(), wayfare_core::InvalidCategoryError> {
/// let encoder = FeatureEncoder::new(Climate::Polar, 2);
/// let raw = RawCandidate::new("Cancún", 640.0, 8_300.0, "tropical", true);
/// let candidate = encoder.encode(&raw)?;
/// assert_eq!(candidate.climate_match, ClimateMatch::Opposite);
/// assert_eq!(candidate.party_size, 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureEncoder {
    preferred_climate: Climate,
    party_size: u32,
}

impl FeatureEncoder {
    /// Create an encoder for a traveller's climate preference and party size.
    #[must_use]
    pub const fn new(preferred_climate: Climate, party_size: u32) -> Self {
        Self {
            preferred_climate,
            party_size,
        }
    }

    /// Preferred climate applied to every candidate.
    #[must_use]
    pub const fn preferred_climate(&self) -> Climate {
        self.preferred_climate
    }

    /// Party size carried into every candidate.
    #[must_use]
    pub const fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Encode one raw candidate.
    ///
    /// # Errors
    /// Returns [`InvalidCategoryError`] when the candidate's climate label is
    /// not recognised.
    pub fn encode(&self, raw: &RawCandidate) -> Result<Candidate, InvalidCategoryError> {
        let actual = raw.climate.parse::<Climate>()?;
        Ok(Candidate {
            city: raw.city.clone(),
            price_eur: raw.price_eur,
            distance_km: raw.distance_km,
            climate_match: actual.match_against(self.preferred_climate),
            is_foreign: raw.is_foreign,
            party_size: self.party_size,
        })
    }
}
