//! Historical observations used to fit the scoring model.

use thiserror::Error;

use crate::FeatureVector;

/// One historical trip outcome.
///
/// Records are validated on construction and immutable afterwards.
///
/// # Examples
/// ```
/// use wayfare_core::TrainingRecord;
///
/// # fn main() -> Result<(), wayfare_core::TrainingRecordError> {
/// let record = TrainingRecord::new(true, 2, 350.0, 120.0, false, 10)?;
/// assert!(record.admitted());
/// assert_eq!(record.features().climate_match, 10.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingRecord {
    admitted: bool,
    party_size: u32,
    distance_km: f64,
    price_eur: f64,
    is_foreign: bool,
    climate_preference_score: u8,
}

/// Errors returned by [`TrainingRecord::new`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrainingRecordError {
    /// The party must contain at least one traveller.
    #[error("party size must be at least 1")]
    InvalidPartySize,
    /// A numeric field was NaN or infinite.
    #[error("{field} must be a finite number, found {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// A numeric field was below zero.
    #[error("{field} must not be negative, found {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// Value supplied.
        value: f64,
    },
}

impl TrainingRecord {
    /// Validate and construct a [`TrainingRecord`].
    ///
    /// # Errors
    /// Returns [`TrainingRecordError`] when the party is empty or when the
    /// distance or price is negative or not finite.
    pub fn new(
        admitted: bool,
        party_size: u32,
        distance_km: f64,
        price_eur: f64,
        is_foreign: bool,
        climate_preference_score: u8,
    ) -> Result<Self, TrainingRecordError> {
        if party_size == 0 {
            return Err(TrainingRecordError::InvalidPartySize);
        }
        check_non_negative("distance_km", distance_km)?;
        check_non_negative("price_eur", price_eur)?;
        Ok(Self {
            admitted,
            party_size,
            distance_km,
            price_eur,
            is_foreign,
            climate_preference_score,
        })
    }

    /// Observed outcome.
    #[must_use]
    pub const fn admitted(&self) -> bool {
        self.admitted
    }

    /// Observed outcome as `1.0` or `0.0`.
    #[must_use]
    pub fn outcome(&self) -> f64 {
        f64::from(u8::from(self.admitted))
    }

    /// Number of travellers.
    #[must_use]
    pub const fn party_size(&self) -> u32 {
        self.party_size
    }

    /// Distance in kilometres.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Price in euros.
    #[must_use]
    pub const fn price_eur(&self) -> f64 {
        self.price_eur
    }

    /// Whether the traveller was foreign to the destination.
    #[must_use]
    pub const fn is_foreign(&self) -> bool {
        self.is_foreign
    }

    /// Recorded climate preference code.
    #[must_use]
    pub const fn climate_preference_score(&self) -> u8 {
        self.climate_preference_score
    }

    /// Feature vector for this record.
    #[must_use]
    pub fn features(&self) -> FeatureVector {
        FeatureVector {
            party_size: f64::from(self.party_size),
            distance_km: self.distance_km,
            price_eur: self.price_eur,
            is_foreign: f64::from(u8::from(self.is_foreign)),
            climate_match: f64::from(self.climate_preference_score),
        }
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), TrainingRecordError> {
    if !value.is_finite() {
        return Err(TrainingRecordError::NonFinite { field, value });
    }
    if value < 0.0 {
        return Err(TrainingRecordError::Negative { field, value });
    }
    Ok(())
}
