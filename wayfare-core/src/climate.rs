//! Climate categories and the preference match score fed to the model.
//!
//! Climates sit on a fixed ordinal scale (`polar < dry < tropical`). The
//! distance between a destination's climate and the traveller's preference
//! maps onto exactly three scores through [`ClimateMatch`].
//!
//! # Examples
//! ```
//! use wayfare_core::{Climate, ClimateMatch};
//!
//! let score = Climate::Tropical.match_against(Climate::Polar);
//! assert_eq!(score, ClimateMatch::Opposite);
//! assert_eq!(score.score(), 2);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Readings at or above this temperature classify as tropical.
pub const TROPICAL_THRESHOLD_CELSIUS: f64 = 25.0;
/// Readings at or below this temperature classify as polar.
pub const POLAR_THRESHOLD_CELSIUS: f64 = 0.0;

/// A coarse climate classification.
///
/// Variants are declared in ordinal order, so the derived `Ord` follows the
/// `polar < dry < tropical` scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Climate {
    /// Cold destinations.
    Polar,
    /// Temperate and dry destinations; the middle of the scale.
    Dry,
    /// Hot destinations.
    Tropical,
}

/// Errors raised when a climate label or reading cannot be classified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidCategoryError {
    /// The label is not one of `tropical`, `dry` or `polar`.
    #[error("unknown climate '{value}' (expected tropical, dry or polar)")]
    UnknownClimate {
        /// Label as supplied by the caller.
        value: String,
    },
    /// A temperature reading was NaN or infinite.
    #[error("temperature reading {celsius} is not a finite number")]
    NonFiniteTemperature {
        /// Offending reading in degrees Celsius.
        celsius: f64,
    },
}

impl Climate {
    /// Every climate in ordinal order.
    pub const ALL: [Self; 3] = [Self::Polar, Self::Dry, Self::Tropical];

    /// Position on the ordinal scale: polar is 0, dry is 1, tropical is 2.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Polar => 0,
            Self::Dry => 1,
            Self::Tropical => 2,
        }
    }

    /// Return the climate as a lowercase `&str`.
    ///
    /// # Examples
    /// ```
    /// use wayfare_core::Climate;
    ///
    /// assert_eq!(Climate::Dry.as_str(), "dry");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Polar => "polar",
            Self::Dry => "dry",
            Self::Tropical => "tropical",
        }
    }

    /// Classify a temperature reading in degrees Celsius.
    ///
    /// # Errors
    /// Returns [`InvalidCategoryError::NonFiniteTemperature`] for NaN or
    /// infinite readings.
    ///
    /// # Examples
    /// ```
    /// use wayfare_core::Climate;
    ///
    /// assert_eq!(Climate::from_temperature(31.5), Ok(Climate::Tropical));
    /// assert_eq!(Climate::from_temperature(12.0), Ok(Climate::Dry));
    /// assert_eq!(Climate::from_temperature(-4.0), Ok(Climate::Polar));
    /// ```
    pub fn from_temperature(celsius: f64) -> Result<Self, InvalidCategoryError> {
        if !celsius.is_finite() {
            return Err(InvalidCategoryError::NonFiniteTemperature { celsius });
        }
        if celsius >= TROPICAL_THRESHOLD_CELSIUS {
            Ok(Self::Tropical)
        } else if celsius <= POLAR_THRESHOLD_CELSIUS {
            Ok(Self::Polar)
        } else {
            Ok(Self::Dry)
        }
    }

    /// Rate this (actual) climate against a traveller's `preferred` climate.
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "ordinals are always below the table dimensions"
    )]
    pub const fn match_against(self, preferred: Self) -> ClimateMatch {
        MATCH_TABLE[self.ordinal() as usize][preferred.ordinal() as usize]
    }
}

impl fmt::Display for Climate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Climate {
    type Err = InvalidCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "polar" => Ok(Self::Polar),
            "dry" => Ok(Self::Dry),
            "tropical" => Ok(Self::Tropical),
            _ => Err(InvalidCategoryError::UnknownClimate {
                value: s.to_owned(),
            }),
        }
    }
}

/// How closely a destination's climate matches the stated preference.
///
/// Only three outcomes exist regardless of finer temperature differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ClimateMatch {
    /// Same climate; scores 10.
    Exact,
    /// One step apart on the ordinal scale; scores 5.
    Adjacent,
    /// Polar against tropical; scores 2.
    Opposite,
}

// Rows are the actual climate, columns the preferred one, both by ordinal.
const MATCH_TABLE: [[ClimateMatch; 3]; 3] = [
    [
        ClimateMatch::Exact,
        ClimateMatch::Adjacent,
        ClimateMatch::Opposite,
    ],
    [
        ClimateMatch::Adjacent,
        ClimateMatch::Exact,
        ClimateMatch::Adjacent,
    ],
    [
        ClimateMatch::Opposite,
        ClimateMatch::Adjacent,
        ClimateMatch::Exact,
    ],
];

impl ClimateMatch {
    /// Numeric score consumed by the scoring model.
    #[must_use]
    pub const fn score(self) -> u8 {
        match self {
            Self::Exact => 10,
            Self::Adjacent => 5,
            Self::Opposite => 2,
        }
    }

    /// Map a numeric score back onto a match, if it is one of 2, 5 or 10.
    #[must_use]
    pub const fn from_score(score: u8) -> Option<Self> {
        match score {
            10 => Some(Self::Exact),
            5 => Some(Self::Adjacent),
            2 => Some(Self::Opposite),
            _ => None,
        }
    }
}

/// Score a pair of climate labels as supplied by a candidate source.
///
/// # Errors
/// Returns [`InvalidCategoryError::UnknownClimate`] when either label is not
/// a recognised climate.
///
/// # Examples
/// ```
/// use wayfare_core::climate_match_score;
///
/// assert_eq!(climate_match_score("dry", "polar"), Ok(5));
/// assert!(climate_match_score("temperate", "polar").is_err());
/// ```
pub fn climate_match_score(actual: &str, preferred: &str) -> Result<u8, InvalidCategoryError> {
    let actual_climate = actual.parse::<Climate>()?;
    let preferred_climate = preferred.parse::<Climate>()?;
    Ok(actual_climate.match_against(preferred_climate).score())
}
