//! Maximum-likelihood logistic regression fitted by Newton–Raphson.
//!
//! The model scores `P(admit = 1) = σ(β₀ + β·x)` over the five trip
//! features. Fitting iterates Newton steps on the log-likelihood until the
//! largest coefficient change drops below the tolerance, and rejects
//! datasets that are empty, have a constant outcome, are perfectly separable
//! or leave the information matrix singular.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wayfare_core::{FEATURE_COUNT, FeatureVector, Predictor, TrainingRecord, logistic};

use crate::linalg;

/// Number of fitted coefficients, intercept included.
pub const COEFFICIENT_COUNT: usize = FEATURE_COUNT + 1;

/// Absolute gap below which every fitted probability is considered to
/// reproduce its outcome exactly.
const PERFECT_PREDICTION_TOLERANCE: f64 = 1e-8;

/// Fitted logistic regression coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coefficients {
    /// Intercept `β₀`.
    pub intercept: f64,
    /// Weight of the party size.
    pub party_size: f64,
    /// Weight of the distance in kilometres.
    pub distance_km: f64,
    /// Weight of the price in euros.
    pub price_eur: f64,
    /// Weight of the foreign-destination flag.
    pub is_foreign: f64,
    /// Weight of the climate match score.
    pub climate_match: f64,
}

impl Coefficients {
    /// Coefficients as `[intercept, features…]`.
    #[must_use]
    pub const fn to_array(self) -> [f64; COEFFICIENT_COUNT] {
        [
            self.intercept,
            self.party_size,
            self.distance_km,
            self.price_eur,
            self.is_foreign,
            self.climate_match,
        ]
    }

    /// Build coefficients from `[intercept, features…]`.
    #[must_use]
    pub const fn from_array(values: [f64; COEFFICIENT_COUNT]) -> Self {
        let [
            intercept,
            party_size,
            distance_km,
            price_eur,
            is_foreign,
            climate_match,
        ] = values;
        Self {
            intercept,
            party_size,
            distance_km,
            price_eur,
            is_foreign,
            climate_match,
        }
    }

    /// Linear predictor `β₀ + β·x` for `features`.
    #[must_use]
    pub fn linear(&self, features: &FeatureVector) -> f64 {
        dot(&self.to_array(), &design_row(features))
    }
}

/// Tunables for [`LogisticModel::fit_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    /// Upper bound on Newton iterations.
    pub max_iterations: u32,
    /// Convergence threshold on the largest absolute coefficient change.
    pub tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 35,
            tolerance: 1e-8,
        }
    }
}

/// Diagnostics from a successful fit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitReport {
    /// Newton iterations performed.
    pub iterations: u32,
    /// Log-likelihood at the fitted coefficients.
    pub log_likelihood: f64,
    /// Number of training records used.
    pub records: usize,
}

/// A fitted model together with its diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel {
    /// The model, ready for prediction.
    pub model: LogisticModel,
    /// How the fit went.
    pub report: FitReport,
}

/// Errors raised when fitting a [`LogisticModel`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelFitError {
    /// No training records were supplied.
    #[error("training set is empty")]
    EmptyTrainingSet,
    /// Every record shares the same outcome.
    #[error("training outcomes have no variance (all records admitted = {admitted})")]
    ConstantOutcome {
        /// The single observed outcome.
        admitted: bool,
    },
    /// Fit options were unusable.
    #[error("invalid fit options: {reason}")]
    InvalidOptions {
        /// What was wrong.
        reason: &'static str,
    },
    /// The features separate the outcomes perfectly, so no finite maximum
    /// exists.
    #[error("training data is perfectly separable (detected at iteration {iteration})")]
    PerfectSeparation {
        /// Iteration at which the fitted values matched every outcome.
        iteration: u32,
    },
    /// The information matrix could not be inverted, e.g. a constant feature
    /// or fewer records than coefficients.
    #[error("information matrix is singular at iteration {iteration}")]
    SingularInformation {
        /// Iteration at which the solve failed.
        iteration: u32,
    },
    /// The iteration budget ran out before convergence.
    #[error("fit did not converge within {iterations} iterations")]
    NotConverged {
        /// Iterations performed.
        iterations: u32,
    },
}

/// A logistic regression over the trip features.
///
/// The model is immutable once built and can be shared across threads.
///
/// # Examples
/// ```
/// use wayfare_core::{FeatureVector, Predictor};
/// use wayfare_model::{Coefficients, LogisticModel};
///
/// let model = LogisticModel::new(Coefficients {
///     intercept: 1.0,
///     price_eur: -0.01,
///     ..Coefficients::default()
/// });
/// let features = FeatureVector { price_eur: 100.0, ..FeatureVector::default() };
/// assert_eq!(model.probability(&features), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticModel {
    coefficients: Coefficients,
}

impl LogisticModel {
    /// Wrap known coefficients.
    #[must_use]
    pub const fn new(coefficients: Coefficients) -> Self {
        Self { coefficients }
    }

    /// Fitted coefficients.
    #[must_use]
    pub const fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    /// Fit a model with [`FitOptions::default`].
    ///
    /// # Errors
    /// See [`LogisticModel::fit_with`].
    pub fn fit(records: &[TrainingRecord]) -> Result<FittedModel, ModelFitError> {
        Self::fit_with(records, FitOptions::default())
    }

    /// Fit a model by Newton–Raphson on the log-likelihood.
    ///
    /// # Errors
    /// Returns [`ModelFitError`] when the options are invalid, the training
    /// set is empty or has a constant outcome, the data are perfectly
    /// separable, the information matrix is singular, or the iteration budget
    /// runs out.
    pub fn fit_with(
        records: &[TrainingRecord],
        options: FitOptions,
    ) -> Result<FittedModel, ModelFitError> {
        validate_options(options)?;
        let first = records.first().ok_or(ModelFitError::EmptyTrainingSet)?;
        if records.iter().all(|r| r.admitted() == first.admitted()) {
            return Err(ModelFitError::ConstantOutcome {
                admitted: first.admitted(),
            });
        }

        let observations: Vec<Observation> = records.iter().map(Observation::from).collect();
        let mut beta = [0.0_f64; COEFFICIENT_COUNT];
        for iteration in 1..=options.max_iterations {
            let step = newton_step(&observations, &beta, iteration)?;
            add_assign(&mut beta, &step);
            let largest = step.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
            debug!("newton iteration {iteration}: largest coefficient change {largest:e}");
            if largest <= options.tolerance {
                let log_likelihood = log_likelihood(&observations, &beta);
                info!(
                    "fitted logistic model on {} records in {iteration} iterations \
                     (log-likelihood {log_likelihood:.4})",
                    records.len()
                );
                return Ok(FittedModel {
                    model: Self::new(Coefficients::from_array(beta)),
                    report: FitReport {
                        iterations: iteration,
                        log_likelihood,
                        records: records.len(),
                    },
                });
            }
        }
        Err(ModelFitError::NotConverged {
            iterations: options.max_iterations,
        })
    }
}

impl Predictor for LogisticModel {
    fn probability(&self, features: &FeatureVector) -> f64 {
        logistic(self.coefficients.linear(features))
    }
}

struct Observation {
    row: [f64; COEFFICIENT_COUNT],
    outcome: f64,
}

impl From<&TrainingRecord> for Observation {
    fn from(record: &TrainingRecord) -> Self {
        Self {
            row: design_row(&record.features()),
            outcome: record.outcome(),
        }
    }
}

const fn validate_options(options: FitOptions) -> Result<(), ModelFitError> {
    if options.max_iterations == 0 {
        return Err(ModelFitError::InvalidOptions {
            reason: "max_iterations must be at least 1",
        });
    }
    if !options.tolerance.is_finite() || options.tolerance <= 0.0 {
        return Err(ModelFitError::InvalidOptions {
            reason: "tolerance must be a positive finite number",
        });
    }
    Ok(())
}

/// Compute the Newton update `(XᵀWX)⁻¹ Xᵀ(y − p)` at `beta`.
#[expect(
    clippy::float_arithmetic,
    reason = "score and information accumulate weighted products"
)]
fn newton_step(
    observations: &[Observation],
    beta: &[f64; COEFFICIENT_COUNT],
    iteration: u32,
) -> Result<[f64; COEFFICIENT_COUNT], ModelFitError> {
    let mut gradient = [0.0_f64; COEFFICIENT_COUNT];
    let mut information = [[0.0_f64; COEFFICIENT_COUNT]; COEFFICIENT_COUNT];
    let mut perfectly_fitted = true;

    for obs in observations {
        let fitted = logistic(dot(beta, &obs.row));
        let residual = obs.outcome - fitted;
        perfectly_fitted &= residual.abs() <= PERFECT_PREDICTION_TOLERANCE;
        let weight = fitted * (1.0 - fitted);
        let rows = gradient.iter_mut().zip(information.iter_mut());
        for ((grad, info_row), &x_j) in rows.zip(&obs.row) {
            *grad += residual * x_j;
            for (cell, &x_k) in info_row.iter_mut().zip(&obs.row) {
                *cell += weight * x_j * x_k;
            }
        }
    }

    if perfectly_fitted {
        return Err(ModelFitError::PerfectSeparation { iteration });
    }
    linalg::solve(information, gradient).ok_or(ModelFitError::SingularInformation { iteration })
}

#[expect(
    clippy::float_arithmetic,
    reason = "log-likelihood sums per-record terms"
)]
fn log_likelihood(observations: &[Observation], beta: &[f64; COEFFICIENT_COUNT]) -> f64 {
    observations
        .iter()
        .map(|obs| {
            let z = dot(beta, &obs.row);
            obs.outcome * z - softplus(z)
        })
        .sum()
}

/// `ln(1 + e^z)` without overflow.
#[expect(clippy::float_arithmetic, reason = "stable softplus")]
fn softplus(z: f64) -> f64 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

const fn design_row(features: &FeatureVector) -> [f64; COEFFICIENT_COUNT] {
    let [a, b, c, d, e] = features.to_array();
    [1.0, a, b, c, d, e]
}

#[expect(clippy::float_arithmetic, reason = "dot product")]
fn dot(lhs: &[f64; COEFFICIENT_COUNT], rhs: &[f64; COEFFICIENT_COUNT]) -> f64 {
    lhs.iter().zip(rhs).map(|(l, r)| l * r).sum()
}

#[expect(clippy::float_arithmetic, reason = "coefficient update")]
fn add_assign(target: &mut [f64; COEFFICIENT_COUNT], step: &[f64; COEFFICIENT_COUNT]) {
    for (value, delta) in target.iter_mut().zip(step) {
        *value += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    fn record(
        admitted: bool,
        party: u32,
        distance: f64,
        price: f64,
        foreign: bool,
        climate: u8,
    ) -> TrainingRecord {
        TrainingRecord::new(admitted, party, distance, price, foreign, climate)
            .expect("valid record")
    }

    #[fixture]
    fn overlapping_records() -> Vec<TrainingRecord> {
        vec![
            record(true, 1, 200.0, 220.0, false, 10),
            record(true, 2, 700.0, 200.0, true, 5),
            record(true, 4, 1_500.0, 340.0, false, 5),
            record(true, 2, 1_000.0, 300.0, false, 5),
            record(true, 2, 1_000.0, 380.0, true, 5),
            record(false, 4, 2_700.0, 370.0, false, 5),
            record(false, 2, 1_300.0, 410.0, false, 2),
            record(false, 4, 2_400.0, 650.0, true, 10),
            record(false, 4, 1_000.0, 250.0, false, 5),
            record(false, 4, 2_900.0, 490.0, false, 10),
        ]
    }

    #[rstest]
    fn fit_converges_on_overlapping_data(overlapping_records: Vec<TrainingRecord>) {
        let fitted = LogisticModel::fit(&overlapping_records).expect("fit converges");
        assert_eq!(fitted.report.iterations, 8);
        assert_eq!(fitted.report.records, 10);
        assert!((fitted.report.log_likelihood - -3.153_934).abs() < 1e-4);
        let coefficients = fitted.model.coefficients();
        assert!(coefficients.distance_km < 0.0);
        assert!(coefficients.price_eur < 0.0);
        assert!((coefficients.intercept - 7.029_136).abs() < 1e-3);
    }

    #[rstest]
    fn score_equations_vanish_at_the_optimum(overlapping_records: Vec<TrainingRecord>) {
        let fitted = LogisticModel::fit(&overlapping_records).expect("fit converges");
        let observations: Vec<Observation> =
            overlapping_records.iter().map(Observation::from).collect();
        let beta = fitted.model.coefficients().to_array();
        let residual_sum: f64 = observations
            .iter()
            .map(|obs| obs.outcome - logistic(dot(&beta, &obs.row)))
            .sum();
        assert!(residual_sum.abs() < 1e-6, "intercept score {residual_sum}");
    }

    #[rstest]
    fn fit_rejects_empty_training_set() {
        assert_eq!(
            LogisticModel::fit(&[]),
            Err(ModelFitError::EmptyTrainingSet)
        );
    }

    #[rstest]
    fn fit_rejects_constant_outcome(overlapping_records: Vec<TrainingRecord>) {
        let admitted: Vec<_> = overlapping_records
            .into_iter()
            .filter(TrainingRecord::admitted)
            .collect();
        assert_eq!(
            LogisticModel::fit(&admitted),
            Err(ModelFitError::ConstantOutcome { admitted: true })
        );
    }

    #[rstest]
    fn fit_rejects_separable_data() {
        let records = vec![
            record(true, 2, 300.0, 120.0, false, 10),
            record(true, 1, 450.0, 180.0, true, 5),
            record(true, 3, 600.0, 150.0, false, 10),
            record(true, 2, 800.0, 260.0, true, 5),
            record(true, 4, 1_500.0, 300.0, false, 2),
            record(false, 2, 2_500.0, 650.0, true, 2),
            record(false, 1, 1_200.0, 200.0, false, 10),
            record(false, 3, 3_000.0, 800.0, true, 5),
            record(false, 2, 2_200.0, 520.0, false, 2),
            record(false, 4, 900.0, 280.0, true, 10),
        ];
        assert!(matches!(
            LogisticModel::fit(&records),
            Err(ModelFitError::PerfectSeparation { .. })
        ));
    }

    #[rstest]
    fn fit_rejects_constant_feature(overlapping_records: Vec<TrainingRecord>) {
        let domestic: Vec<_> = overlapping_records
            .iter()
            .map(|r| {
                record(
                    r.admitted(),
                    r.party_size(),
                    r.distance_km(),
                    r.price_eur(),
                    false,
                    r.climate_preference_score(),
                )
            })
            .collect();
        assert_eq!(
            LogisticModel::fit(&domestic),
            Err(ModelFitError::SingularInformation { iteration: 1 })
        );
    }

    #[rstest]
    fn fit_reports_exhausted_budget(overlapping_records: Vec<TrainingRecord>) {
        let options = FitOptions {
            max_iterations: 2,
            ..FitOptions::default()
        };
        assert_eq!(
            LogisticModel::fit_with(&overlapping_records, options),
            Err(ModelFitError::NotConverged { iterations: 2 })
        );
    }

    #[rstest]
    #[case(0, 1e-8)]
    #[case(10, 0.0)]
    #[case(10, f64::NAN)]
    fn fit_rejects_invalid_options(
        overlapping_records: Vec<TrainingRecord>,
        #[case] max_iterations: u32,
        #[case] tolerance: f64,
    ) {
        let options = FitOptions {
            max_iterations,
            tolerance,
        };
        assert!(matches!(
            LogisticModel::fit_with(&overlapping_records, options),
            Err(ModelFitError::InvalidOptions { .. })
        ));
    }

    #[rstest]
    fn prediction_is_deterministic(overlapping_records: Vec<TrainingRecord>) {
        let model = LogisticModel::fit(&overlapping_records)
            .expect("fit converges")
            .model;
        let features = FeatureVector {
            party_size: 3.0,
            distance_km: 1_250.0,
            price_eur: 275.0,
            is_foreign: 1.0,
            climate_match: 5.0,
        };
        let first = model.probability(&features);
        let second = model.probability(&features);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[rstest]
    fn coefficients_round_trip_through_arrays() {
        let values = [0.5, -1.0, 0.001, -0.02, 2.0, 0.3];
        assert_eq!(Coefficients::from_array(values).to_array(), values);
    }

    #[rstest]
    #[case(-800.0)]
    #[case(0.0)]
    #[case(800.0)]
    fn softplus_never_overflows(#[case] z: f64) {
        assert!(softplus(z).is_finite());
    }
}
