//! Rank destination candidates by predicted probability.
//!
//! The engine scores every candidate with an injected [`Predictor`], orders
//! them by descending probability and keeps the first `K`. Ordering is
//! stable: candidates with equal probabilities keep their input order.
//! Candidates whose climate cannot be encoded are skipped and reported as
//! [`RankingWarning`]s rather than failing the whole ranking.

use log::{debug, info, warn};

use crate::{
    Candidate, FeatureEncoder, Predictor, RankedOption, RawCandidate, ScoredCandidate, TripQuery,
};

/// Number of results returned when no other limit is configured.
pub const DEFAULT_TOP_K: usize = 3;

/// A candidate left out of a ranking, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankingWarning {
    /// Zero-based position of the candidate in the input.
    pub index: usize,
    /// City of the excluded candidate.
    pub city: String,
    /// Human-readable cause.
    pub reason: String,
}

/// Ordered results of one ranking run.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ranking {
    /// At most `K` candidates, best first.
    pub options: Vec<ScoredCandidate>,
    /// Candidates excluded because they could not be encoded.
    pub warnings: Vec<RankingWarning>,
}

impl Ranking {
    /// Number of ranked options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Report whether no option was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Presenter view of the options, numbered from one.
    #[must_use]
    pub fn ranked_options(&self) -> Vec<RankedOption> {
        self.options
            .iter()
            .zip(1_usize..)
            .map(|(scored, rank)| RankedOption {
                rank,
                city: scored.candidate.city.clone(),
                price_eur: scored.candidate.price_eur,
                probability: scored.probability,
            })
            .collect()
    }
}

/// Scores and orders candidates with a shared, read-only predictor.
///
/// # Examples
/// ```
/// use wayfare_core::{Climate, FeatureEncoder, FeatureVector, Predictor, RankingEngine, RawCandidate};
///
/// struct CheapIsBetter;
///
/// impl Predictor for CheapIsBetter {
///     fn probability(&self, features: &FeatureVector) -> f64 {
///         1.0 / (1.0 + features.price_eur / 100.0)
///     }
/// }
///
/// let engine = RankingEngine::new(CheapIsBetter);
/// let encoder = FeatureEncoder::new(Climate::Dry, 2);
/// let raw = vec![
///     RawCandidate::new("Paris", 300.0, 1_000.0, "dry", true),
///     RawCandidate::new("Valencia", 50.0, 300.0, "dry", false),
/// ];
/// let ranking = engine.rank(&raw, &encoder);
/// assert_eq!(ranking.options[0].candidate.city, "Valencia");
/// ```
#[derive(Debug, Clone)]
pub struct RankingEngine<P> {
    predictor: P,
    top_k: usize,
}

impl<P: Predictor> RankingEngine<P> {
    /// Create an engine returning [`DEFAULT_TOP_K`] results.
    pub const fn new(predictor: P) -> Self {
        Self {
            predictor,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Return at most `top_k` results.
    #[must_use]
    pub const fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Configured result limit.
    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Predictor backing the engine.
    pub const fn predictor(&self) -> &P {
        &self.predictor
    }

    /// Score a single encoded candidate.
    pub fn score(&self, candidate: Candidate) -> ScoredCandidate {
        let prediction = self.predictor.predict(&candidate.features());
        ScoredCandidate {
            candidate,
            probability: prediction.probability,
            decision: prediction.decision,
        }
    }

    /// Score, order and truncate already encoded candidates.
    pub fn rank_candidates<I>(&self, candidates: I) -> Vec<ScoredCandidate>
    where
        I: IntoIterator<Item = Candidate>,
    {
        order_and_truncate(candidates.into_iter().map(|c| self.score(c)), self.top_k)
    }

    /// Encode, score, order and truncate raw candidates.
    ///
    /// Candidates that fail to encode are excluded and reported in
    /// [`Ranking::warnings`].
    pub fn rank(&self, raw: &[RawCandidate], encoder: &FeatureEncoder) -> Ranking {
        self.rank_with_limit(raw.iter().enumerate(), encoder, self.top_k)
    }

    /// Rank raw candidates for a query.
    ///
    /// Candidates outside the query's price and distance window are dropped
    /// before encoding, and the query's own `top_k` applies.
    pub fn rank_query(&self, query: &TripQuery, raw: &[RawCandidate]) -> Ranking {
        let in_window = raw
            .iter()
            .enumerate()
            .filter(|(_, candidate)| query.accepts(candidate));
        let encoder = query.encoder();
        self.rank_with_limit(in_window, &encoder, query.top_k())
    }

    fn rank_with_limit<'a, I>(&self, raw: I, encoder: &FeatureEncoder, top_k: usize) -> Ranking
    where
        I: Iterator<Item = (usize, &'a RawCandidate)>,
    {
        let mut warnings = Vec::new();
        let mut encoded = Vec::new();
        for (index, candidate) in raw {
            match encoder.encode(candidate) {
                Ok(ok) => encoded.push(ok),
                Err(err) => {
                    warn!("excluding candidate {index} ({}): {err}", candidate.city);
                    warnings.push(RankingWarning {
                        index,
                        city: candidate.city.clone(),
                        reason: err.to_string(),
                    });
                }
            }
        }
        debug!(
            "scoring {} candidates ({} excluded)",
            encoded.len(),
            warnings.len()
        );
        let scored = encoded.into_iter().map(|c| self.score(c));
        let options = order_and_truncate(scored, top_k);
        info!("ranked {} options (limit {top_k})", options.len());
        Ranking { options, warnings }
    }
}

fn order_and_truncate<I>(scored: I, top_k: usize) -> Vec<ScoredCandidate>
where
    I: Iterator<Item = ScoredCandidate>,
{
    let mut ordered: Vec<ScoredCandidate> = scored.collect();
    // `sort_by` is stable, so ties keep their input order.
    ordered.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    ordered.truncate(top_k);
    ordered
}
