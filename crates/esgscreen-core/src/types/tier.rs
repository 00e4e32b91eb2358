//! Data-driven qualification tiers.
//!
//! A [`TierScheme`] is an ordered list of bands, each with an inclusive upper
//! percentile bound. The number of tiers and their names are configuration:
//! the 3-tier "Elite/Review/Replace", the 4-tier
//! "Elite/Qualified/Watchlist/Review" and the relabeled
//! "Leadership/Core/Evaluation" schemes are all expressible without code
//! changes.

use crate::error::{ScreenError, ScreenResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Highest percentile a scheme must cover.
pub const PERCENTILE_CEILING: f64 = 100.0;

/// A qualification tier assigned to a fund.
///
/// Ordered by `ordinal`; ordinal 0 is the best tier of its scheme.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tier {
    /// Position in the scheme (0 = best).
    pub ordinal: usize,
    /// Tier name.
    pub name: String,
}

impl Tier {
    /// Returns true if this is the best tier of its scheme.
    #[must_use]
    pub fn is_best(&self) -> bool {
        self.ordinal == 0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// One band of a tier scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    /// Tier name.
    pub name: String,

    /// Inclusive upper percentile bound.
    pub upper_bound: f64,

    /// Human-readable description, used in methodology output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TierBand {
    /// Creates a band without a description.
    #[must_use]
    pub fn new(name: impl Into<String>, upper_bound: f64) -> Self {
        Self {
            name: name.into(),
            upper_bound,
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Validated, ordered tier thresholds.
///
/// # Examples
///
/// ```
/// use esgscreen_core::{TierBand, TierScheme};
///
/// let scheme = TierScheme::new(vec![
///     TierBand::new("Leadership", 25.0),
///     TierBand::new("Core", 50.0),
///     TierBand::new("Evaluation", 100.0),
/// ])
/// .unwrap();
///
/// assert_eq!(scheme.classify(25.0).name, "Leadership");
/// assert_eq!(scheme.classify(25.1).name, "Core");
/// assert_eq!(scheme.classify(100.0).name, "Evaluation");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TierBand>", into = "Vec<TierBand>")]
pub struct TierScheme {
    bands: Vec<TierBand>,
}

impl TierScheme {
    /// Creates a scheme, validating the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Configuration`] if the scheme is empty, a name is
    /// blank or repeated, a bound is not a positive finite number, bounds are
    /// not strictly increasing, or the last bound is below 100.
    pub fn new(bands: Vec<TierBand>) -> ScreenResult<Self> {
        validate_bands(&bands)?;
        Ok(Self { bands })
    }

    /// The "Elite or Replace" scheme: Elite ≤ 25, Review ≤ 50, Replace ≤ 100.
    ///
    /// Provided by name only; there is no default scheme.
    #[must_use]
    pub fn elite_review_replace() -> Self {
        Self {
            bands: vec![
                TierBand::new("Elite", 25.0).with_description(
                    "Top Quartile - Automatic qualification. Best-in-class ESG performance.",
                ),
                TierBand::new("Review", 50.0).with_description(
                    "Second Quartile - Requires IC justification. Consider replacement with Elite alternative.",
                ),
                TierBand::new("Replace", PERCENTILE_CEILING).with_description(
                    "Bottom Half - Replace at next rebalancing. Insufficient ESG quality.",
                ),
            ],
        }
    }

    /// Returns the bands, best first.
    #[must_use]
    pub fn bands(&self) -> &[TierBand] {
        &self.bands
    }

    /// Number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Always false for a validated scheme.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Returns the tier at the given ordinal.
    #[must_use]
    pub fn tier(&self, ordinal: usize) -> Option<Tier> {
        self.bands.get(ordinal).map(|band| Tier {
            ordinal,
            name: band.name.clone(),
        })
    }

    /// Returns all tiers, best first.
    #[must_use]
    pub fn tiers(&self) -> Vec<Tier> {
        (0..self.bands.len()).filter_map(|i| self.tier(i)).collect()
    }

    /// Returns the band for a tier name.
    #[must_use]
    pub fn band(&self, name: &str) -> Option<&TierBand> {
        self.bands.iter().find(|b| b.name == name)
    }

    /// Returns the band index a percentile falls into.
    ///
    /// The first band whose upper bound is ≥ the percentile wins. Values above
    /// the last bound, and NaN, fall into the last (worst) band.
    #[must_use]
    pub fn band_index(&self, percentile: f64) -> usize {
        self.bands
            .iter()
            .position(|band| percentile <= band.upper_bound)
            .unwrap_or(self.bands.len().saturating_sub(1))
    }

    /// Classifies a percentile into a tier.
    #[must_use]
    pub fn classify(&self, percentile: f64) -> Tier {
        let ordinal = self.band_index(percentile);
        Tier {
            ordinal,
            name: self.bands[ordinal].name.clone(),
        }
    }
}

impl TryFrom<Vec<TierBand>> for TierScheme {
    type Error = ScreenError;

    fn try_from(bands: Vec<TierBand>) -> Result<Self, Self::Error> {
        Self::new(bands)
    }
}

impl From<TierScheme> for Vec<TierBand> {
    fn from(scheme: TierScheme) -> Self {
        scheme.bands
    }
}

/// Classifies a percentile, returning the tier name.
///
/// Inclusive upper bounds: a percentile exactly on a bound belongs to that
/// bound's tier.
#[must_use]
pub fn classify(percentile: f64, scheme: &TierScheme) -> &str {
    &scheme.bands[scheme.band_index(percentile)].name
}

fn validate_bands(bands: &[TierBand]) -> ScreenResult<()> {
    if bands.is_empty() {
        return Err(ScreenError::configuration(
            "tiers",
            "at least one tier is required",
        ));
    }

    let mut seen = HashSet::new();
    let mut previous: Option<f64> = None;
    for band in bands {
        let name = band.name.trim();
        if name.is_empty() {
            return Err(ScreenError::configuration("tiers", "tier name is blank"));
        }
        if !seen.insert(name) {
            return Err(ScreenError::configuration(
                format!("tiers.{name}"),
                "tier name is repeated",
            ));
        }
        if !band.upper_bound.is_finite() || band.upper_bound <= 0.0 {
            return Err(ScreenError::configuration(
                format!("tiers.{name}"),
                format!(
                    "upper bound must be a positive finite number, got {}",
                    band.upper_bound
                ),
            ));
        }
        if let Some(prev) = previous {
            if band.upper_bound <= prev {
                return Err(ScreenError::configuration(
                    format!("tiers.{name}"),
                    format!(
                        "upper bounds must be strictly increasing ({} follows {})",
                        band.upper_bound, prev
                    ),
                ));
            }
        }
        previous = Some(band.upper_bound);
    }

    match previous {
        Some(last) if last >= PERCENTILE_CEILING => Ok(()),
        Some(last) => Err(ScreenError::configuration(
            "tiers",
            format!("thresholds must cover up to {PERCENTILE_CEILING}, last bound is {last}"),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_tier() -> TierScheme {
        TierScheme::new(vec![
            TierBand::new("Elite", 25.0),
            TierBand::new("Qualified", 37.0),
            TierBand::new("Watchlist", 50.0),
            TierBand::new("Review", 100.0),
        ])
        .unwrap()
    }

    #[test]
    fn test_elite_review_replace_is_valid() {
        let scheme = TierScheme::elite_review_replace();
        assert!(validate_bands(scheme.bands()).is_ok());
        assert_eq!(scheme.len(), 3);
        assert!(scheme.band("Review").unwrap().description.is_some());
    }

    #[test]
    fn test_inclusive_bounds() {
        let scheme = TierScheme::elite_review_replace();
        assert_eq!(classify(25.0, &scheme), "Elite");
        assert_eq!(classify(25.000_001, &scheme), "Review");
        assert_eq!(classify(50.0, &scheme), "Review");
        assert_eq!(classify(50.1, &scheme), "Replace");
        assert_eq!(classify(100.0, &scheme), "Replace");
    }

    #[test]
    fn test_extremes() {
        let scheme = four_tier();
        assert_eq!(scheme.classify(0.0).ordinal, 0);
        assert_eq!(scheme.classify(-5.0).ordinal, 0);
        assert_eq!(scheme.classify(100.0).ordinal, 3);
        assert_eq!(scheme.classify(140.0).ordinal, 3);
        assert_eq!(scheme.classify(f64::NAN).ordinal, 3);
    }

    #[test]
    fn test_tiers_ordering() {
        let scheme = four_tier();
        let tiers = scheme.tiers();
        assert_eq!(tiers.len(), 4);
        assert!(tiers[0] < tiers[1]);
        assert!(tiers[0].is_best());
        assert_eq!(tiers[2].to_string(), "Watchlist");
    }

    #[test]
    fn test_rejects_empty() {
        assert!(TierScheme::new(vec![]).is_err());
    }

    #[test]
    fn test_rejects_non_increasing() {
        let err = TierScheme::new(vec![
            TierBand::new("A", 50.0),
            TierBand::new("B", 50.0),
            TierBand::new("C", 100.0),
        ])
        .unwrap_err();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("strictly increasing"));
    }

    #[test]
    fn test_rejects_partial_coverage() {
        let err = TierScheme::new(vec![TierBand::new("A", 25.0), TierBand::new("B", 90.0)])
            .unwrap_err();
        assert!(err.to_string().contains("cover up to"));
    }

    #[test]
    fn test_rejects_bad_names_and_bounds() {
        assert!(TierScheme::new(vec![TierBand::new(" ", 100.0)]).is_err());
        assert!(
            TierScheme::new(vec![TierBand::new("A", 40.0), TierBand::new("A", 100.0)]).is_err()
        );
        assert!(TierScheme::new(vec![TierBand::new("A", f64::NAN)]).is_err());
        assert!(
            TierScheme::new(vec![TierBand::new("A", -1.0), TierBand::new("B", 100.0)]).is_err()
        );
    }

    #[test]
    fn test_serde_validates() {
        let json = r#"[{"name":"Elite","upper_bound":25.0},{"name":"Replace","upper_bound":100.0}]"#;
        let scheme: TierScheme = serde_json::from_str(json).unwrap();
        assert_eq!(scheme.len(), 2);

        let bad = r#"[{"name":"Elite","upper_bound":25.0}]"#;
        assert!(serde_json::from_str::<TierScheme>(bad).is_err());

        let out = serde_json::to_string(&scheme).unwrap();
        assert!(out.starts_with('['));
    }
}
