//! Alert bands for percentile drift.

use crate::error::{ScreenError, ScreenResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Severity assigned to a drift record.
///
/// Severity 0 is the baseline band; higher values are worse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AlertLevel {
    /// Position of the band (0 = baseline).
    pub severity: usize,
    /// Band label.
    pub label: String,
}

impl AlertLevel {
    /// Returns true for the baseline band.
    #[must_use]
    pub fn is_baseline(&self) -> bool {
        self.severity == 0
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A cut point: deltas strictly greater than `above` get `label`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftBand {
    /// Exclusive lower bound of the band.
    pub above: f64,
    /// Band label.
    pub label: String,
}

impl DriftBand {
    /// Creates a band.
    #[must_use]
    pub fn new(above: f64, label: impl Into<String>) -> Self {
        Self {
            above,
            label: label.into(),
        }
    }
}

#[derive(Deserialize)]
struct RawDriftBands {
    baseline: String,
    bands: Vec<DriftBand>,
}

/// Validated drift alert bands.
///
/// Cut points are strictly increasing. A delta exactly on a cut point belongs
/// to the band below it (strict greater-than), so the bands are exhaustive and
/// non-overlapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDriftBands")]
pub struct DriftBands {
    baseline: String,
    bands: Vec<DriftBand>,
}

impl DriftBands {
    /// Creates a band set.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Configuration`] if a label is blank or repeated,
    /// or a cut point is not finite or not strictly increasing.
    pub fn new(baseline: impl Into<String>, bands: Vec<DriftBand>) -> ScreenResult<Self> {
        let baseline = baseline.into();
        if baseline.trim().is_empty() {
            return Err(ScreenError::configuration(
                "drift.baseline",
                "baseline label is blank",
            ));
        }

        let mut labels = HashSet::new();
        labels.insert(baseline.trim().to_string());
        let mut previous: Option<f64> = None;
        for band in &bands {
            let label = band.label.trim();
            if label.is_empty() {
                return Err(ScreenError::configuration("drift.bands", "band label is blank"));
            }
            if !labels.insert(label.to_string()) {
                return Err(ScreenError::configuration(
                    format!("drift.bands.{label}"),
                    "label is repeated",
                ));
            }
            if !band.above.is_finite() {
                return Err(ScreenError::configuration(
                    format!("drift.bands.{label}"),
                    "cut point must be finite",
                ));
            }
            if let Some(prev) = previous {
                if band.above <= prev {
                    return Err(ScreenError::configuration(
                        format!("drift.bands.{label}"),
                        format!(
                            "cut points must be strictly increasing ({} follows {})",
                            band.above, prev
                        ),
                    ));
                }
            }
            previous = Some(band.above);
        }

        Ok(Self { baseline, bands })
    }

    /// `> 25` severe, `> 15` elevated, `> 5` minor, otherwise stable.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            baseline: "stable".to_string(),
            bands: vec![
                DriftBand::new(5.0, "minor"),
                DriftBand::new(15.0, "elevated"),
                DriftBand::new(25.0, "severe"),
            ],
        }
    }

    /// Label of the baseline band.
    #[must_use]
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Cut points, lowest first.
    #[must_use]
    pub fn bands(&self) -> &[DriftBand] {
        &self.bands
    }

    /// Highest severity this band set can assign.
    #[must_use]
    pub fn max_severity(&self) -> usize {
        self.bands.len()
    }

    /// All alert levels, baseline first.
    #[must_use]
    pub fn levels(&self) -> Vec<AlertLevel> {
        std::iter::once(self.baseline.as_str())
            .chain(self.bands.iter().map(|b| b.label.as_str()))
            .enumerate()
            .map(|(severity, label)| AlertLevel {
                severity,
                label: label.to_string(),
            })
            .collect()
    }

    /// Severity of the band with the given label.
    #[must_use]
    pub fn severity_of(&self, label: &str) -> Option<usize> {
        if self.baseline == label {
            return Some(0);
        }
        self.bands
            .iter()
            .position(|b| b.label == label)
            .map(|i| i + 1)
    }

    /// Assigns the alert level for a percentile delta.
    ///
    /// Positive deltas are deteriorations.
    #[must_use]
    pub fn level(&self, delta: f64) -> AlertLevel {
        match self.bands.iter().rposition(|band| delta > band.above) {
            Some(i) => AlertLevel {
                severity: i + 1,
                label: self.bands[i].label.clone(),
            },
            None => AlertLevel {
                severity: 0,
                label: self.baseline.clone(),
            },
        }
    }
}

impl TryFrom<RawDriftBands> for DriftBands {
    type Error = ScreenError;

    fn try_from(raw: RawDriftBands) -> Result<Self, Self::Error> {
        Self::new(raw.baseline, raw.bands)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_levels() {
        let bands = DriftBands::standard();
        assert_eq!(bands.level(30.0).label, "severe");
        assert_eq!(bands.level(20.0).label, "elevated");
        assert_eq!(bands.level(10.0).label, "minor");
        assert_eq!(bands.level(0.0).label, "stable");
        assert_eq!(bands.level(-40.0).label, "stable");
    }

    #[test]
    fn test_boundaries_are_strict() {
        let bands = DriftBands::standard();
        assert_eq!(bands.level(25.0).label, "elevated");
        assert_eq!(bands.level(15.0).label, "minor");
        assert_eq!(bands.level(5.0).label, "stable");
        assert_eq!(bands.level(25.000_1).severity, 3);
    }

    #[test]
    fn test_levels_and_severity_lookup() {
        let bands = DriftBands::standard();
        let levels = bands.levels();
        assert_eq!(levels.len(), 4);
        assert!(levels[0].is_baseline());
        assert_eq!(levels[3].label, "severe");
        assert_eq!(bands.severity_of("elevated"), Some(2));
        assert_eq!(bands.severity_of("stable"), Some(0));
        assert_eq!(bands.severity_of("unknown"), None);
        assert_eq!(bands.max_severity(), 3);
    }

    #[test]
    fn test_rejects_invalid_bands() {
        assert!(DriftBands::new("", vec![]).is_err());
        assert!(DriftBands::new(
            "ok",
            vec![DriftBand::new(10.0, "a"), DriftBand::new(10.0, "b")]
        )
        .is_err());
        assert!(DriftBands::new("ok", vec![DriftBand::new(5.0, "ok")]).is_err());
        assert!(DriftBands::new("ok", vec![DriftBand::new(f64::INFINITY, "a")]).is_err());
    }

    #[test]
    fn test_baseline_only() {
        let bands = DriftBands::new("unchanged", vec![]).unwrap();
        assert_eq!(bands.level(99.0).label, "unchanged");
    }

    #[test]
    fn test_serde_validates() {
        let json = r#"{"baseline":"stable","bands":[{"above":5.0,"label":"minor"}]}"#;
        let bands: DriftBands = serde_json::from_str(json).unwrap();
        assert_eq!(bands.level(6.0).label, "minor");

        let bad = r#"{"baseline":"stable","bands":[{"above":5.0,"label":"a"},{"above":1.0,"label":"b"}]}"#;
        assert!(serde_json::from_str::<DriftBands>(bad).is_err());
    }
}
