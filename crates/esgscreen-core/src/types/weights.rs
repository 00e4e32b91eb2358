//! Metric weights for the composite score.

use crate::error::{ScreenError, ScreenResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Allowed distance between the weight total and 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Grouping of metrics for methodology reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Pillar {
    /// Carbon, fossil fuel and environmental score metrics.
    Environmental,
    /// Social metrics.
    Social,
    /// Governance metrics.
    Governance,
    /// Combined ESG quality and governance metrics.
    #[serde(rename = "Quality & Governance", alias = "QualityGovernance")]
    QualityGovernance,
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Environmental => "Environmental",
            Self::Social => "Social",
            Self::Governance => "Governance",
            Self::QualityGovernance => "Quality & Governance",
        };
        f.write_str(s)
    }
}

/// A single named metric weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricWeight {
    /// Metric name, matching the metric column of the input table.
    pub name: String,
    /// Weight in the composite score.
    pub weight: f64,
    /// Optional pillar grouping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<Pillar>,
}

impl MetricWeight {
    /// Creates a metric weight.
    #[must_use]
    pub fn new(name: impl Into<String>, weight: f64, pillar: Option<Pillar>) -> Self {
        Self {
            name: name.into(),
            weight,
            pillar,
        }
    }
}

/// Validated metric weights summing to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MetricWeight>", into = "Vec<MetricWeight>")]
pub struct MetricWeights {
    weights: Vec<MetricWeight>,
}

impl MetricWeights {
    /// Creates a weight set, validating it once.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::Configuration`] if the set is empty, a name is
    /// blank or repeated, a weight is negative or not finite, or the total
    /// differs from 1.0 by more than [`WEIGHT_SUM_TOLERANCE`].
    pub fn new(weights: Vec<MetricWeight>) -> ScreenResult<Self> {
        if weights.is_empty() {
            return Err(ScreenError::configuration(
                "weights",
                "at least one metric weight is required",
            ));
        }

        let mut seen = HashSet::new();
        for w in &weights {
            let name = w.name.trim();
            if name.is_empty() {
                return Err(ScreenError::configuration("weights", "metric name is blank"));
            }
            if !seen.insert(name) {
                return Err(ScreenError::configuration(
                    format!("weights.{name}"),
                    "metric is listed more than once",
                ));
            }
            if !w.weight.is_finite() || w.weight < 0.0 {
                return Err(ScreenError::configuration(
                    format!("weights.{name}"),
                    format!("weight must be a non-negative finite number, got {}", w.weight),
                ));
            }
        }

        let total: f64 = weights.iter().map(|w| w.weight).sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScreenError::configuration(
                "weights",
                format!("weights must sum to 1.0, got {total:.6}"),
            ));
        }

        Ok(Self { weights })
    }

    /// The 11-metric weighting: 80% environmental, 20% quality and governance.
    #[must_use]
    pub fn standard() -> Self {
        let env = Some(Pillar::Environmental);
        let qg = Some(Pillar::QualityGovernance);
        Self {
            weights: vec![
                MetricWeight::new("MSCI ESG Environmental Score", 0.20, env),
                MetricWeight::new("ESG Score Environmental Weight (%)", 0.15, env),
                MetricWeight::new("Fund Weighted Average Carbon Intensity", 0.20, env),
                MetricWeight::new(
                    "Financed Carbon Emissions (Carbon Emissions / USD Million Invested)",
                    0.10,
                    env,
                ),
                MetricWeight::new("Fossil Fuels Reserve (%)", 0.15, env),
                MetricWeight::new("MSCI ESG Score", 0.05, qg),
                MetricWeight::new("Fund ESG Leaders (%)", 0.05, qg),
                MetricWeight::new("MSCI Fund ESG Trend Positive (%)", 0.05, qg),
                MetricWeight::new("Fund ESG Laggards (%)", 0.03, qg),
                MetricWeight::new("Controversial Weapons Involvement (%)", 0.01, qg),
                MetricWeight::new("MSCI ESG Governance Score", 0.01, qg),
            ],
        }
    }

    /// Returns the weights in configuration order.
    #[must_use]
    pub fn as_slice(&self) -> &[MetricWeight] {
        &self.weights
    }

    /// Number of metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false for a validated set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of a named metric.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.weights.iter().find(|w| w.name == name).map(|w| w.weight)
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.weights.iter().map(|w| w.weight).sum()
    }

    /// Total weight per pillar. Metrics without a pillar are not counted.
    #[must_use]
    pub fn pillar_totals(&self) -> BTreeMap<Pillar, f64> {
        let mut totals = BTreeMap::new();
        for w in &self.weights {
            if let Some(pillar) = w.pillar {
                *totals.entry(pillar).or_insert(0.0) += w.weight;
            }
        }
        totals
    }

    /// Weighted sum of already-normalized metric values.
    ///
    /// Returns `None` if any weighted metric is missing or not finite.
    #[must_use]
    pub fn weighted_sum(&self, metrics: &BTreeMap<String, f64>) -> Option<f64> {
        self.weights.iter().try_fold(0.0, |acc, w| {
            metrics
                .get(&w.name)
                .filter(|v| v.is_finite())
                .map(|v| acc + v * w.weight)
        })
    }
}

impl TryFrom<Vec<MetricWeight>> for MetricWeights {
    type Error = ScreenError;

    fn try_from(weights: Vec<MetricWeight>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<MetricWeights> for Vec<MetricWeight> {
    fn from(weights: MetricWeights) -> Self {
        weights.weights
    }
}
