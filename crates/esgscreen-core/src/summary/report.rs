//! Quarterly compliance report content.
//!
//! The report is structured data only; renderers (text, PDF, HTML) live with
//! the caller.

use super::category::{summarize_category, CategorySummary};
use crate::types::{MetricWeights, ReportingPeriod, ScoredFund, TierBand, TierScheme};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Number of leading funds listed in a compliance report.
pub const DEFAULT_TOP_N: usize = 10;

/// Fixed closing note carried by every compliance report.
pub const COMPLIANCE_DISCLAIMER: &str = "This report is generated for internal compliance and \
due diligence purposes. Fund selection is based on quantitative ESG metrics and does not \
constitute investment advice. Past performance does not guarantee future results.";

/// Structured content of a quarterly compliance report for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Reporting quarter.
    pub period: ReportingPeriod,

    /// Date the report was produced.
    pub generated_on: NaiveDate,

    /// Tier breakdown and leading funds.
    pub summary: CategorySummary,

    /// Tier definitions in force, best first.
    pub tier_definitions: Vec<TierBand>,

    /// Methodology paragraph.
    pub methodology: String,

    /// Closing disclaimer.
    pub disclaimer: String,
}

impl ComplianceReport {
    /// Builds the report for one category of a scored universe.
    #[must_use]
    pub fn build(
        funds: &[ScoredFund],
        category: Option<&str>,
        period: ReportingPeriod,
        generated_on: NaiveDate,
        scheme: &TierScheme,
        weights: &MetricWeights,
    ) -> Self {
        Self {
            period,
            generated_on,
            summary: summarize_category(funds, category, scheme, DEFAULT_TOP_N),
            tier_definitions: scheme.bands().to_vec(),
            methodology: methodology(scheme, weights),
            disclaimer: COMPLIANCE_DISCLAIMER.to_string(),
        }
    }

    /// Suggested file name for an export of this report.
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        self.period
            .export_file_name(self.summary.label(), extension)
    }
}

/// Describes the screening method for the given scheme and weights.
#[must_use]
pub fn methodology(scheme: &TierScheme, weights: &MetricWeights) -> String {
    let mut text = format!(
        "This report documents the quarterly ESG screening process using a {}-metric \
         quantitative framework. Funds are ranked within their peer category by composite \
         score, with tied scores sharing the average rank; percentiles run from the best \
         fund (near 0) to the worst (100).",
        weights.len()
    );

    let pillars = weights.pillar_totals();
    if !pillars.is_empty() {
        let parts: Vec<String> = pillars
            .iter()
            .map(|(pillar, total)| format!("{pillar} {:.0}%", total * 100.0))
            .collect();
        let _ = write!(text, " Pillar weights: {}.", parts.join(", "));
    }

    if let Some(best) = scheme.bands().first() {
        let _ = write!(
            text,
            " Funds at or below the {:.0}th percentile are rated {} and qualify for core \
             portfolio inclusion.",
            best.upper_bound, best.name
        );
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::score_universe;
    use crate::types::FundRecord;

    fn report() -> ComplianceReport {
        let scheme = TierScheme::elite_review_replace();
        let records: Vec<FundRecord> = (0..12)
            .map(|i| FundRecord::new(format!("F{i:02}"), Some("Bond/Intermediate"), f64::from(i)))
            .collect();
        let funds = score_universe(&records, &scheme).funds;
        ComplianceReport::build(
            &funds,
            Some("Bond/Intermediate"),
            "2025Q4".parse().unwrap(),
            NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
            &scheme,
            &MetricWeights::standard(),
        )
    }

    #[test]
    fn test_report_contents() {
        let report = report();
        assert_eq!(report.summary.total, 12);
        assert_eq!(report.summary.top.len(), DEFAULT_TOP_N);
        assert_eq!(report.summary.top[0].symbol(), "F11");
        assert_eq!(report.tier_definitions.len(), 3);
        assert_eq!(report.disclaimer, COMPLIANCE_DISCLAIMER);
    }

    #[test]
    fn test_methodology_mentions_scheme_and_weights() {
        let report = report();
        assert!(report.methodology.contains("11-metric"));
        assert!(report.methodology.contains("25th percentile are rated Elite"));
        assert!(report.methodology.contains("Environmental 80%"));
    }

    #[test]
    fn test_file_name_sanitizes_category() {
        assert_eq!(report().file_name("pdf"), "Bond_Intermediate_2025Q4.pdf");
    }
}
