//! Category summaries and compliance report content.
//!
//! - [`categories`]: distinct peer categories of a scored universe
//! - [`summarize_category`]: tier counts and leading funds for one category
//! - [`ComplianceReport`]: quarterly report content for one category

mod category;
mod report;

pub use category::{categories, summarize_category, CategorySummary};
pub use report::{methodology, ComplianceReport, COMPLIANCE_DISCLAIMER, DEFAULT_TOP_N};
