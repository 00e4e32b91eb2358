//! Quarterly reporting periods.

use crate::error::ScreenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earliest supported year.
pub const MIN_YEAR: i32 = 1;
/// Latest supported year.
pub const MAX_YEAR: i32 = 9999;

/// A calendar quarter such as `2025Q4`, with a year in `1..=9999`.
///
/// # Examples
///
/// ```
/// use esgscreen_core::ReportingPeriod;
///
/// let period: ReportingPeriod = "2025Q1".parse().unwrap();
/// assert_eq!(period.previous().unwrap().to_string(), "2024Q4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReportingPeriod {
    year: i32,
    quarter: u8,
}

impl ReportingPeriod {
    /// Creates a period.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::InvalidPeriod`] if the quarter is not 1-4 or the
    /// year is outside [`MIN_YEAR`]..=[`MAX_YEAR`].
    pub fn new(year: i32, quarter: u8) -> Result<Self, ScreenError> {
        if !(1..=4).contains(&quarter) || !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(ScreenError::InvalidPeriod(format!("{year}Q{quarter}")));
        }
        Ok(Self { year, quarter })
    }

    /// Calendar year.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Quarter number (1-4).
    #[must_use]
    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    /// The quarter before this one, or `None` before the first supported year.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        if self.quarter == 1 {
            Self::new(self.year - 1, 4).ok()
        } else {
            Some(Self {
                year: self.year,
                quarter: self.quarter - 1,
            })
        }
    }

    /// File name for a category export, e.g. `Large Blend_2025Q4.csv`.
    ///
    /// Path separators in the category are replaced with `_`.
    #[must_use]
    pub fn export_file_name(&self, category: &str, extension: &str) -> String {
        let safe = category.replace(['/', '\\'], "_");
        format!("{safe}_{self}.{extension}")
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

impl FromStr for ReportingPeriod {
    type Err = ScreenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ScreenError::InvalidPeriod(s.to_string());
        let (year, quarter) = trimmed
            .split_once(['Q', 'q'])
            .ok_or_else(invalid)?;
        let year: i32 = year.trim_end_matches('-').parse().map_err(|_| invalid())?;
        let quarter: u8 = quarter.parse().map_err(|_| invalid())?;
        Self::new(year, quarter).map_err(|_| invalid())
    }
}

impl TryFrom<String> for ReportingPeriod {
    type Error = ScreenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ReportingPeriod> for String {
    fn from(period: ReportingPeriod) -> Self {
        period.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variants() {
        let p: ReportingPeriod = "2025Q4".parse().unwrap();
        assert_eq!((p.year(), p.quarter()), (2025, 4));
        assert_eq!("2025q2".parse::<ReportingPeriod>().unwrap().quarter(), 2);
        assert_eq!("2025-Q3".parse::<ReportingPeriod>().unwrap().quarter(), 3);
    }

    #[test]
    fn test_parse_rejects() {
        assert!("2025Q5".parse::<ReportingPeriod>().is_err());
        assert!("2025Q0".parse::<ReportingPeriod>().is_err());
        assert!("2025".parse::<ReportingPeriod>().is_err());
        assert!("Q4".parse::<ReportingPeriod>().is_err());
    }

    #[test]
    fn test_previous_wraps_year() {
        let p = ReportingPeriod::new(2025, 1).unwrap();
        assert_eq!(p.previous(), Some(ReportingPeriod::new(2024, 4).unwrap()));
        assert!(p.previous().unwrap() < p);
        assert_eq!(ReportingPeriod::new(MIN_YEAR, 1).unwrap().previous(), None);
    }

    #[test]
    fn test_year_range() {
        assert!("-2147483648Q1".parse::<ReportingPeriod>().is_err());
        assert!("0Q4".parse::<ReportingPeriod>().is_err());
        assert!("10000Q1".parse::<ReportingPeriod>().is_err());
        assert!(ReportingPeriod::new(i32::MIN, 1).is_err());
        assert_eq!("9999Q4".parse::<ReportingPeriod>().unwrap().year(), MAX_YEAR);
    }

    #[test]
    fn test_export_file_name() {
        let p = ReportingPeriod::new(2025, 4).unwrap();
        assert_eq!(
            p.export_file_name("Muni National Interm/Short", "csv"),
            "Muni National Interm_Short_2025Q4.csv"
        );
    }

    #[test]
    fn test_serde_as_string() {
        let p = ReportingPeriod::new(2025, 4).unwrap();
        assert_eq!(serde_json::to_string(&p).unwrap(), "\"2025Q4\"");
        let back: ReportingPeriod = serde_json::from_str("\"2025Q4\"").unwrap();
        assert_eq!(back, p);
    }
}
