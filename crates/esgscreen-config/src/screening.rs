//! Screening configuration files.
//!
//! A configuration file carries three sections:
//!
//! - `[[weights]]`: composite score metric weights (optional, defaults to the standard set)
//! - `[[tiers]]`: the tier scheme (required)
//! - `[drift]`: drift alert bands (optional, defaults to the standard bands)
//!
//! Files are read once per run. Every section is checked before failing, so a
//! single load reports all problems at once.

use crate::error::{ConfigError, ConfigFormat, ConfigResult, Validate, ValidationError};
use esgscreen_core::{
    DriftBand, DriftBands, MetricWeight, MetricWeights, TierBand, TierScheme,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Configuration file version understood by this crate.
pub const CONFIG_VERSION: u32 = 1;

fn default_version() -> u32 {
    CONFIG_VERSION
}

// =============================================================================
// FILE REPRESENTATION
// =============================================================================

/// Drift section of a configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DriftSection {
    /// Label for deltas below every cut point.
    pub baseline: String,
    /// Cut points, lowest first.
    #[serde(default)]
    pub bands: Vec<DriftBand>,
}

/// A configuration file as written, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreeningConfigFile {
    /// File format version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Metric weights; the standard set when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<MetricWeight>>,

    /// Tier bands, best first.
    #[serde(default)]
    pub tiers: Vec<TierBand>,

    /// Drift bands; the standard bands when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift: Option<DriftSection>,
}

impl ScreeningConfigFile {
    /// Validates every section and builds the runtime configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] or
    /// [`ConfigError::MultipleValidationErrors`] describing every invalid section.
    pub fn into_config(self) -> ConfigResult<ScreeningConfig> {
        self.validate_or_error()?;

        let weights = match self.weights {
            Some(weights) => MetricWeights::new(weights)?,
            None => MetricWeights::standard(),
        };
        let drift = match self.drift {
            Some(section) => DriftBands::new(section.baseline, section.bands)?,
            None => DriftBands::standard(),
        };

        Ok(ScreeningConfig {
            version: self.version,
            weights,
            tiers: TierScheme::new(self.tiers)?,
            drift,
        })
    }
}

impl Validate for ScreeningConfigFile {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.version != CONFIG_VERSION {
            errors.push(ValidationError::with_rule(
                "version",
                format!(
                    "Unsupported configuration version {} (expected {CONFIG_VERSION})",
                    self.version
                ),
                "supported_version",
            ));
        }

        if let Some(weights) = &self.weights {
            if let Err(err) = MetricWeights::new(weights.clone()) {
                errors.push(ValidationError::from_screen(err, "valid_weights"));
            }
        }

        if let Err(err) = TierScheme::new(self.tiers.clone()) {
            errors.push(ValidationError::from_screen(err, "valid_tiers"));
        }

        if let Some(drift) = &self.drift {
            if let Err(err) = DriftBands::new(drift.baseline.clone(), drift.bands.clone()) {
                errors.push(ValidationError::from_screen(err, "valid_drift_bands"));
            }
        }

        errors
    }
}

// =============================================================================
// RUNTIME CONFIGURATION
// =============================================================================

/// Validated screening configuration, immutable for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScreeningConfigFile")]
pub struct ScreeningConfig {
    /// File format version.
    pub version: u32,
    /// Composite score metric weights.
    pub weights: MetricWeights,
    /// Tier scheme.
    pub tiers: TierScheme,
    /// Drift alert bands.
    pub drift: DriftBands,
}

impl ScreeningConfig {
    /// Standard weights, the Elite/Review/Replace scheme and standard drift bands.
    ///
    /// Selected by name only; `ScreeningConfig` has no default.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            version: CONFIG_VERSION,
            weights: MetricWeights::standard(),
            tiers: TierScheme::elite_review_replace(),
            drift: DriftBands::standard(),
        }
    }

    /// Configuration for a named preset.
    ///
    /// # Errors
    ///
    /// Returns an error only if the preset's tier scheme fails validation.
    pub fn preset(preset: Preset) -> ConfigResult<Self> {
        Ok(Self {
            tiers: preset.tier_scheme()?,
            ..Self::standard()
        })
    }

    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and a validation
    /// error for invalid content.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let file: ScreeningConfigFile = toml::from_str(text).map_err(|e| ConfigError::Parse {
            format: ConfigFormat::Toml,
            message: e.to_string(),
        })?;
        file.into_config()
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and a validation
    /// error for invalid content.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let file: ScreeningConfigFile =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse {
                format: ConfigFormat::Json,
                message: e.to_string(),
            })?;
        file.into_config()
    }

    /// Loads a configuration file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for extensions other than
    /// `.toml` and `.json`, [`ConfigError::Io`] if the file cannot be read,
    /// and parse or validation errors for bad content.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => ConfigFormat::Toml,
            Some("json") => ConfigFormat::Json,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), %format, "read configuration file");

        let config = match format {
            ConfigFormat::Toml => Self::from_toml_str(&text)?,
            ConfigFormat::Json => Self::from_json_str(&text)?,
        };
        info!(
            path = %path.display(),
            tiers = config.tiers.len(),
            metrics = config.weights.len(),
            "loaded screening configuration"
        );
        Ok(config)
    }

    /// Renders this configuration as TOML.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialization`] if TOML rendering fails.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        toml::to_string_pretty(&self.to_file())
            .map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// Renders this configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialization`] if JSON rendering fails.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        serde_json::to_string_pretty(&self.to_file())
            .map_err(|e| ConfigError::Serialization(e.to_string()))
    }

    /// The standard configuration as an editable TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialization`] if TOML rendering fails.
    pub fn template_toml() -> ConfigResult<String> {
        let body = Self::standard().to_toml_string()?;
        Ok(format!(
            "# ESG screening configuration\n\
             #\n\
             # weights: composite score metric weights, must sum to 1.0\n\
             # tiers:   inclusive upper percentile bounds, best tier first, last bound >= 100\n\
             # drift:   deltas strictly above a cut point get its label\n\n{body}"
        ))
    }

    /// Converts back to the file representation.
    #[must_use]
    pub fn to_file(&self) -> ScreeningConfigFile {
        ScreeningConfigFile {
            version: self.version,
            weights: Some(self.weights.as_slice().to_vec()),
            tiers: self.tiers.bands().to_vec(),
            drift: Some(DriftSection {
                baseline: self.drift.baseline().to_string(),
                bands: self.drift.bands().to_vec(),
            }),
        }
    }
}

impl TryFrom<ScreeningConfigFile> for ScreeningConfig {
    type Error = ConfigError;

    fn try_from(file: ScreeningConfigFile) -> Result<Self, Self::Error> {
        file.into_config()
    }
}

impl Validate for ScreeningConfig {
    fn validate(&self) -> Vec<ValidationError> {
        self.to_file().validate()
    }
}

// =============================================================================
// PRESETS
// =============================================================================

/// Named tier scheme presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Elite (≤ 25), Review (≤ 50), Replace.
    EliteReviewReplace,
    /// Elite (≤ 25), Qualified (≤ 37), Watchlist (≤ 50), Review Required.
    FourTier,
}

impl Preset {
    /// All presets.
    pub const ALL: [Preset; 2] = [Preset::EliteReviewReplace, Preset::FourTier];

    /// Preset name as accepted by [`FromStr`].
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EliteReviewReplace => "elite-review-replace",
            Self::FourTier => "four-tier",
        }
    }

    /// The tier scheme of this preset.
    ///
    /// # Errors
    ///
    /// Returns an error if the preset bands fail validation.
    pub fn tier_scheme(self) -> ConfigResult<TierScheme> {
        match self {
            Self::EliteReviewReplace => Ok(TierScheme::elite_review_replace()),
            Self::FourTier => Ok(TierScheme::new(vec![
                TierBand::new("Elite", 25.0).with_description("Top quartile"),
                TierBand::new("Qualified", 37.0).with_description("Qualified for inclusion"),
                TierBand::new("Watchlist", 50.0).with_description("Monitor each quarter"),
                TierBand::new("Review Required", 100.0).with_description("Bottom half"),
            ])?),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::Validation {
                field: "preset".to_string(),
                message: format!(
                    "Unknown preset '{s}' (expected one of: {})",
                    Self::ALL.map(Preset::name).join(", ")
                ),
            })
    }
}
