//! ESG Screen Configuration Layer
//!
//! This crate loads the configuration of a screening run: composite score
//! metric weights, the tier scheme and the drift alert bands.
//!
//! # Features
//!
//! - **File loading**: TOML or JSON, chosen by extension
//! - **Validation**: every section is checked and all problems reported together
//! - **Presets**: named tier schemes for runs without a configuration file
//! - **Templates**: the standard configuration rendered as editable TOML
//!
//! # Example
//!
//! ```rust
//! use esgscreen_config::{ScreeningConfig, Validate};
//!
//! let config = ScreeningConfig::from_toml_str(r#"
//!     [[tiers]]
//!     name = "Elite"
//!     upper_bound = 25.0
//!
//!     [[tiers]]
//!     name = "Replace"
//!     upper_bound = 100.0
//! "#).unwrap();
//!
//! assert_eq!(config.tiers.classify(25.0).name, "Elite");
//! assert!(config.is_valid());
//! ```
//!
//! # Standard Configuration
//!
//! [`ScreeningConfig::standard`] bundles the 11-metric weighting, the
//! Elite/Review/Replace scheme (25 / 50 / 100) and the stable/minor/elevated/
//! severe drift bands (5 / 15 / 25).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod screening;

pub use error::{ConfigError, ConfigFormat, ConfigResult, Validate, ValidationError};
pub use screening::{DriftSection, Preset, ScreeningConfig, ScreeningConfigFile, CONFIG_VERSION};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{ConfigError, ConfigResult, Validate};
    pub use crate::screening::{Preset, ScreeningConfig};
}
