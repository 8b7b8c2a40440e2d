//! Explorer configuration
//!
//! Everything is optional in the TOML file; missing keys take the defaults
//! below.
//!
//! ```toml
//! base_url = "https://sdlc.example.com/map"
//!
//! [layout]
//! link_distance = 120.0
//! charge = -250.0
//!
//! [layout.jitter]
//! enabled = false
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Base URL used for share links when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/";

/// Top-level explorer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Page that share links point at
    pub base_url: String,
    /// Force layout parameters handed to the renderer
    pub layout: LayoutConfig,
}

impl ExplorerConfig {
    /// Defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the share link base
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the layout parameters
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Parse and validate TOML text
    ///
    /// # Errors
    /// [`ConfigError::Parse`] for bad TOML, or any error from [`Self::validate`].
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    ///
    /// # Errors
    /// [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parsed share link base
    ///
    /// # Errors
    /// [`ConfigError::InvalidBaseUrl`] unless `base_url` is an absolute URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })
    }

    /// Check ranges and the base URL
    ///
    /// # Errors
    /// [`ConfigError::InvalidBaseUrl`] or [`ConfigError::Invalid`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.base_url()?;
        self.layout.validate()
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Force-directed layout parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Rest length of parent to child links
    pub link_distance: f64,
    /// Many-body strength; negative repels
    pub charge: f64,
    /// Cooling rate of the simulation
    pub alpha_decay: f64,
    /// Velocity damping (0.0 = none, 1.0 = instant stop)
    pub velocity_decay: f64,
    /// Smallest zoom factor
    pub zoom_min: f64,
    /// Largest zoom factor
    pub zoom_max: f64,
    /// Idle motion
    pub jitter: JitterConfig,
}

impl LayoutConfig {
    /// Set link distance
    #[must_use]
    pub fn with_link_distance(mut self, link_distance: f64) -> Self {
        self.link_distance = link_distance;
        self
    }

    /// Set charge
    #[must_use]
    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    /// Set idle motion
    #[must_use]
    pub fn with_jitter(mut self, jitter: JitterConfig) -> Self {
        self.jitter = jitter;
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.link_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.link_distance must be positive, got {}",
                self.link_distance
            )));
        }
        for (key, value) in [
            ("layout.alpha_decay", self.alpha_decay),
            ("layout.velocity_decay", self.velocity_decay),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be within 0..=1, got {value}"
                )));
            }
        }
        if !(self.zoom_min > 0.0 && self.zoom_min <= self.zoom_max) {
            return Err(ConfigError::Invalid(format!(
                "layout zoom extent {}..{} is empty or not positive",
                self.zoom_min, self.zoom_max
            )));
        }
        self.jitter.validate()
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            link_distance: 100.0,
            charge: -300.0,
            alpha_decay: 0.01,
            velocity_decay: 0.4,
            zoom_min: 0.1,
            zoom_max: 4.0,
            jitter: JitterConfig::default(),
        }
    }
}

/// Random nudges that keep the layout gently moving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JitterConfig {
    /// Whether jitter runs at all
    pub enabled: bool,
    /// Maximum velocity added per tick
    pub magnitude: f64,
    /// Chance per tick of reheating the simulation
    pub restart_probability: f64,
    /// Alpha used when reheating
    pub restart_alpha: f64,
}

impl JitterConfig {
    /// Jitter turned off
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("layout.jitter.restart_probability", self.restart_probability),
            ("layout.jitter.restart_alpha", self.restart_alpha),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{key} must be within 0..=1, got {value}"
                )));
            }
        }
        if !(self.magnitude >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.jitter.magnitude must not be negative, got {}",
                self.magnitude
            )));
        }
        Ok(())
    }
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            magnitude: 0.2,
            restart_probability: 0.1,
            restart_alpha: 0.3,
        }
    }
}
