//! Screen configuration supplied by the shell.
//!
//! Defaults reproduce the stock screen: fixed captions, the 📍 marker and a
//! Google Maps link for location messages.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::capabilities::{CaptureConfig, LocationAccuracy};
use crate::model::Coordinate;

pub const DEFAULT_IMAGE_CAPTION: &str = "Captured an image!";
pub const DEFAULT_LOCATION_MARKER: &str = "📍";
pub const DEFAULT_LOCATION_CAPTION: &str = "Philippines, Manila: Click to view in Google Maps";
pub const DEFAULT_MAP_BASE_URL: &str = "https://www.google.com/maps";
pub const DEFAULT_INPUT_PLACEHOLDER: &str = "Type a message...";
pub const DEFAULT_OFFLINE_PLACEHOLDER: &str = "No Network Connection";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(String),

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("invalid map url {url}: {reason}")]
    InvalidMapUrl { url: String, reason: String },
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub image_caption: String,
    pub location_marker: String,
    pub location_caption: String,
    pub map_base_url: String,
    pub input_placeholder: String,
    pub offline_placeholder: String,
    pub capture: CaptureConfig,
    pub location_accuracy: LocationAccuracy,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            image_caption: DEFAULT_IMAGE_CAPTION.into(),
            location_marker: DEFAULT_LOCATION_MARKER.into(),
            location_caption: DEFAULT_LOCATION_CAPTION.into(),
            map_base_url: DEFAULT_MAP_BASE_URL.into(),
            input_placeholder: DEFAULT_INPUT_PLACEHOLDER.into(),
            offline_placeholder: DEFAULT_OFFLINE_PLACEHOLDER.into(),
            capture: CaptureConfig::default(),
            location_accuracy: LocationAccuracy::default(),
        }
    }
}

impl ChatConfig {
    /// Parses a JSON config; missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.image_caption.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "image_caption",
            });
        }
        if self.location_marker.trim().is_empty() {
            return Err(ConfigError::EmptyField {
                field: "location_marker",
            });
        }
        Self::parse_map_base(&self.map_base_url)?;
        self.capture = self.capture.validated();
        Ok(self)
    }

    #[must_use]
    pub fn with_image_caption(mut self, caption: impl Into<String>) -> Self {
        self.image_caption = caption.into();
        self
    }

    #[must_use]
    pub fn with_location_caption(mut self, caption: impl Into<String>) -> Self {
        self.location_caption = caption.into();
        self
    }

    #[must_use]
    pub fn with_map_base_url(mut self, url: impl Into<String>) -> Self {
        self.map_base_url = url.into();
        self
    }

    #[must_use]
    pub fn with_capture(mut self, capture: CaptureConfig) -> Self {
        self.capture = capture;
        self
    }

    /// Caption of a location message. Always starts with the marker.
    #[must_use]
    pub fn location_text(&self) -> String {
        if self.location_caption.trim().is_empty() {
            return self.location_marker.clone();
        }
        format!("{} {}", self.location_marker, self.location_caption)
    }

    /// External map link for `coordinate`: `<base>?q=<lat>,<lon>`.
    pub fn map_url(&self, coordinate: Coordinate) -> Result<Url, ConfigError> {
        let mut url = Self::parse_map_base(&self.map_base_url)?;
        url.set_query(Some(&format!("q={},{}", coordinate.lat(), coordinate.lon())));
        Ok(url)
    }

    fn parse_map_base(base: &str) -> Result<Url, ConfigError> {
        let url = Url::parse(base).map_err(|e| ConfigError::InvalidMapUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "https" | "http") {
            return Err(ConfigError::InvalidMapUrl {
                url: base.to_string(),
                reason: format!("unsupported scheme {}", url.scheme()),
            });
        }
        Ok(url)
    }
}
