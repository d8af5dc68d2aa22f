use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::composer::Composer;
use crate::config::ChatConfig;
use crate::connectivity::{ConnectivityMonitor, ConnectivitySignal};
use crate::message_log::MessageLog;
use crate::preview::PreviewState;

/// Time-based message identifier, strictly increasing in creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(u64);

impl MessageId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude {0} is out of valid range [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("Longitude {0} is out of valid range [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("Coordinate value is not finite (NaN or Infinity)")]
    NonFinite,
}

/// Validated lat/lon pair. Latitude and longitude only ever exist together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(CoordinateError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(CoordinateError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(CoordinateError::LongitudeOutOfRange(lon));
        }
        Ok(Self { lat, lon })
    }

    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    #[must_use]
    pub const fn lon(self) -> f64 {
        self.lon
    }
}

impl TryFrom<(f64, f64)> for Coordinate {
    type Error = CoordinateError;

    fn try_from((lat, lon): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(lat, lon)
    }
}

/// Don't carry image bytes. Carry the shell's handle/URI for the asset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef(String);

impl ImageRef {
    /// Returns `None` for a blank URI.
    #[must_use]
    pub fn new(uri: impl Into<String>) -> Option<Self> {
        let uri = uri.into();
        if uri.trim().is_empty() {
            return None;
        }
        Some(Self(uri))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    Image,
    Location,
}

/// Kind-specific payload, fixed at construction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MessageBody {
    Text,
    Image { image: ImageRef },
    Location { coordinate: Coordinate },
}

impl MessageBody {
    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Text => MessageKind::Text,
            Self::Image { .. } => MessageKind::Image,
            Self::Location { .. } => MessageKind::Location,
        }
    }
}

/// A message before the log has assigned it an id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMessage {
    text: String,
    is_user: bool,
    body: MessageBody,
}

impl NewMessage {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_user: true,
            body: MessageBody::Text,
        }
    }

    #[must_use]
    pub fn image(caption: impl Into<String>, image: ImageRef) -> Self {
        Self {
            text: caption.into(),
            is_user: true,
            body: MessageBody::Image { image },
        }
    }

    #[must_use]
    pub fn location(caption: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            text: caption.into(),
            is_user: true,
            body: MessageBody::Location { coordinate },
        }
    }

    pub(crate) fn into_message(self, id: MessageId) -> Message {
        Message {
            id,
            text: self.text,
            is_user: self.is_user,
            body: self.body,
        }
    }
}

/// Immutable once appended; no field has a setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    id: MessageId,
    text: String,
    is_user: bool,
    body: MessageBody,
}

impl Message {
    #[must_use]
    pub const fn id(&self) -> MessageId {
        self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn is_user(&self) -> bool {
        self.is_user
    }

    #[must_use]
    pub const fn body(&self) -> &MessageBody {
        &self.body
    }

    #[must_use]
    pub const fn kind(&self) -> MessageKind {
        self.body.kind()
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageRef> {
        match &self.body {
            MessageBody::Image { image } => Some(image),
            _ => None,
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self.body {
            MessageBody::Location { coordinate } => Some(coordinate),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PermissionState {
    #[default]
    Unknown,
    Requesting,
    Granted,
    Denied,
}

impl PermissionState {
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// The single owner of all screen state. Mutation goes through the named
/// operations on each component; the shell only ever reads the view.
#[derive(Debug, Default)]
pub struct Model {
    pub(crate) config: ChatConfig,
    pub(crate) log: MessageLog,
    pub(crate) composer: Composer,
    pub(crate) connectivity: ConnectivityMonitor,
    pub(crate) preview: PreviewState,
}

impl Model {
    #[must_use]
    pub fn with_config(config: ChatConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn config(&self) -> &ChatConfig {
        &self.config
    }

    #[must_use]
    pub const fn messages(&self) -> &MessageLog {
        &self.log
    }

    #[must_use]
    pub const fn composer(&self) -> &Composer {
        &self.composer
    }

    #[must_use]
    pub const fn connectivity(&self) -> ConnectivitySignal {
        self.connectivity.signal()
    }

    #[must_use]
    pub const fn preview(&self) -> &PreviewState {
        &self.preview
    }
}
