// lib.rs - chat screen core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod capabilities;
pub mod composer;
pub mod config;
pub mod connectivity;
pub mod event;
pub mod message_log;
pub mod model;
pub mod preview;
pub mod view;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect};
pub use config::{ChatConfig, ConfigError};
pub use crux_core::App as CruxApp;
pub use event::Event;
pub use model::{
    Coordinate, CoordinateError, ImageRef, Message, MessageBody, MessageId, MessageKind, Model,
    NewMessage, PermissionState,
};
pub use view::ViewModel;

/// Which platform collaborator an error or permission refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    Camera,
    Location,
    Connectivity,
}

impl CapabilityKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Camera => "camera",
            Self::Location => "location",
            Self::Connectivity => "connectivity",
        }
    }
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title and body of a user-facing alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertContent {
    pub title: String,
    pub message: String,
}

impl AlertContent {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Every way a composer operation can fail to produce a message.
///
/// None of these are fatal. Each failure leaves the screen in its prior
/// stable state; [`ChatError::alert`] says whether the user is told about it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ChatError {
    #[error("draft is empty")]
    EmptyInput,

    #[error("text input is disabled while disconnected")]
    InputDisabled,

    #[error("{capability} permission denied")]
    PermissionDenied { capability: CapabilityKind },

    #[error("{capability} permission has not been granted")]
    PermissionRequired { capability: CapabilityKind },

    #[error("cancelled by user")]
    UserCancelled,

    #[error("{capability} unavailable: {reason}")]
    CapabilityUnavailable {
        capability: CapabilityKind,
        reason: String,
    },

    #[error(transparent)]
    InvalidCoordinate(#[from] CoordinateError),

    #[error("message {0} not found")]
    UnknownMessage(MessageId),
}

impl ChatError {
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EMPTY_INPUT",
            Self::InputDisabled => "INPUT_DISABLED",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::PermissionRequired { .. } => "PERMISSION_REQUIRED",
            Self::UserCancelled => "USER_CANCELLED",
            Self::CapabilityUnavailable { .. } => "CAPABILITY_UNAVAILABLE",
            Self::InvalidCoordinate(_) => "INVALID_COORDINATE",
            Self::UnknownMessage(_) => "UNKNOWN_MESSAGE",
        }
    }

    /// The alert to surface, or `None` when the failure is recovered silently.
    #[must_use]
    pub fn alert(&self) -> Option<AlertContent> {
        match self {
            Self::EmptyInput
            | Self::InputDisabled
            | Self::UserCancelled
            | Self::UnknownMessage(_) => None,

            Self::PermissionDenied {
                capability: CapabilityKind::Camera,
            } => Some(AlertContent::new(
                "Permission Denied",
                "You need to allow camera access to use this feature.",
            )),
            Self::PermissionDenied {
                capability: CapabilityKind::Location,
            } => Some(AlertContent::new(
                "Permission Denied",
                "You need to allow location access",
            )),
            Self::PermissionDenied { capability } => Some(AlertContent::new(
                "Permission Denied",
                format!("You need to allow {capability} access"),
            )),

            Self::PermissionRequired { capability } => Some(AlertContent::new(
                "Permission Required",
                format!("You need to enable {capability} permission first."),
            )),

            Self::CapabilityUnavailable {
                capability: CapabilityKind::Camera,
                ..
            } => Some(AlertContent::new(
                "Camera Unavailable",
                "The camera could not be used. Please try again.",
            )),
            Self::CapabilityUnavailable {
                capability: CapabilityKind::Location,
                ..
            }
            | Self::InvalidCoordinate(_) => Some(AlertContent::new(
                "Location Unavailable",
                "Unable to determine your location. Please try again.",
            )),
            // Connectivity degrades to the Unknown signal instead.
            Self::CapabilityUnavailable { .. } => None,
        }
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

#[must_use]
pub fn get_current_time_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
