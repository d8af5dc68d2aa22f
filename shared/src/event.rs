use serde::{Deserialize, Serialize};

use crate::capabilities::{CameraResult, ConnectivityOutput, LocationResult};
use crate::config::ChatConfig;
use crate::model::MessageId;

// --- Event enum: capability answers boxed to keep it small ---

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    // Lifecycle
    AppStarted,
    AppStopped,
    Configure(Box<ChatConfig>),

    // Connectivity
    ConnectivityChanged(Box<ConnectivityOutput>),

    // Text
    DraftChanged { text: String },
    InputFocusChanged { focused: bool },
    SendPressed,

    // Camera
    CameraPressed,
    CameraPermissionResult(Box<CameraResult>),
    PhotoCaptured(Box<CameraResult>),

    // Location
    LocationPermissionRequested,
    LocationPermissionResult(Box<LocationResult>),
    ShareLocationPressed,
    LocationPressed,
    PositionReceived(Box<LocationResult>),

    // Message rows and preview
    MessageTapped { id: MessageId },
    PreviewDismissed,
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AppStarted => "app_started",
            Self::AppStopped => "app_stopped",
            Self::Configure(_) => "configure",
            Self::ConnectivityChanged(_) => "connectivity_changed",
            Self::DraftChanged { .. } => "draft_changed",
            Self::InputFocusChanged { .. } => "input_focus_changed",
            Self::SendPressed => "send_pressed",
            Self::CameraPressed => "camera_pressed",
            Self::CameraPermissionResult(_) => "camera_permission_result",
            Self::PhotoCaptured(_) => "photo_captured",
            Self::LocationPermissionRequested => "location_permission_requested",
            Self::LocationPermissionResult(_) => "location_permission_result",
            Self::ShareLocationPressed => "share_location_pressed",
            Self::LocationPressed => "location_pressed",
            Self::PositionReceived(_) => "position_received",
            Self::MessageTapped { .. } => "message_tapped",
            Self::PreviewDismissed => "preview_dismissed",
        }
    }

    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        matches!(
            self,
            Self::DraftChanged { .. }
                | Self::InputFocusChanged { .. }
                | Self::SendPressed
                | Self::CameraPressed
                | Self::LocationPermissionRequested
                | Self::ShareLocationPressed
                | Self::LocationPressed
                | Self::MessageTapped { .. }
                | Self::PreviewDismissed
        )
    }
}
