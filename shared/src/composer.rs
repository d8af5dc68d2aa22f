//! Composer: turns typed text, camera captures and position fixes into new
//! messages at the head of the log.
//!
//! The capability round-trips themselves are driven by `App::update`; each
//! method here handles one step of a flow and reports, through
//! [`ChatResult`], whether the flow continues, produced a message, or
//! stopped. Failures never leave partial state behind.

use tracing::{debug, info};

use crate::capabilities::{
    CameraError, CameraOutput, CameraResult, LocationError, LocationOutput, LocationResult,
    PermissionStatus,
};
use crate::config::ChatConfig;
use crate::connectivity::ConnectivitySignal;
use crate::message_log::MessageLog;
use crate::model::{Coordinate, ImageRef, MessageId, NewMessage, PermissionState};
use crate::{CapabilityKind, ChatError, ChatResult};

#[derive(Debug, Clone, Default)]
pub struct Composer {
    draft: String,
    focused: bool,
    camera_permission: PermissionState,
    location_permission: PermissionState,
    share_on_grant: bool,
}

impl Composer {
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub const fn camera_permission(&self) -> PermissionState {
        self.camera_permission
    }

    #[must_use]
    pub const fn location_permission(&self) -> PermissionState {
        self.location_permission
    }

    /// Replaces the draft. Rejected while the signal disables text input.
    pub fn set_draft(&mut self, text: impl Into<String>, signal: ConnectivitySignal) -> ChatResult<()> {
        if !signal.allows_text_input() {
            return Err(ChatError::InputDisabled);
        }
        self.draft = text.into();
        Ok(())
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// `submitText`: trims the draft, prepends it as a Text message and
    /// clears the draft.
    pub fn submit_text(
        &mut self,
        signal: ConnectivitySignal,
        log: &mut MessageLog,
        now_ms: u64,
    ) -> ChatResult<MessageId> {
        if !signal.allows_text_input() {
            return Err(ChatError::InputDisabled);
        }

        let text = self.draft.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyInput);
        }

        let id = log.prepend(NewMessage::text(text), now_ms).id();
        self.draft.clear();
        info!(message_id = %id, kind = "text", "message sent");
        Ok(id)
    }

    // --- captureImage ---

    pub fn begin_capture(&mut self) {
        self.camera_permission = PermissionState::Requesting;
    }

    /// Camera permission answer. `Ok` means go ahead and capture.
    pub fn camera_permission_resolved(&mut self, result: &CameraResult) -> ChatResult<()> {
        let granted = match result {
            Ok(CameraOutput::PermissionStatus(status)) => status.is_granted(),
            Err(CameraError::PermissionDenied) => false,
            Ok(CameraOutput::Photo(_) | CameraOutput::Cancelled) => {
                self.camera_permission = PermissionState::Unknown;
                return Err(ChatError::CapabilityUnavailable {
                    capability: CapabilityKind::Camera,
                    reason: "unexpected capture result in permission answer".into(),
                });
            }
            Err(e) => {
                self.camera_permission = PermissionState::Unknown;
                return Err(ChatError::CapabilityUnavailable {
                    capability: CapabilityKind::Camera,
                    reason: e.to_string(),
                });
            }
        };

        if granted {
            self.camera_permission = PermissionState::Granted;
            Ok(())
        } else {
            self.camera_permission = PermissionState::Denied;
            Err(ChatError::PermissionDenied {
                capability: CapabilityKind::Camera,
            })
        }
    }

    /// Capture answer. A photo becomes an Image message; a cancel is
    /// reported as `UserCancelled` and changes nothing.
    pub fn photo_captured(
        &mut self,
        result: CameraResult,
        config: &ChatConfig,
        log: &mut MessageLog,
        now_ms: u64,
    ) -> ChatResult<MessageId> {
        let asset = match result {
            Ok(CameraOutput::Photo(asset)) => asset,
            Ok(CameraOutput::Cancelled) | Err(CameraError::Cancelled) => {
                debug!("capture cancelled");
                return Err(ChatError::UserCancelled);
            }
            Ok(CameraOutput::PermissionStatus(_)) => {
                return Err(ChatError::CapabilityUnavailable {
                    capability: CapabilityKind::Camera,
                    reason: "unexpected permission status in capture result".into(),
                });
            }
            Err(CameraError::PermissionDenied) => {
                self.camera_permission = PermissionState::Denied;
                return Err(ChatError::PermissionDenied {
                    capability: CapabilityKind::Camera,
                });
            }
            Err(e) => {
                return Err(ChatError::CapabilityUnavailable {
                    capability: CapabilityKind::Camera,
                    reason: e.to_string(),
                });
            }
        };

        let image = ImageRef::new(asset.uri).ok_or_else(|| ChatError::CapabilityUnavailable {
            capability: CapabilityKind::Camera,
            reason: "captured asset has no uri".into(),
        })?;

        let id = log
            .prepend(NewMessage::image(config.image_caption.as_str(), image), now_ms)
            .id();
        info!(message_id = %id, kind = "image", "message sent");
        Ok(id)
    }

    // --- requestLocationPermission / shareLocation ---

    /// Starts a permission request. With `share_on_grant` the caller will
    /// share as soon as the grant is observed. A pending share survives a
    /// plain request made before the answer arrives.
    pub fn begin_location_permission(&mut self, share_on_grant: bool) {
        self.location_permission = PermissionState::Requesting;
        self.share_on_grant |= share_on_grant;
    }

    /// Permission answer. `Ok(true)` means a share is waiting on this grant.
    pub fn location_permission_resolved(&mut self, result: &LocationResult) -> ChatResult<bool> {
        let share = std::mem::take(&mut self.share_on_grant);
        let status = match result {
            Ok(LocationOutput::PermissionStatus(status)) => *status,
            Err(LocationError::PermissionDenied) => PermissionStatus::Denied,
            Ok(LocationOutput::Position(_)) => {
                self.location_permission = PermissionState::Unknown;
                return Err(ChatError::CapabilityUnavailable {
                    capability: CapabilityKind::Location,
                    reason: "unexpected position in permission answer".into(),
                });
            }
            Err(e) => {
                self.location_permission = PermissionState::Denied;
                return Err(ChatError::CapabilityUnavailable {
                    capability: CapabilityKind::Location,
                    reason: e.to_string(),
                });
            }
        };

        if status.is_granted() {
            self.location_permission = PermissionState::Granted;
            Ok(share)
        } else {
            self.location_permission = PermissionState::Denied;
            Err(ChatError::PermissionDenied {
                capability: CapabilityKind::Location,
            })
        }
    }

    /// The stored flag is the only gate; the platform is not asked again.
    pub fn ensure_location_granted(&self) -> ChatResult<()> {
        if self.location_permission.is_granted() {
            Ok(())
        } else {
            Err(ChatError::PermissionRequired {
                capability: CapabilityKind::Location,
            })
        }
    }

    /// Position answer. A valid fix becomes a Location message.
    pub fn position_received(
        &mut self,
        result: LocationResult,
        config: &ChatConfig,
        log: &mut MessageLog,
        now_ms: u64,
    ) -> ChatResult<MessageId> {
        let position = match result {
            Ok(LocationOutput::Position(position)) => position,
            Ok(LocationOutput::PermissionStatus(_)) => {
                return Err(ChatError::CapabilityUnavailable {
                    capability: CapabilityKind::Location,
                    reason: "unexpected permission status in position result".into(),
                });
            }
            Err(LocationError::PermissionDenied) => {
                self.location_permission = PermissionState::Denied;
                return Err(ChatError::PermissionDenied {
                    capability: CapabilityKind::Location,
                });
            }
            Err(e) => {
                return Err(ChatError::CapabilityUnavailable {
                    capability: CapabilityKind::Location,
                    reason: e.to_string(),
                });
            }
        };

        let coordinate = Coordinate::new(position.latitude, position.longitude)?;
        let id = log
            .prepend(NewMessage::location(config.location_text(), coordinate), now_ms)
            .id();
        info!(message_id = %id, kind = "location", "message sent");
        Ok(id)
    }
}
