use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PermissionStatus;

pub const DEFAULT_JPEG_QUALITY: u8 = 85;
pub const DEFAULT_MAX_DIMENSION: u32 = 2048;
pub const MAX_DIMENSION: u32 = 8192;

#[derive(Clone)]
pub struct Camera<E> {
    context: CapabilityContext<CameraOperation, E>,
}

impl<Ev> Capability<Ev> for Camera<Ev> {
    type Operation = CameraOperation;
    type MappedSelf<MappedEv> = Camera<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Camera::new(self.context.map_event(f))
    }
}

impl<E> Camera<E>
where
    E: Send + 'static,
{
    pub fn new(context: CapabilityContext<CameraOperation, E>) -> Self {
        Self { context }
    }

    pub fn request_permission<F>(&self, callback: F)
    where
        F: FnOnce(CameraResult) -> E + Send + 'static,
    {
        self.request(CameraOperation::RequestPermission, callback);
    }

    pub fn capture_photo<F>(&self, config: CaptureConfig, callback: F)
    where
        F: FnOnce(CameraResult) -> E + Send + 'static,
    {
        let config = config.validated();
        self.request(CameraOperation::CapturePhoto { config }, callback);
    }

    fn request<F>(&self, operation: CameraOperation, callback: F)
    where
        F: FnOnce(CameraResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context.request_from_shell(operation).await;
            context.update_app(callback(result));
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CameraOperation {
    RequestPermission,
    CapturePhoto { config: CaptureConfig },
}

impl Operation for CameraOperation {
    type Output = CameraResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CameraFacing {
    Front,
    #[default]
    Back,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CaptureConfig {
    pub facing: CameraFacing,
    pub quality: u8,
    pub max_width: u32,
    pub max_height: u32,
    pub allow_editing: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            facing: CameraFacing::Back,
            quality: DEFAULT_JPEG_QUALITY,
            max_width: DEFAULT_MAX_DIMENSION,
            max_height: DEFAULT_MAX_DIMENSION,
            allow_editing: false,
        }
    }
}

impl CaptureConfig {
    #[must_use]
    pub fn validated(mut self) -> Self {
        self.quality = self.quality.min(100);
        self.max_width = self.max_width.clamp(1, MAX_DIMENSION);
        self.max_height = self.max_height.clamp(1, MAX_DIMENSION);
        self
    }
}

/// Reference to a photo the shell has stored locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CapturedAsset {
    pub uri: String,
    pub width: u32,
    pub height: u32,
    pub mime_type: Option<String>,
}

impl CapturedAsset {
    pub fn new(uri: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            uri: uri.into(),
            width,
            height,
            mime_type: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum CameraOutput {
    PermissionStatus(PermissionStatus),
    Photo(CapturedAsset),
    Cancelled,
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,

    #[error("camera unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("capture failed: {reason}")]
    CaptureFailed { reason: String },

    #[error("capture cancelled by user")]
    Cancelled,

    #[error("camera not supported on this platform")]
    NotSupported,
}

pub type CameraResult = Result<CameraOutput, CameraError>;
