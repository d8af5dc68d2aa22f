mod alert;
mod camera;
mod connectivity;
mod linking;
mod location;

use serde::{Deserialize, Serialize};

pub use self::alert::{Alert, AlertOperation};
pub use self::camera::{
    Camera, CameraError, CameraFacing, CameraOperation, CameraOutput, CameraResult,
    CaptureConfig, CapturedAsset,
};
pub use self::connectivity::{
    Connectivity, ConnectivityOperation, ConnectivityOutput, NetworkState,
};
pub use self::linking::{Linking, LinkingOperation};
pub use self::location::{
    Location, LocationAccuracy, LocationError, LocationOperation, LocationOutput,
    LocationResult, Position,
};

// Crux's built-in Render is enough to trigger view updates.
pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

/// Answer to a platform permission prompt. Shared by camera and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    Granted,
    Denied,
    DeniedPermanently,
    Restricted,
    NotDetermined,
}

impl PermissionStatus {
    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }
}

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub alert: Alert<Event>,
    pub camera: Camera<Event>,
    pub connectivity: Connectivity<Event>,
    pub linking: Linking<Event>,
    pub location: Location<Event>,
    pub render: Render<Event>,
}
