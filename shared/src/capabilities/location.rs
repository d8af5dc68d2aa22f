use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PermissionStatus;

#[derive(Clone)]
pub struct Location<E> {
    context: CapabilityContext<LocationOperation, E>,
}

impl<Ev> Capability<Ev> for Location<Ev> {
    type Operation = LocationOperation;
    type MappedSelf<MappedEv> = Location<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Location::new(self.context.map_event(f))
    }
}

impl<E> Location<E>
where
    E: Send + 'static,
{
    pub fn new(context: CapabilityContext<LocationOperation, E>) -> Self {
        Self { context }
    }

    /// Foreground location permission prompt.
    pub fn request_permission<F>(&self, callback: F)
    where
        F: FnOnce(LocationResult) -> E + Send + 'static,
    {
        self.request(LocationOperation::RequestPermission, callback);
    }

    /// One-shot position fix.
    pub fn get_current_position<F>(&self, accuracy: LocationAccuracy, callback: F)
    where
        F: FnOnce(LocationResult) -> E + Send + 'static,
    {
        self.request(LocationOperation::GetCurrentPosition { accuracy }, callback);
    }

    fn request<F>(&self, operation: LocationOperation, callback: F)
    where
        F: FnOnce(LocationResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context.request_from_shell(operation).await;
            context.update_app(callback(result));
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationOperation {
    RequestPermission,
    GetCurrentPosition { accuracy: LocationAccuracy },
}

impl Operation for LocationOperation {
    type Output = LocationResult;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationAccuracy {
    Low,
    #[default]
    Balanced,
    High,
}

/// Raw fix as reported by the platform. Validated into a `Coordinate` by
/// the composer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LocationOutput {
    PermissionStatus(PermissionStatus),
    Position(Position),
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum LocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable: {reason}")]
    PositionUnavailable { reason: String },

    #[error("location services disabled")]
    ServicesDisabled,

    #[error("location not supported on this platform")]
    NotSupported,
}

pub type LocationResult = Result<LocationOutput, LocationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_starts_without_accuracy() {
        let position = Position::new(14.5995, 120.9842);
        assert_eq!(position.latitude, 14.5995);
        assert_eq!(position.longitude, 120.9842);
        assert!(position.accuracy_m.is_none());
    }

    #[test]
    fn default_accuracy_is_balanced() {
        assert_eq!(LocationAccuracy::default(), LocationAccuracy::Balanced);
    }
}
