use tracing::{debug, info, warn};

use crate::capabilities::Capabilities;
use crate::event::Event;
use crate::model::{MessageBody, MessageId, Model};
use crate::view::ViewModel;
use crate::{get_current_time_ms, ChatError};

#[derive(Default)]
pub struct App;

impl App {
    /// Logs a failed operation and raises its alert, if it has one.
    fn report(error: &ChatError, caps: &Capabilities) {
        match error.alert() {
            Some(alert) => {
                warn!(code = error.code(), %error, "operation failed");
                caps.alert.show_content(alert);
            }
            None => debug!(code = error.code(), %error, "operation skipped"),
        }
    }

    fn request_location_permission(model: &mut Model, caps: &Capabilities, share_on_grant: bool) {
        model.composer.begin_location_permission(share_on_grant);
        caps.location
            .request_permission(|result| Event::LocationPermissionResult(Box::new(result)));
    }

    fn share_location(model: &Model, caps: &Capabilities) {
        if let Err(e) = model.composer.ensure_location_granted() {
            Self::report(&e, caps);
            return;
        }
        caps.location
            .get_current_position(model.config.location_accuracy, |result| {
                Event::PositionReceived(Box::new(result))
            });
    }

    fn message_tapped(model: &mut Model, caps: &Capabilities, id: MessageId) {
        let Some(message) = model.log.get(id) else {
            Self::report(&ChatError::UnknownMessage(id), caps);
            return;
        };

        match message.body() {
            MessageBody::Text => {}
            MessageBody::Image { image } => {
                let image = image.clone();
                model.composer.set_focused(false);
                model.preview.open(image);
                caps.render.render();
            }
            MessageBody::Location { coordinate } => match model.config.map_url(*coordinate) {
                Ok(url) => caps.linking.open_url(&url),
                Err(e) => warn!(error = %e, "cannot build map link"),
            },
        }
    }
}

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        debug!(
            event = event.name(),
            user = event.is_user_initiated(),
            "update"
        );

        match event {
            Event::AppStarted => {
                if model.connectivity.begin() {
                    caps.connectivity
                        .subscribe(|output| Event::ConnectivityChanged(Box::new(output)));
                }
                caps.render.render();
            }

            Event::AppStopped => {
                if model.connectivity.end() {
                    caps.connectivity.unsubscribe();
                }
            }

            Event::Configure(config) => match config.validated() {
                Ok(config) => {
                    info!("configuration applied");
                    model.config = config;
                    caps.render.render();
                }
                Err(e) => warn!(error = %e, "configuration rejected"),
            },

            Event::ConnectivityChanged(output) => {
                if let Some(signal) = model.connectivity.apply(*output) {
                    if !signal.allows_text_input() {
                        model.composer.set_focused(false);
                    }
                    caps.render.render();
                }
            }

            Event::DraftChanged { text } => {
                match model.composer.set_draft(text, model.connectivity.signal()) {
                    Ok(()) => caps.render.render(),
                    Err(e) => Self::report(&e, caps),
                }
            }

            Event::InputFocusChanged { focused } => {
                model.composer.set_focused(focused);
                caps.render.render();
            }

            Event::SendPressed => {
                let signal = model.connectivity.signal();
                match model
                    .composer
                    .submit_text(signal, &mut model.log, get_current_time_ms())
                {
                    Ok(_) => caps.render.render(),
                    Err(e) => Self::report(&e, caps),
                }
            }

            Event::CameraPressed => {
                model.composer.begin_capture();
                caps.camera
                    .request_permission(|result| Event::CameraPermissionResult(Box::new(result)));
            }

            Event::CameraPermissionResult(result) => {
                match model.composer.camera_permission_resolved(&result) {
                    Ok(()) => caps.camera.capture_photo(model.config.capture.clone(), |result| {
                        Event::PhotoCaptured(Box::new(result))
                    }),
                    Err(e) => Self::report(&e, caps),
                }
            }

            Event::PhotoCaptured(result) => {
                match model.composer.photo_captured(
                    *result,
                    &model.config,
                    &mut model.log,
                    get_current_time_ms(),
                ) {
                    Ok(_) => caps.render.render(),
                    Err(e) => Self::report(&e, caps),
                }
            }

            Event::LocationPermissionRequested => {
                Self::request_location_permission(model, caps, false);
                caps.render.render();
            }

            Event::LocationPermissionResult(result) => {
                match model.composer.location_permission_resolved(&result) {
                    Ok(true) => Self::share_location(model, caps),
                    Ok(false) => {}
                    Err(e) => Self::report(&e, caps),
                }
                caps.render.render();
            }

            Event::ShareLocationPressed => Self::share_location(model, caps),

            Event::LocationPressed => {
                if model.composer.location_permission().is_granted() {
                    Self::share_location(model, caps);
                } else {
                    Self::request_location_permission(model, caps, true);
                    caps.render.render();
                }
            }

            Event::PositionReceived(result) => {
                match model.composer.position_received(
                    *result,
                    &model.config,
                    &mut model.log,
                    get_current_time_ms(),
                ) {
                    Ok(_) => caps.render.render(),
                    Err(e) => Self::report(&e, caps),
                }
            }

            Event::MessageTapped { id } => Self::message_tapped(model, caps, id),

            Event::PreviewDismissed => {
                if model.preview.close() {
                    caps.render.render();
                }
            }
        }
    }

    fn view(&self, model: &Model) -> ViewModel {
        ViewModel::build(model)
    }
}
