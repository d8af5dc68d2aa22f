//! What the shell draws. Built fresh from the model on every render; holds
//! no state of its own.

use serde::{Deserialize, Serialize};

use crate::connectivity::ConnectivitySignal;
use crate::model::{Message, MessageBody, MessageId, Model, PermissionState};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Good,
    Bad,
    Pending,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusView {
    pub signal: ConnectivitySignal,
    pub label: String,
    pub tone: StatusTone,
}

impl From<ConnectivitySignal> for StatusView {
    fn from(signal: ConnectivitySignal) -> Self {
        let tone = match signal {
            ConnectivitySignal::Connected => StatusTone::Good,
            ConnectivitySignal::Disconnected => StatusTone::Bad,
            ConnectivitySignal::Unknown => StatusTone::Pending,
        };
        Self {
            signal,
            label: signal.label().into(),
            tone,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RowAlignment {
    Own,
    Other,
}

/// One row per message kind. Location pins carry their coordinates so the
/// shell can draw a map without a second lookup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RowContent {
    Text {
        text: String,
    },
    Image {
        uri: String,
        caption: String,
    },
    LocationPin {
        caption: String,
        latitude: f64,
        longitude: f64,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MessageRow {
    pub id: MessageId,
    pub alignment: RowAlignment,
    pub content: RowContent,
}

impl From<&Message> for MessageRow {
    fn from(message: &Message) -> Self {
        let caption = message.text().to_string();
        let content = match message.body() {
            MessageBody::Text => RowContent::Text { text: caption },
            MessageBody::Image { image } => RowContent::Image {
                uri: image.as_str().to_string(),
                caption,
            },
            MessageBody::Location { coordinate } => RowContent::LocationPin {
                caption,
                latitude: coordinate.lat(),
                longitude: coordinate.lon(),
            },
        };
        Self {
            id: message.id(),
            alignment: if message.is_user() {
                RowAlignment::Own
            } else {
                RowAlignment::Other
            },
            content,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ComposerView {
    pub draft: String,
    pub placeholder: String,
    pub input_enabled: bool,
    pub send_enabled: bool,
    pub focused: bool,
    pub location_permission: PermissionState,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreviewView {
    pub uri: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ViewModel {
    pub status: StatusView,
    /// Newest first.
    pub messages: Vec<MessageRow>,
    pub composer: ComposerView,
    pub preview: Option<PreviewView>,
}

impl ViewModel {
    #[must_use]
    pub fn build(model: &Model) -> Self {
        let signal = model.connectivity();
        let composer = model.composer();
        let input_enabled = signal.allows_text_input();
        let placeholder = if input_enabled {
            &model.config().input_placeholder
        } else {
            &model.config().offline_placeholder
        };

        Self {
            status: signal.into(),
            messages: model
                .messages()
                .iter_newest_first()
                .map(MessageRow::from)
                .collect(),
            composer: ComposerView {
                draft: composer.draft().to_string(),
                placeholder: placeholder.clone(),
                input_enabled,
                send_enabled: input_enabled && !composer.draft().trim().is_empty(),
                focused: composer.is_focused(),
                location_permission: composer.location_permission(),
            },
            preview: model.preview().current().map(|image| PreviewView {
                uri: image.as_str().to_string(),
            }),
        }
    }
}
