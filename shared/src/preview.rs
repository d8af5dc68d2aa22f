use serde::{Deserialize, Serialize};

use crate::model::ImageRef;

/// Full-screen image overlay. Never touches the message log.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "image", rename_all = "snake_case")]
pub enum PreviewState {
    #[default]
    Closed,
    Open(ImageRef),
}

impl PreviewState {
    /// Shows `image`, replacing whatever was open. Returns the replaced
    /// reference, if any.
    pub fn open(&mut self, image: ImageRef) -> Option<ImageRef> {
        match std::mem::replace(self, Self::Open(image)) {
            Self::Open(previous) => Some(previous),
            Self::Closed => None,
        }
    }

    /// Returns `true` if an overlay was actually open.
    pub fn close(&mut self) -> bool {
        matches!(std::mem::take(self), Self::Open(_))
    }

    #[must_use]
    pub fn current(&self) -> Option<&ImageRef> {
        match self {
            Self::Open(image) => Some(image),
            Self::Closed => None,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image(uri: &str) -> ImageRef {
        ImageRef::new(uri).unwrap()
    }

    #[test]
    fn starts_closed() {
        let preview = PreviewState::default();
        assert!(!preview.is_open());
        assert!(preview.current().is_none());
    }

    #[test]
    fn open_then_close() {
        let mut preview = PreviewState::default();
        assert_eq!(preview.open(image("img1")), None);
        assert_eq!(preview.current(), Some(&image("img1")));

        assert!(preview.close());
        assert_eq!(preview, PreviewState::Closed);
    }

    #[test]
    fn second_open_replaces_the_first() {
        let mut preview = PreviewState::default();
        preview.open(image("img1"));
        assert_eq!(preview.open(image("img2")), Some(image("img1")));
        assert_eq!(preview.current(), Some(&image("img2")));
    }

    #[test]
    fn closing_when_closed_is_a_no_op() {
        let mut preview = PreviewState::default();
        assert!(!preview.close());
        assert_eq!(preview, PreviewState::Closed);
    }
}
