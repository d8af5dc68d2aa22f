//! Append-only message log.
//!
//! Messages are stored in creation order and handed to the renderer newest
//! first. The log assigns ids itself so two messages can never share one,
//! even when the clock does not advance between them.

use tracing::debug;

use crate::model::{Message, MessageId, NewMessage};

#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<Message>,
    last_id: Option<MessageId>,
}

impl MessageLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `message` at the head of the display order and returns it.
    ///
    /// The id is `now_ms`, bumped past the previous id when the clock has
    /// stalled or stepped backwards.
    pub fn prepend(&mut self, message: NewMessage, now_ms: u64) -> &Message {
        let id = self.allocate_id(now_ms);
        debug!(message_id = %id, len = self.entries.len() + 1, "message prepended");
        self.entries.push(message.into_message(id));
        &self.entries[self.entries.len() - 1]
    }

    fn allocate_id(&mut self, now_ms: u64) -> MessageId {
        let raw = match self.last_id {
            Some(last) => now_ms.max(last.as_u64().saturating_add(1)),
            None => now_ms,
        };
        let id = MessageId::new(raw);
        self.last_id = Some(id);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recently created message.
    #[must_use]
    pub fn newest(&self) -> Option<&Message> {
        self.entries.last()
    }

    #[must_use]
    pub fn get(&self, id: MessageId) -> Option<&Message> {
        self.entries
            .binary_search_by_key(&id, Message::id)
            .ok()
            .map(|idx| &self.entries[idx])
    }

    /// Display order: newest first.
    pub fn iter_newest_first(&self) -> impl DoubleEndedIterator<Item = &Message> + ExactSizeIterator {
        self.entries.iter().rev()
    }

    /// Creation order: oldest first.
    pub fn iter_chronological(&self) -> impl DoubleEndedIterator<Item = &Message> + ExactSizeIterator {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, ImageRef, MessageKind};
    use proptest::prelude::*;

    #[test]
    fn new_log_is_empty() {
        let log = MessageLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        assert!(log.newest().is_none());
    }

    #[test]
    fn prepend_puts_newest_first() {
        let mut log = MessageLog::new();
        log.prepend(NewMessage::text("first"), 1_000);
        log.prepend(NewMessage::text("second"), 2_000);
        log.prepend(NewMessage::text("third"), 3_000);

        let display: Vec<&str> = log.iter_newest_first().map(Message::text).collect();
        assert_eq!(display, vec!["third", "second", "first"]);

        let created: Vec<&str> = log.iter_chronological().map(Message::text).collect();
        assert_eq!(created, vec!["first", "second", "third"]);
    }

    #[test]
    fn ids_follow_the_clock() {
        let mut log = MessageLog::new();
        let id = log.prepend(NewMessage::text("a"), 1_700_000_000_000).id();
        assert_eq!(id.as_u64(), 1_700_000_000_000);
    }

    #[test]
    fn same_tick_still_yields_unique_ids() {
        let mut log = MessageLog::new();
        let a = log.prepend(NewMessage::text("a"), 5_000).id();
        let b = log.prepend(NewMessage::text("b"), 5_000).id();
        let c = log.prepend(NewMessage::text("c"), 5_000).id();
        assert!(a < b && b < c);
    }

    #[test]
    fn clock_going_backwards_keeps_ids_increasing() {
        let mut log = MessageLog::new();
        let a = log.prepend(NewMessage::text("a"), 9_000).id();
        let b = log.prepend(NewMessage::text("b"), 1_000).id();
        assert!(b > a);
    }

    #[test]
    fn get_finds_each_message_by_id() {
        let mut log = MessageLog::new();
        let image = ImageRef::new("img1").unwrap();
        let coord = Coordinate::new(14.5995, 120.9842).unwrap();
        let t = log.prepend(NewMessage::text("hello"), 10).id();
        let i = log.prepend(NewMessage::image("Captured an image!", image), 10).id();
        let l = log.prepend(NewMessage::location("pin", coord), 11).id();

        assert_eq!(log.get(t).unwrap().kind(), MessageKind::Text);
        assert_eq!(log.get(i).unwrap().kind(), MessageKind::Image);
        assert_eq!(log.get(l).unwrap().kind(), MessageKind::Location);
        assert!(log.get(MessageId::new(0)).is_none());
    }

    proptest! {
        #[test]
        fn ids_strictly_increase_for_any_clock(clock in proptest::collection::vec(0u64..10_000, 1..64)) {
            let mut log = MessageLog::new();
            for (i, now) in clock.iter().enumerate() {
                log.prepend(NewMessage::text(format!("m{i}")), *now);
            }
            prop_assert_eq!(log.len(), clock.len());
            let ids: Vec<MessageId> = log.iter_chronological().map(Message::id).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prepended_message_is_always_at_head(count in 1usize..32) {
            let mut log = MessageLog::new();
            for i in 0..count {
                let id = log.prepend(NewMessage::text(format!("m{i}")), 42).id();
                prop_assert_eq!(log.iter_newest_first().next().map(Message::id), Some(id));
                prop_assert_eq!(log.newest().map(Message::id), Some(id));
            }
        }
    }
}
