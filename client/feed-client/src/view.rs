/// Display targets
///
/// A [`PostView`] is the rendering capability handed to every component
/// that writes to the screen. Targets are addressed by post id and slot;
/// writing to a target that does not exist is an error, never a silent
/// no-op.
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Addressable slots inside a rendered post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewSlot {
    PostTime,
    LikesCount,
    SharesCount,
    CommentsSection,
}

/// Errors raised by display targets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("no display target for post {post_id} ({slot:?})")]
    MissingTarget { post_id: i64, slot: ViewSlot },
}

/// A rendering surface for post slots
pub trait PostView: Send + Sync {
    fn set_text(&self, post_id: i64, slot: ViewSlot, text: &str) -> Result<(), ViewError>;
}

/// In-memory display target keyed by post id and slot
///
/// Posts must be registered before anything renders into them; writes to an
/// unregistered post report a missing target. Used by tests and headless
/// demos.
#[derive(Clone, Default)]
pub struct MemoryView {
    slots: Arc<Mutex<HashMap<i64, HashMap<ViewSlot, String>>>>,
}

impl MemoryView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a post's display targets available
    pub fn register_post(&self, post_id: i64) {
        self.slots.lock().unwrap().entry(post_id).or_default();
    }

    /// Tear down a post's display targets
    pub fn remove_post(&self, post_id: i64) {
        self.slots.lock().unwrap().remove(&post_id);
    }

    /// Current text of a slot, if anything has been written to it
    pub fn text(&self, post_id: i64, slot: ViewSlot) -> Option<String> {
        self.slots
            .lock()
            .unwrap()
            .get(&post_id)
            .and_then(|slots| slots.get(&slot))
            .cloned()
    }
}

impl PostView for MemoryView {
    fn set_text(&self, post_id: i64, slot: ViewSlot, text: &str) -> Result<(), ViewError> {
        let mut slots = self.slots.lock().unwrap();
        match slots.get_mut(&post_id) {
            Some(post_slots) => {
                post_slots.insert(slot, text.to_string());
                Ok(())
            }
            None => Err(ViewError::MissingTarget { post_id, slot }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_read_back() {
        let view = MemoryView::new();
        view.register_post(1);

        view.set_text(1, ViewSlot::LikesCount, "3 Likes").unwrap();
        assert_eq!(view.text(1, ViewSlot::LikesCount).as_deref(), Some("3 Likes"));
        assert_eq!(view.text(1, ViewSlot::SharesCount), None);
    }

    #[test]
    fn test_unregistered_post_is_missing_target() {
        let view = MemoryView::new();

        let err = view.set_text(9, ViewSlot::PostTime, "now").unwrap_err();
        assert_eq!(
            err,
            ViewError::MissingTarget {
                post_id: 9,
                slot: ViewSlot::PostTime
            }
        );
    }

    #[test]
    fn test_removed_post_is_missing_target() {
        let view = MemoryView::new();
        view.register_post(5);
        view.set_text(5, ViewSlot::PostTime, "now").unwrap();

        view.remove_post(5);
        assert!(view.set_text(5, ViewSlot::PostTime, "later").is_err());
        assert_eq!(view.text(5, ViewSlot::PostTime), None);
    }
}
