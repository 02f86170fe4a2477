//! Client-side components for the feed
//!
//! Two pieces: the time display, which renders relative post timestamps and
//! keeps them fresh on a fixed cadence, and the interaction notifier, which
//! issues interaction requests and reconciles the view to server pushes.
//! Rendering goes through an explicit [`PostView`] capability; there is no
//! ambient document.

pub mod error;
pub mod events;
pub mod interactions;
pub mod time_display;
pub mod view;

pub use error::ClientError;
pub use events::{subscribe_post_updates, SubscriptionHandle};
pub use interactions::{FeedClient, Interaction};
pub use time_display::{format_relative_time, start_time_refresh, RefreshHandle};
pub use view::{MemoryView, PostView, ViewError, ViewSlot};
