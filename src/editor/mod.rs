//! Promotion editing sessions.
//!
//! A [`PromotionEditor`] owns one draft and talks to the outside world only
//! through the [`PromotionApi`], [`Notifier`] and [`Navigator`] traits.

mod memory;
mod ports;
mod session;

pub use memory::{
    Destination, InMemoryPromotionApi, Notification, RecordingNavigator, RecordingNotifier,
};
pub use ports::{Navigator, Notifier, PromotionApi};
pub use session::{EditMode, PromotionEditor, SaveOutcome};
