//! Notifier adapters that do not involve a network transport.

mod recording;

pub use recording::{Delivery, RecordingNotifier};
