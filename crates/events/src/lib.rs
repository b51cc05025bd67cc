//! AirWatch notification infrastructure.
//!
//! - [`NotificationDispatcher`]: builds, records and publishes alert events.
//! - [`AlertHistory`]: bounded per-subscriber history (last 10 events).
//! - [`NotificationBus`]: in-process fan-out backed by `tokio::sync::broadcast`.
//! - [`NotificationLogger`]: background consumer that logs every event.

pub mod bus;
pub mod dispatcher;
pub mod history;
pub mod logger;

#[cfg(test)]
mod test_support;

pub use bus::NotificationBus;
pub use dispatcher::NotificationDispatcher;
pub use history::{AlertHistory, HISTORY_LIMIT};
pub use logger::NotificationLogger;
