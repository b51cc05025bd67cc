//! AQI reading storage for AirWatch.
//!
//! - [`ReadingStore`]: in-memory, case-insensitive index of dated readings
//!   that implements [`airwatch_core::aqi::AqiSource`].
//! - [`load_store`]: builds a store from a JSON seed file.

pub mod loader;
pub mod store;

pub use loader::{load_store, LoadError};
pub use store::ReadingStore;
