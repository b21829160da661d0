//! Append-only per-license transaction log.

pub mod model;

pub use model::{ActiveDevice, Event, EventType, RegisteredDevices};
