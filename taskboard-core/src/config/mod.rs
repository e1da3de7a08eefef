//! Task configuration
//!
//! Task graphs described as data, resolved against the board's sensor
//! registry at build time. Stored as postcard binary data under the `serde`
//! feature.

pub mod builder;
pub mod types;

pub use builder::{build_step, build_task};
pub use types::*;
