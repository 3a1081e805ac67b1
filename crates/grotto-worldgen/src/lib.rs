//! Cave world-generation stages: noise-carved cave volumes, per-column
//! cave-floor extraction, and asynchronous region generation.

mod async_generation;
mod cave;
mod floor;

pub use async_generation::{AsyncRegionGenerator, GeneratedRegion};
pub use cave::{CaveGenerator, CaveParams, CaveProvider};
pub use floor::{CaveFloorProvider, FloorParams};
