//! Integer region math for world generation.
//!
//! A [`Region3`] is the unit of work for every generation stage: a fixed,
//! axis-aligned block of voxel coordinates with inclusive bounds.

mod region;

pub use region::Region3;
