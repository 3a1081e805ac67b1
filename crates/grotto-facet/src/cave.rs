//! Bit-packed boolean cave volume for one region.
//!
//! One bit per voxel, packed into `u64` words. A 32x128x32 region costs
//! 16 KiB regardless of how much of it is cave.

use glam::IVec3;
use grotto_region::Region3;
use serde::{Deserialize, Serialize};

/// Boolean volumetric facet: `true` means "this voxel is inside a cave".
///
/// Indexed by absolute world coordinates within the owning region.
/// Out-of-region access is a precondition violation (debug assertion).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaveFacet {
    region: Region3,
    /// Raw storage. One bit per voxel, packed into 64-bit words.
    words: Vec<u64>,
}

impl CaveFacet {
    /// Creates a facet covering `region` with every voxel solid (not cave).
    pub fn new(region: Region3) -> Self {
        let word_count = (region.volume() as u64).div_ceil(64) as usize;
        Self {
            region,
            words: vec![0u64; word_count],
        }
    }

    /// Returns the region this facet covers.
    pub fn region(&self) -> Region3 {
        self.region
    }

    /// Returns whether the voxel at absolute world coordinates is cave.
    pub fn get_world(&self, x: i32, y: i32, z: i32) -> bool {
        let index = self.linear_index(x, y, z);
        (self.words[index / 64] >> (index % 64)) & 1 != 0
    }

    /// Sets the cave flag for the voxel at absolute world coordinates.
    pub fn set_world(&mut self, x: i32, y: i32, z: i32, cave: bool) {
        let index = self.linear_index(x, y, z);
        let mask = 1u64 << (index % 64);
        if cave {
            self.words[index / 64] |= mask;
        } else {
            self.words[index / 64] &= !mask;
        }
    }

    /// Returns the number of cave voxels in the region.
    pub fn cave_count(&self) -> u64 {
        self.words.iter().map(|w| w.count_ones() as u64).sum()
    }

    /// Returns the size of the backing storage in bytes.
    pub fn storage_bytes(&self) -> usize {
        self.words.len() * 8
    }

    fn linear_index(&self, x: i32, y: i32, z: i32) -> usize {
        debug_assert!(
            self.region.contains(IVec3::new(x, y, z)),
            "voxel ({x}, {y}, {z}) outside facet region {:?}",
            self.region
        );
        let size = self.region.size();
        let lx = (x - self.region.min.x) as usize;
        let ly = (y - self.region.min.y) as usize;
        let lz = (z - self.region.min.z) as usize;
        (ly * size.z as usize + lz) * size.x as usize + lx
    }
}
