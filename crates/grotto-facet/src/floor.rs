//! Per-column cave-floor height facet.

use grotto_region::Region3;
use serde::{Deserialize, Serialize};

/// A value to indicate that no cave floor was found (either because no cave
/// exists in this column within the region, or because the cave extends below
/// the region, in which case the floor is provided by the region beneath).
pub const NO_CAVE: f32 = -999_999_999.0;

/// 2D facet over the (x, z) footprint of a region, one value per column:
/// the y-coordinate of the lowest open cave voxel (the floor surface is the
/// solid voxel directly beneath it), or [`NO_CAVE`].
///
/// Every cell starts at [`NO_CAVE`]; the floor scan overwrites a cell at most
/// once and never touches it again.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CaveFloorFacet {
    region: Region3,
    values: Vec<f32>,
}

impl CaveFloorFacet {
    /// Creates a facet over `region`'s footprint with every column at [`NO_CAVE`].
    pub fn new(region: Region3) -> Self {
        Self {
            region,
            values: vec![NO_CAVE; region.column_count() as usize],
        }
    }

    /// Returns the region whose footprint this facet covers.
    pub fn region(&self) -> Region3 {
        self.region
    }

    /// Returns the raw floor value for the column at absolute world (x, z).
    pub fn get_world(&self, x: i32, z: i32) -> f32 {
        self.values[self.column_index(x, z)]
    }

    /// Sets the floor value for the column at absolute world (x, z).
    pub fn set_world(&mut self, x: i32, z: i32, value: f32) {
        let index = self.column_index(x, z);
        self.values[index] = value;
    }

    /// Returns the floor y-coordinate for the column, or `None` for [`NO_CAVE`].
    pub fn floor_world(&self, x: i32, z: i32) -> Option<i32> {
        let value = self.get_world(x, z);
        if value == NO_CAVE {
            None
        } else {
            Some(value as i32)
        }
    }

    /// Returns the number of columns with a recorded floor.
    pub fn floor_count(&self) -> usize {
        self.values.iter().filter(|&&v| v != NO_CAVE).count()
    }

    fn column_index(&self, x: i32, z: i32) -> usize {
        debug_assert!(
            self.region.contains_column(x, z),
            "column ({x}, {z}) outside facet region {:?}",
            self.region
        );
        let size = self.region.size();
        let lx = (x - self.region.min.x) as usize;
        let lz = (z - self.region.min.z) as usize;
        lx * size.z as usize + lz
    }
}
