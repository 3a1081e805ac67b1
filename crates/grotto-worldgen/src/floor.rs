//! Cave-floor extraction.
//!
//! Scans each column of the cave volume from the top down and records the
//! y-coordinate one above the first solid voxel found beneath open cave
//! space. Columns without a determinable floor keep the
//! [`NO_CAVE`](grotto_facet::NO_CAVE) sentinel, including columns whose
//! cavity continues below the region (those floors belong to the region
//! beneath).

use grotto_facet::{CaveFloorFacet, FacetKind, FacetProvider, FacetSet, PipelineError};

/// Configuration for the cave-floor stage.
#[derive(Clone, Debug)]
pub struct FloorParams {
    /// Floor coverage knob in the range 0.0 to 1.0, surfaced to the host
    /// configuration UI. Stored on the stage; the scan does not consult it.
    pub density: f32,
}

impl Default for FloorParams {
    fn default() -> Self {
        Self { density: 0.15 }
    }
}

/// Facet provider that derives a [`CaveFloorFacet`] from the cave volume.
pub struct CaveFloorProvider {
    params: FloorParams,
}

impl CaveFloorProvider {
    /// Create the floor stage with the given parameters.
    pub fn new(params: FloorParams) -> Self {
        Self { params }
    }

    /// Returns the stage parameters.
    pub fn params(&self) -> &FloorParams {
        &self.params
    }
}

impl FacetProvider for CaveFloorProvider {
    fn name(&self) -> &str {
        "cave_floor"
    }

    fn produces(&self) -> FacetKind {
        FacetKind::CaveFloor
    }

    fn requires(&self) -> &[FacetKind] {
        &[FacetKind::Cave]
    }

    fn process(&self, facets: &mut FacetSet) -> Result<(), PipelineError> {
        let region = facets.region();
        let cave = facets
            .cave()
            .ok_or(PipelineError::MissingFacet(FacetKind::Cave))?;
        let mut floor = CaveFloorFacet::new(region);

        for (x, z) in region.columns() {
            // The first open voxel from the top may be the cavity ceiling;
            // the floor is the first solid voxel after the scan has been
            // inside a cave.
            let mut found_cave = false;
            for y in region.ys_descending() {
                let open = cave.get_world(x, y, z);
                if !found_cave && open {
                    found_cave = true;
                } else if found_cave && !open {
                    floor.set_world(x, z, (y + 1) as f32);
                    break;
                }
            }
            // Columns that exhaust the descent keep the NO_CAVE fill: either
            // no cave intersects them, or the cavity continues below min.y
            // and the region beneath records the floor.
        }

        facets.insert_cave_floor(floor);
        Ok(())
    }
}
