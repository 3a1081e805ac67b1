//! 3D noise-based cave carving using the Swiss cheese model.
//!
//! Multi-octave simplex noise thresholded into a boolean cave volume.
//! Respects vertical bounds so cavities stay between bedrock and the
//! near-surface layer.

use grotto_facet::{CaveFacet, FacetKind, FacetProvider, FacetSet, PipelineError};
use noise::{NoiseFn, Simplex};

/// Configuration for 3D noise-based cave carving.
#[derive(Clone, Debug)]
pub struct CaveParams {
    /// World seed for deterministic cave generation.
    pub seed: u64,
    /// Noise threshold. Voxels where `noise_value <= threshold` become cave.
    /// Lower thresholds produce fewer, smaller caves. Typical range: -0.3 to 0.0.
    /// Default: -0.15.
    pub threshold: f64,
    /// Number of noise octaves. More octaves create more detailed cave shapes.
    /// Default: 3.
    pub octaves: u32,
    /// Base frequency of the cave noise. Controls the spatial scale of cave
    /// tunnels. Higher frequency = narrower, more frequent tunnels.
    /// Default: 0.02.
    pub frequency: f64,
    /// Lacunarity (frequency multiplier per octave). Default: 2.0.
    pub lacunarity: f64,
    /// Persistence (amplitude multiplier per octave). Default: 0.5.
    pub persistence: f64,
    /// Lowest y-coordinate where caves may exist. Default: -256.
    pub floor_y: i32,
    /// Highest y-coordinate where caves may exist. Caves are suppressed above
    /// this to keep the surface intact. Default: 64.
    pub ceiling_y: i32,
    /// Vertical distance over which cavities pinch closed as they approach
    /// `floor_y` or `ceiling_y`, in voxels. 0 disables the taper. Default: 4.
    pub edge_taper: i32,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            seed: 0,
            threshold: -0.15,
            octaves: 3,
            frequency: 0.02,
            lacunarity: 2.0,
            persistence: 0.5,
            floor_y: -256,
            ceiling_y: 64,
            edge_taper: 4,
        }
    }
}

/// Carves cave systems into a voxel volume using 3D simplex noise.
pub struct CaveGenerator {
    noise: Simplex,
    params: CaveParams,
}

impl CaveGenerator {
    /// Create a new cave generator with the given parameters.
    pub fn new(params: CaveParams) -> Self {
        // Use a seed offset to decorrelate cave noise from other stages
        // driven by the same world seed.
        let noise = Simplex::new(params.seed.wrapping_add(0xCAFE_BABE) as u32);
        Self { noise, params }
    }

    /// Returns the cave parameters.
    pub fn params(&self) -> &CaveParams {
        &self.params
    }

    /// Determine if the voxel at `(x, y, z)` is inside a cave.
    pub fn is_cave(&self, x: i32, y: i32, z: i32) -> bool {
        if y < self.params.floor_y || y > self.params.ceiling_y {
            return false;
        }

        let mut noise_val = self.sample_cave_noise(x as f64, y as f64, z as f64);

        // Near the vertical bounds, bias the sample upward so cavities pinch
        // closed instead of being sliced flat at floor_y / ceiling_y.
        if self.params.edge_taper > 0 {
            let bound_distance = (y - self.params.floor_y).min(self.params.ceiling_y - y);
            if bound_distance < self.params.edge_taper {
                noise_val += 1.0 - bound_distance as f64 / self.params.edge_taper as f64;
            }
        }

        noise_val <= self.params.threshold
    }

    /// Sample multi-octave 3D cave noise, normalized to [-1, 1].
    fn sample_cave_noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = self.params.frequency;
        let mut amplitude = 1.0;
        let mut max_amplitude = 0.0;

        for _ in 0..self.params.octaves {
            let val = self.noise.get([x * frequency, y * frequency, z * frequency]);
            total += val * amplitude;
            max_amplitude += amplitude;

            frequency *= self.params.lacunarity;
            amplitude *= self.params.persistence;
        }

        total / max_amplitude
    }
}

/// Facet provider that fills a region's [`CaveFacet`] from a [`CaveGenerator`].
pub struct CaveProvider {
    generator: CaveGenerator,
}

impl CaveProvider {
    /// Create a provider around an existing generator.
    pub fn new(generator: CaveGenerator) -> Self {
        Self { generator }
    }
}

impl FacetProvider for CaveProvider {
    fn name(&self) -> &str {
        "cave"
    }

    fn produces(&self) -> FacetKind {
        FacetKind::Cave
    }

    fn requires(&self) -> &[FacetKind] {
        &[]
    }

    fn process(&self, facets: &mut FacetSet) -> Result<(), PipelineError> {
        let region = facets.region();
        let mut facet = CaveFacet::new(region);
        for (x, z) in region.columns() {
            for y in region.ys_descending() {
                if self.generator.is_cave(x, y, z) {
                    facet.set_world(x, y, z, true);
                }
            }
        }
        facets.insert_cave(facet);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;
    use grotto_region::Region3;

    fn default_generator() -> CaveGenerator {
        CaveGenerator::new(CaveParams {
            seed: 42,
            ..Default::default()
        })
    }

    #[test]
    fn test_carves_some_cave_voxels() {
        let carver = default_generator();
        let mut found_cave = false;
        for i in 0..5000 {
            let x = i % 50;
            let z = i / 50;
            if carver.is_cave(x, -40, z) {
                found_cave = true;
                break;
            }
        }
        assert!(found_cave, "Should find cave voxels in 5000 samples");
    }

    #[test]
    fn test_leaves_some_voxels_solid() {
        let carver = default_generator();
        let mut found_solid = false;
        for i in 0..5000 {
            let x = i % 50;
            let z = i / 50;
            if !carver.is_cave(x, -40, z) {
                found_solid = true;
                break;
            }
        }
        assert!(found_solid, "Should find solid (non-cave) voxels");
    }

    #[test]
    fn test_no_caves_outside_vertical_bounds() {
        let carver = CaveGenerator::new(CaveParams {
            seed: 42,
            threshold: 1.0, // carve everything the bounds allow
            ..Default::default()
        });

        for i in 0..200 {
            let above = carver.params().ceiling_y + 1 + i;
            let below = carver.params().floor_y - 1 - i;
            assert!(
                !carver.is_cave(i, above, -i),
                "No caves above ceiling_y (y={above})"
            );
            assert!(
                !carver.is_cave(i, below, -i),
                "No caves below floor_y (y={below})"
            );
        }
    }

    #[test]
    fn test_cavities_pinch_closed_at_bounds() {
        let carver = CaveGenerator::new(CaveParams {
            seed: 42,
            threshold: -0.05,
            edge_taper: 4,
            ..Default::default()
        });

        // At exactly floor_y / ceiling_y the bias is a full +1.0, which no
        // normalized sample can overcome with a negative threshold.
        for i in 0..500 {
            assert!(
                !carver.is_cave(i, carver.params().floor_y, i * 3),
                "No caves at the exact floor bound"
            );
            assert!(
                !carver.is_cave(i, carver.params().ceiling_y, i * 3),
                "No caves at the exact ceiling bound"
            );
        }
    }

    #[test]
    fn test_deterministic_with_seed() {
        let carver_a = CaveGenerator::new(CaveParams {
            seed: 123,
            ..Default::default()
        });
        let carver_b = CaveGenerator::new(CaveParams {
            seed: 123,
            ..Default::default()
        });

        for i in 0..500 {
            let (x, y, z) = (i * 3, -10 - (i % 100), i * 7);
            assert_eq!(
                carver_a.is_cave(x, y, z),
                carver_b.is_cave(x, y, z),
                "Cave determination must be deterministic at index {i}"
            );
        }
    }

    #[test]
    fn test_different_seeds_differ() {
        let carver_a = CaveGenerator::new(CaveParams {
            seed: 1,
            ..Default::default()
        });
        let carver_b = CaveGenerator::new(CaveParams {
            seed: 9999,
            ..Default::default()
        });

        let mut differences = 0;
        for i in 0..2000 {
            let (x, y, z) = (i, -30 - (i % 60), i * 2);
            if carver_a.is_cave(x, y, z) != carver_b.is_cave(x, y, z) {
                differences += 1;
            }
        }
        assert!(
            differences > 0,
            "Different seeds should carve different caves"
        );
    }

    #[test]
    fn test_density_controllable_via_threshold() {
        let count_caves = |threshold: f64| -> usize {
            let carver = CaveGenerator::new(CaveParams {
                seed: 42,
                threshold,
                ..Default::default()
            });
            let mut count = 0;
            for i in 0..2000 {
                let (x, y, z) = (i, -20 - (i % 80), i * 3);
                if carver.is_cave(x, y, z) {
                    count += 1;
                }
            }
            count
        };

        let sparse = count_caves(-0.5);
        let dense = count_caves(0.2);
        assert!(
            dense > sparse,
            "Higher threshold should carve more: sparse={sparse}, dense={dense}"
        );
    }

    #[test]
    fn test_provider_fills_facet_to_match_generator() {
        let region = Region3::new(IVec3::new(0, -48, 0), IVec3::new(7, -17, 7));
        let provider = CaveProvider::new(default_generator());
        let reference = default_generator();

        let mut facets = FacetSet::new(region);
        provider.process(&mut facets).unwrap();
        let facet = facets.cave().unwrap();

        assert_eq!(facet.region(), region);
        for (x, z) in region.columns() {
            for y in region.ys_descending() {
                assert_eq!(
                    facet.get_world(x, y, z),
                    reference.is_cave(x, y, z),
                    "facet/generator mismatch at ({x}, {y}, {z})"
                );
            }
        }
    }
}
