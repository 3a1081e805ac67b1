//! Facet provider pipeline with an explicit produces/requires table.
//!
//! Providers are registered in execution order. The pipeline validates the
//! dependency table once at construction, so a misordered or conflicting
//! stage list fails before any region is generated.

use grotto_region::Region3;

use crate::cave::CaveFacet;
use crate::floor::CaveFloorFacet;

/// Identifies a facet a provider can produce or require.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FacetKind {
    /// Boolean per-voxel cave volume ([`CaveFacet`]).
    Cave,
    /// Per-column cave-floor heights ([`CaveFloorFacet`]).
    CaveFloor,
}

/// Errors from pipeline construction or execution.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Two providers declare the same produced facet.
    #[error("duplicate producer for facet {0:?}")]
    DuplicateProducer(FacetKind),

    /// A provider requires a facet that no earlier provider produces.
    #[error("provider '{provider}' requires facet {missing:?}, which no earlier provider produces")]
    UnsatisfiedRequirement {
        provider: String,
        missing: FacetKind,
    },

    /// A provider read a facet that was not present at execution time.
    #[error("facet {0:?} missing from the facet set")]
    MissingFacet(FacetKind),
}

/// All facets generated for one region.
///
/// Created empty for a region; each provider inserts the facet it produces.
#[derive(Debug)]
pub struct FacetSet {
    region: Region3,
    cave: Option<CaveFacet>,
    cave_floor: Option<CaveFloorFacet>,
}

impl FacetSet {
    /// Creates an empty facet set for `region`.
    pub fn new(region: Region3) -> Self {
        Self {
            region,
            cave: None,
            cave_floor: None,
        }
    }

    /// Returns the region this set belongs to.
    pub fn region(&self) -> Region3 {
        self.region
    }

    /// Returns whether a facet of the given kind has been produced.
    pub fn contains(&self, kind: FacetKind) -> bool {
        match kind {
            FacetKind::Cave => self.cave.is_some(),
            FacetKind::CaveFloor => self.cave_floor.is_some(),
        }
    }

    /// Returns the cave volume facet, if produced.
    pub fn cave(&self) -> Option<&CaveFacet> {
        self.cave.as_ref()
    }

    /// Returns the cave-floor facet, if produced.
    pub fn cave_floor(&self) -> Option<&CaveFloorFacet> {
        self.cave_floor.as_ref()
    }

    /// Stores the cave volume facet. A later insert replaces the earlier one.
    pub fn insert_cave(&mut self, facet: CaveFacet) {
        self.cave = Some(facet);
    }

    /// Stores the cave-floor facet. A later insert replaces the earlier one.
    pub fn insert_cave_floor(&mut self, facet: CaveFloorFacet) {
        self.cave_floor = Some(facet);
    }
}

/// A generation stage: fills one facet of a [`FacetSet`], reading only the
/// facets it declares in [`requires`](FacetProvider::requires).
pub trait FacetProvider: Send + Sync {
    /// Stage name, used in logs and error messages.
    fn name(&self) -> &str;

    /// The facet this provider fills in.
    fn produces(&self) -> FacetKind;

    /// Facets that must already be present when [`process`](FacetProvider::process) runs.
    fn requires(&self) -> &[FacetKind];

    /// Generate this provider's facet and insert it into `facets`.
    fn process(&self, facets: &mut FacetSet) -> Result<(), PipelineError>;
}

/// An ordered list of providers with a validated dependency table.
///
/// Registration order is execution order. Validation checks that no facet
/// has two producers and that every requirement is produced by an earlier
/// provider; there is no reordering or reflection at runtime.
pub struct Pipeline {
    providers: Vec<Box<dyn FacetProvider>>,
}

impl Pipeline {
    /// Builds a pipeline from providers in execution order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::DuplicateProducer`] if two providers produce
    /// the same facet, or [`PipelineError::UnsatisfiedRequirement`] if a
    /// provider's requirement is not produced by an earlier provider.
    pub fn new(providers: Vec<Box<dyn FacetProvider>>) -> Result<Self, PipelineError> {
        let mut produced: Vec<FacetKind> = Vec::with_capacity(providers.len());
        for provider in &providers {
            for &required in provider.requires() {
                if !produced.contains(&required) {
                    return Err(PipelineError::UnsatisfiedRequirement {
                        provider: provider.name().to_string(),
                        missing: required,
                    });
                }
            }
            let kind = provider.produces();
            if produced.contains(&kind) {
                return Err(PipelineError::DuplicateProducer(kind));
            }
            produced.push(kind);
        }
        Ok(Self { providers })
    }

    /// Returns the number of registered providers.
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Runs every provider in order and returns the populated facet set.
    pub fn generate(&self, region: Region3) -> Result<FacetSet, PipelineError> {
        let mut facets = FacetSet::new(region);
        for provider in &self.providers {
            let start = std::time::Instant::now();
            provider.process(&mut facets)?;
            tracing::debug!(
                provider = provider.name(),
                elapsed_us = start.elapsed().as_micros() as u64,
                "facet provider completed"
            );
        }
        Ok(facets)
    }
}
