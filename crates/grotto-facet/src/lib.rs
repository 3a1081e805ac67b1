//! Facet containers and the provider pipeline.
//!
//! A facet is a named, typed slice of generated data covering one region:
//! the boolean cave volume, the per-column cave-floor heights. Providers
//! declare which facet they produce and which facets they require, and a
//! [`Pipeline`] validates those declarations up front and runs the providers
//! in order for each region.

mod cave;
mod floor;
mod pipeline;

pub use cave::CaveFacet;
pub use floor::{CaveFloorFacet, NO_CAVE};
pub use pipeline::{FacetKind, FacetProvider, FacetSet, Pipeline, PipelineError};
