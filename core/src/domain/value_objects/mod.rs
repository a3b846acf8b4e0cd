//! Value objects composed at read time.

pub mod enrichment;

pub use enrichment::{ComposedListing, EnrichmentResult, VehicleSnapshot};
