//! Vehicle records served to the listing service's enrichment lookups

mod service;

pub use service::VehicleService;
