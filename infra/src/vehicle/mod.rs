//! Vehicle service client used for listing enrichment

pub mod http_source;


pub use http_source::HttpVehicleSource;
