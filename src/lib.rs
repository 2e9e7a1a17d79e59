pub mod analysis;
pub mod config;
pub mod data;

pub use data::pipeline::{DataMerger, LoadOutcome};
pub use data::{DataError, MergedDistrictRecord};
