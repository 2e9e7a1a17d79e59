pub mod correlation;
pub mod summary;
pub mod trend;
