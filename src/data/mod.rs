pub mod apportion;
pub mod brackets;
pub mod cache;
pub mod export;
pub mod loader;
pub mod merge;
pub mod pipeline;
pub mod pivot;
pub mod reference;

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// One row of the long-format population source.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPopulationRecord {
    pub district: String,
    pub gender: String,
    pub age_group: String,
    pub cells: BTreeMap<String, String>, // Other column label -> raw cell, parsed only for the selected year
}

/// A district after pivoting: age label -> count for the selected year.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictPopulation {
    pub district: String,
    pub age_counts: BTreeMap<String, f64>,
    pub total_pop: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YouthEstimate {
    pub infant: f64,     // 0-6
    pub elementary: f64, // 7-12
    pub adolescent: f64, // 13-18
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YouthRatio {
    pub ratio_infant: f64,
    pub ratio_elem: f64,
    pub ratio_adol: f64,
    pub ratio_total_youth: f64,
}

/// The row handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedDistrictRecord {
    pub region: String,
    pub price: u64,
    pub academy_count: u64,
    pub infant: f64,
    pub elementary: f64,
    pub adolescent: f64,
    pub ratio_infant: f64,
    pub ratio_elem: f64,
    pub ratio_adol: f64,
    pub ratio_total_youth: f64,
    pub total_pop: u64,
}

/// Coarse classification used at the dashboard boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SourceUnavailable,
    SchemaMismatch,
    ComputationError,
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("load failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("load failure: CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("schema mismatch: missing required column: {0}")]
    MissingColumn(String),
    #[error("schema mismatch: none of the year columns {0:?} is present")]
    YearColumnNotFound(Vec<String>),
    #[error("schema mismatch: duplicate column '{0}'")]
    DuplicateColumn(String),
    #[error("schema mismatch: duplicate entry for district '{district}', age group '{age_group}'")]
    DuplicateEntry { district: String, age_group: String },
    #[error("schema mismatch: invalid value '{value}' in column '{column}' for district '{district}'")]
    InvalidValue {
        district: String,
        column: String,
        value: String,
    },
    #[error("computation error: {0}")]
    NonFinite(String),
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::Io(_) | DataError::Csv(_) => ErrorKind::SourceUnavailable,
            DataError::MissingColumn(_)
            | DataError::YearColumnNotFound(_)
            | DataError::DuplicateColumn(_)
            | DataError::DuplicateEntry { .. }
            | DataError::InvalidValue { .. } => ErrorKind::SchemaMismatch,
            DataError::NonFinite(_) => ErrorKind::ComputationError,
        }
    }
}

pub type Result<T> = std::result::Result<T, DataError>;
