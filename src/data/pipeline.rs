use super::loader::{PopulationLoader, PopulationSource};
use super::merge::{compute_youth, merge_references};
use super::pivot::pivot_population;
use super::reference::ReferenceTables;
use super::{ErrorKind, MergedDistrictRecord, Result};
use crate::config::{Config, SourceSettings};
use std::io::Read;

/// Result as seen by the presentation layer: never an error, possibly empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadOutcome {
    pub records: Vec<MergedDistrictRecord>,
    pub diagnostic: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl LoadOutcome {
    pub fn from_result(result: Result<Vec<MergedDistrictRecord>>) -> Self {
        match result {
            Ok(records) => Self {
                records,
                diagnostic: None,
                error_kind: None,
            },
            Err(e) => {
                log::error!("Data processing failed: {}", e);
                Self {
                    records: Vec::new(),
                    diagnostic: Some(format!("데이터 처리 중 오류 발생: {}", e)),
                    error_kind: Some(e.kind()),
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Population export + reference tables -> one row per district.
#[derive(Debug, Clone)]
pub struct DataMerger {
    settings: SourceSettings,
    references: ReferenceTables,
}

impl DataMerger {
    pub fn new(settings: SourceSettings, references: ReferenceTables) -> Self {
        Self {
            settings,
            references,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.source.clone(), config.to_reference_tables())
    }

    pub fn settings(&self) -> &SourceSettings {
        &self.settings
    }

    /// Loads the configured source file and runs the full merge.
    pub fn load_and_process(&self) -> Result<Vec<MergedDistrictRecord>> {
        let source = PopulationLoader::load(&self.settings.path, &self.settings)?;
        self.process_source(&source)
    }

    pub fn process_reader<R: Read>(&self, reader: R) -> Result<Vec<MergedDistrictRecord>> {
        let source = PopulationLoader::from_reader(reader, &self.settings)?;
        self.process_source(&source)
    }

    pub fn process_source(&self, source: &PopulationSource) -> Result<Vec<MergedDistrictRecord>> {
        let table = pivot_population(source, &self.settings)?;
        let youth = compute_youth(&table, &self.settings.bracket_keywords)?;
        let merged = merge_references(&youth, &self.references);

        log::info!(
            "Merged {} of {} districts with price ({}) and academy ({}) references",
            merged.len(),
            youth.len(),
            self.references.price.len(),
            self.references.academy.len()
        );
        Ok(merged)
    }

    /// Failures become an empty outcome carrying the diagnostic.
    pub fn load_or_empty(&self) -> LoadOutcome {
        LoadOutcome::from_result(self.load_and_process())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataError;

    #[test]
    fn test_failure_degrades_to_empty() {
        let outcome = LoadOutcome::from_result(Err(DataError::MissingColumn("연령별".to_string())));

        assert!(outcome.is_empty());
        assert_eq!(outcome.error_kind, Some(ErrorKind::SchemaMismatch));
        let message = outcome.diagnostic.unwrap();
        assert!(message.contains("schema mismatch"));
        assert!(message.contains("연령별"));
    }

    #[test]
    fn test_missing_source_file() {
        let settings = SourceSettings {
            path: "no/such/population.csv".into(),
            ..SourceSettings::default()
        };
        let merger = DataMerger::new(settings, ReferenceTables::embedded());
        let outcome = merger.load_or_empty();

        assert!(outcome.is_empty());
        assert_eq!(outcome.error_kind, Some(ErrorKind::SourceUnavailable));
    }
}
