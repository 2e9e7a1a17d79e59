use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::data::reference::{ReferenceEntry, ReferenceTable, ReferenceTables};

/// Column layout of the population export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub path: PathBuf,
    pub district_column: String,
    pub gender_column: String,
    pub age_column: String,
    pub aggregate_gender: String,
    pub total_label: String,
    /// Year columns to try, most preferred first. Empty means "latest year column".
    pub year_preference: Vec<String>,
    pub bracket_keywords: BracketKeywords,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/population_2023.csv"),
            district_column: "행정구역(시군구)별".to_string(),
            gender_column: "성별".to_string(),
            age_column: "연령별".to_string(),
            aggregate_gender: "계".to_string(),
            total_label: "계".to_string(),
            year_preference: vec!["2024".to_string(), "2023".to_string()],
            bracket_keywords: BracketKeywords::default(),
        }
    }
}

/// Substrings identifying the four 5-year brackets among the age labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BracketKeywords {
    pub age_0_4: String,
    pub age_5_9: String,
    pub age_10_14: String,
    pub age_15_19: String,
}

impl Default for BracketKeywords {
    fn default() -> Self {
        Self {
            age_0_4: "0 - 4세".to_string(),
            age_5_9: "5 - 9세".to_string(),
            age_10_14: "10 - 14세".to_string(),
            age_15_19: "15 - 19세".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub annotate_min_academies: u64,
    pub annotate_min_price: u64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            annotate_min_academies: 500,
            annotate_min_price: 5000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceTablesConfig {
    pub price: Vec<ReferenceEntry>,
    pub academy: Vec<ReferenceEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceSettings,
    pub analysis: AnalysisSettings,
    pub reference_tables: Option<ReferenceTablesConfig>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Reference tables from the config when overridden, the embedded ones otherwise.
    pub fn to_reference_tables(&self) -> ReferenceTables {
        match &self.reference_tables {
            Some(tables) => ReferenceTables {
                price: ReferenceTable::new("price", tables.price.clone()),
                academy: ReferenceTable::new("academy_count", tables.academy.clone()),
            },
            None => ReferenceTables::embedded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
source:
  path: somewhere/pop.csv
  year_preference: ["2023"]
analysis:
  annotate_min_price: 6000
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.source.path, PathBuf::from("somewhere/pop.csv"));
        assert_eq!(config.source.year_preference, vec!["2023".to_string()]);
        assert_eq!(config.source.district_column, "행정구역(시군구)별");
        assert_eq!(config.source.bracket_keywords.age_10_14, "10 - 14세");
        assert_eq!(config.analysis.annotate_min_price, 6000);
        assert_eq!(config.analysis.annotate_min_academies, 500);
        assert!(config.reference_tables.is_none());
    }

    #[test]
    fn test_reference_override() {
        let yaml = r#"
reference_tables:
  price:
    - { region: 강남구, value: 9000 }
  academy:
    - { region: 강남구, value: 10 }
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let tables = config.to_reference_tables();

        assert_eq!(tables.price.len(), 1);
        assert_eq!(tables.price.get("강남구"), Some(9000));
        assert_eq!(tables.academy.get("강남구"), Some(10));
    }

    #[test]
    fn test_default_uses_embedded_tables() {
        let tables = Config::default().to_reference_tables();
        assert_eq!(tables.price.len(), 25);
        assert_eq!(tables.academy.len(), 25);
    }
}
