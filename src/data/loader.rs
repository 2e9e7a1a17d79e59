use super::{DataError, RawPopulationRecord, Result};
use crate::config::SourceSettings;
use csv::ReaderBuilder;
use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;

/// Parsed population export: header labels in file order plus the raw rows.
/// `value_columns` are every header other than the three key columns; only the
/// selected year among them is ever parsed as a count.
#[derive(Debug, Clone)]
pub struct PopulationSource {
    pub headers: Vec<String>,
    pub value_columns: Vec<String>,
    pub records: Vec<RawPopulationRecord>,
}

pub struct PopulationLoader;

impl PopulationLoader {
    fn verify_unique_columns(headers: &[String]) -> Result<()> {
        let mut seen = HashSet::new();
        for header in headers {
            if !seen.insert(header.as_str()) {
                return Err(DataError::DuplicateColumn(header.clone()));
            }
        }
        Ok(())
    }

    fn required_column(headers: &[String], name: &str) -> Result<usize> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn(name.to_string()))
    }

    pub fn load<P: AsRef<Path>>(path: P, settings: &SourceSettings) -> Result<PopulationSource> {
        log::info!("Loading population data from {}", path.as_ref().display());
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)?;
        Self::read(rdr, settings)
    }

    pub fn from_reader<R: Read>(reader: R, settings: &SourceSettings) -> Result<PopulationSource> {
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::read(rdr, settings)
    }

    fn read<R: Read>(mut rdr: csv::Reader<R>, settings: &SourceSettings) -> Result<PopulationSource> {
        // Spreadsheet exports often carry a UTF-8 byte order mark on the first header
        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .map(|s| s.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let district_idx = Self::required_column(&headers, &settings.district_column)?;
        let gender_idx = Self::required_column(&headers, &settings.gender_column)?;
        let age_idx = Self::required_column(&headers, &settings.age_column)?;
        Self::verify_unique_columns(&headers)?;

        let value_columns: Vec<(usize, String)> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| ![district_idx, gender_idx, age_idx].contains(i))
            .map(|(i, h)| (i, h.clone()))
            .collect();

        let mut records = Vec::new();
        for result in rdr.records() {
            let row = result?;
            let field = |i: usize| row.get(i).unwrap_or("").to_string();
            let district = field(district_idx);
            if district.is_empty() && row.iter().all(|f| f.is_empty()) {
                continue;
            }

            let cells = value_columns
                .iter()
                .map(|(i, column)| (column.clone(), field(*i)))
                .collect::<BTreeMap<_, _>>();

            records.push(RawPopulationRecord {
                district,
                gender: field(gender_idx),
                age_group: field(age_idx),
                cells,
            });
        }

        log::debug!(
            "Read {} population rows with value columns {:?}",
            records.len(),
            value_columns.iter().map(|(_, c)| c).collect::<Vec<_>>()
        );

        Ok(PopulationSource {
            headers,
            value_columns: value_columns.into_iter().map(|(_, c)| c).collect(),
            records,
        })
    }
}

/// Parses one count cell. Thousands separators are accepted; blank cells and
/// the statistical "-" placeholder mean "no value".
pub fn parse_count(district: &str, column: &str, raw: &str) -> Result<Option<f64>> {
    let cleaned: String = raw.trim().chars().filter(|&c| c != ',').collect();
    if cleaned.is_empty() || cleaned == "-" {
        return Ok(None);
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(DataError::InvalidValue {
            district: district.to_string(),
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}
