use super::loader::{parse_count, PopulationSource};
use super::{DataError, DistrictPopulation, RawPopulationRecord, Result};
use crate::config::SourceSettings;
use std::collections::{BTreeMap, HashMap};

/// Districts with their age-label counts for one year. `age_labels` keeps the
/// order in which labels first appear in the source.
#[derive(Debug, Clone)]
pub struct PopulationTable {
    pub year: String,
    pub age_labels: Vec<String>,
    pub districts: Vec<DistrictPopulation>,
}

/// Picks the first preferred year present among the headers. With no
/// preference, the greatest numeric year header wins.
pub fn select_year_column(year_columns: &[String], preference: &[String]) -> Result<String> {
    if preference.is_empty() {
        return year_columns
            .iter()
            .filter_map(|c| c.parse::<i32>().ok().map(|y| (y, c)))
            .max_by_key(|(y, _)| *y)
            .map(|(_, c)| c.clone())
            .ok_or_else(|| DataError::YearColumnNotFound(Vec::new()));
    }

    preference
        .iter()
        .find(|year| year_columns.iter().any(|c| c == *year))
        .cloned()
        .ok_or_else(|| DataError::YearColumnNotFound(preference.to_vec()))
}

/// Only the both-sexes rows survive.
pub fn filter_aggregate<'a>(
    records: &'a [RawPopulationRecord],
    aggregate_gender: &str,
) -> Vec<&'a RawPopulationRecord> {
    records
        .iter()
        .filter(|r| r.gender.trim() == aggregate_gender)
        .collect()
}

/// Pivots the aggregate rows into one entry per district for `year`.
pub fn pivot_population(source: &PopulationSource, settings: &SourceSettings) -> Result<PopulationTable> {
    let year = select_year_column(&source.value_columns, &settings.year_preference)?;
    log::info!("Using population year column '{}'", year);

    let rows = filter_aggregate(&source.records, &settings.aggregate_gender);

    let mut age_labels: Vec<String> = Vec::new();
    let mut order: Vec<String> = Vec::new();
    let mut by_district: HashMap<String, BTreeMap<String, f64>> = HashMap::new();

    for row in rows {
        let district = row.district.trim().to_string();
        let age_group = row.age_group.trim().to_string();

        if !age_labels.contains(&age_group) {
            age_labels.push(age_group.clone());
        }

        let counts = by_district.entry(district.clone()).or_insert_with(|| {
            order.push(district.clone());
            BTreeMap::new()
        });
        if counts.contains_key(&age_group) {
            return Err(DataError::DuplicateEntry {
                district,
                age_group,
            });
        }
        // Blank cells contribute nothing to the bracket sums
        let cell = row.cells.get(&year).map(String::as_str).unwrap_or("");
        let value = parse_count(&district, &year, cell)?.unwrap_or(0.0);
        counts.insert(age_group, value);
    }

    if !age_labels.contains(&settings.total_label) {
        return Err(DataError::MissingColumn(settings.total_label.clone()));
    }

    let mut districts = Vec::with_capacity(order.len());
    for district in order {
        let age_counts = by_district.remove(&district).unwrap_or_default();
        let total_pop = total_population(&district, &age_counts, &settings.total_label)?;
        districts.push(DistrictPopulation {
            district,
            age_counts,
            total_pop,
        });
    }

    log::info!("Pivoted {} districts, {} age groups", districts.len(), age_labels.len());

    Ok(PopulationTable {
        year,
        age_labels,
        districts,
    })
}

fn total_population(district: &str, age_counts: &BTreeMap<String, f64>, total_label: &str) -> Result<u64> {
    let total = match age_counts.get(total_label) {
        Some(&v) => v,
        None => {
            log::warn!("District '{}' has no '{}' row, treating total as 0", district, total_label);
            0.0
        }
    };
    if total < 0.0 || !total.is_finite() {
        return Err(DataError::InvalidValue {
            district: district.to_string(),
            column: total_label.to_string(),
            value: total.to_string(),
        });
    }
    Ok(total.round() as u64)
}
