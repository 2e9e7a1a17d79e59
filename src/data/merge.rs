use super::brackets::bracket_counts;
use super::pivot::PopulationTable;
use super::reference::ReferenceTables;
use super::{DataError, MergedDistrictRecord, Result, YouthEstimate, YouthRatio};
use crate::config::BracketKeywords;
use std::collections::HashMap;

/// Per-district population figures before the reference joins.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictYouth {
    pub district: String,
    pub estimate: YouthEstimate,
    pub ratio: YouthRatio,
    pub total_pop: u64,
}

pub fn compute_youth(table: &PopulationTable, keywords: &BracketKeywords) -> Result<Vec<DistrictYouth>> {
    let mut out = Vec::with_capacity(table.districts.len());
    for district in &table.districts {
        let counts = bracket_counts(district, &table.age_labels, keywords);
        let estimate = YouthEstimate::from_brackets(&counts);
        if !(estimate.infant.is_finite() && estimate.elementary.is_finite() && estimate.adolescent.is_finite()) {
            return Err(DataError::NonFinite(format!(
                "youth estimate for '{}' is not finite",
                district.district
            )));
        }

        if district.total_pop == 0 {
            log::warn!("District '{}' has zero population, ratios set to NaN", district.district);
        }
        let ratio = YouthRatio::from_estimate(&estimate, district.total_pop);

        out.push(DistrictYouth {
            district: district.district.clone(),
            estimate,
            ratio,
            total_pop: district.total_pop,
        });
    }
    Ok(out)
}

/// Inner join on district name: population x price, then x academy.
/// Rows come out in price table order.
pub fn merge_references(youth: &[DistrictYouth], references: &ReferenceTables) -> Vec<MergedDistrictRecord> {
    let by_district: HashMap<&str, &DistrictYouth> =
        youth.iter().map(|y| (y.district.as_str(), y)).collect();

    let mut merged = Vec::new();
    for entry in references.price.entries() {
        let Some(pop) = by_district.get(entry.region.as_str()) else {
            log::debug!("'{}' has no population row, dropped", entry.region);
            continue;
        };
        let Some(academy_count) = references.academy.get(&entry.region) else {
            log::debug!("'{}' has no academy count, dropped", entry.region);
            continue;
        };

        merged.push(MergedDistrictRecord {
            region: entry.region.clone(),
            price: entry.value,
            academy_count,
            infant: pop.estimate.infant,
            elementary: pop.estimate.elementary,
            adolescent: pop.estimate.adolescent,
            ratio_infant: pop.ratio.ratio_infant,
            ratio_elem: pop.ratio.ratio_elem,
            ratio_adol: pop.ratio.ratio_adol,
            ratio_total_youth: pop.ratio.ratio_total_youth,
            total_pop: pop.total_pop,
        });
    }

    for y in youth {
        if !references.price.contains(&y.district) {
            log::debug!("'{}' has no price reference, dropped", y.district);
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reference::ReferenceTable;

    fn youth(district: &str) -> DistrictYouth {
        let estimate = YouthEstimate {
            infant: 1.0,
            elementary: 2.0,
            adolescent: 3.0,
        };
        DistrictYouth {
            district: district.to_string(),
            estimate,
            ratio: YouthRatio::from_estimate(&estimate, 100),
            total_pop: 100,
        }
    }

    #[test]
    fn test_inner_join_semantics() {
        let pop = vec![youth("서울특별시"), youth("강남구"), youth("서초구"), youth("중구")];
        let references = ReferenceTables {
            price: ReferenceTable::from_pairs("price", &[("중구", 3850), ("강남구", 8150), ("용산구", 6250)]),
            academy: ReferenceTable::from_pairs("academy_count", &[("강남구", 2578), ("서초구", 1187), ("용산구", 180)]),
        };

        let merged = merge_references(&pop, &references);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].region, "강남구");
        assert_eq!(merged[0].price, 8150);
        assert_eq!(merged[0].academy_count, 2578);
        assert_eq!(merged[0].total_pop, 100);
    }

    #[test]
    fn test_order_follows_price_table() {
        let pop = vec![youth("강남구"), youth("중구")];
        let references = ReferenceTables {
            price: ReferenceTable::from_pairs("price", &[("중구", 1), ("강남구", 2)]),
            academy: ReferenceTable::from_pairs("academy_count", &[("강남구", 1), ("중구", 2)]),
        };

        let regions: Vec<_> = merge_references(&pop, &references)
            .into_iter()
            .map(|r| r.region)
            .collect();
        assert_eq!(regions, vec!["중구".to_string(), "강남구".to_string()]);
    }
}
