use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Apartment price per pyeong in 10,000 KRW, 2024 estimates.
pub const PRICE_PER_PYEONG_2024: [(&str, u64); 25] = [
    ("강남구", 8150),
    ("서초구", 7720),
    ("용산구", 6250),
    ("송파구", 5980),
    ("성동구", 5250),
    ("마포구", 4700),
    ("광진구", 4450),
    ("양천구", 4400),
    ("영등포구", 4150),
    ("강동구", 4100),
    ("동작구", 4000),
    ("중구", 3850),
    ("종로구", 3700),
    ("서대문구", 3500),
    ("동대문구", 3350),
    ("성북구", 3150),
    ("강서구", 3100),
    ("관악구", 3000),
    ("은평구", 2950),
    ("구로구", 2850),
    ("노원구", 2800),
    ("중랑구", 2650),
    ("강북구", 2600),
    ("금천구", 2550),
    ("도봉구", 2450),
];

/// Registered private academies per district, 2023-2024 estimates.
pub const ACADEMY_COUNTS: [(&str, u64); 25] = [
    ("강남구", 2578),
    ("양천구", 1050),
    ("송파구", 1155),
    ("서초구", 1187),
    ("노원구", 739),
    ("강동구", 680),
    ("성북구", 550),
    ("마포구", 520),
    ("강서구", 600),
    ("은평구", 538),
    ("동작구", 450),
    ("영등포구", 430),
    ("서대문구", 370),
    ("광진구", 390),
    ("동대문구", 350),
    ("관악구", 380),
    ("성동구", 320),
    ("구로구", 340),
    ("중랑구", 300),
    ("도봉구", 290),
    ("강북구", 220),
    ("금천구", 200),
    ("용산구", 180),
    ("종로구", 230),
    ("중구", 150),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub region: String,
    pub value: u64,
}

/// Immutable district -> value table. Keeps insertion order, which drives the
/// row order of the merged output.
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    entries: Vec<ReferenceEntry>,
    index: HashMap<String, usize>,
}

impl ReferenceTable {
    /// Region keys are trimmed. A repeated region keeps its first value.
    pub fn new(name: &str, entries: Vec<ReferenceEntry>) -> Self {
        let mut kept = Vec::with_capacity(entries.len());
        let mut index = HashMap::new();
        for entry in entries {
            let region = entry.region.trim().to_string();
            if index.contains_key(&region) {
                log::warn!("{} table: ignoring duplicate region '{}'", name, region);
                continue;
            }
            index.insert(region.clone(), kept.len());
            kept.push(ReferenceEntry {
                region,
                value: entry.value,
            });
        }

        Self {
            entries: kept,
            index,
        }
    }

    pub fn from_pairs(name: &str, pairs: &[(&str, u64)]) -> Self {
        Self::new(
            name,
            pairs
                .iter()
                .map(|&(region, value)| ReferenceEntry {
                    region: region.to_string(),
                    value,
                })
                .collect(),
        )
    }

    pub fn get(&self, region: &str) -> Option<u64> {
        self.index.get(region).map(|&i| self.entries[i].value)
    }

    pub fn contains(&self, region: &str) -> bool {
        self.index.contains_key(region)
    }

    pub fn entries(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ReferenceTables {
    pub price: ReferenceTable,
    pub academy: ReferenceTable,
}

impl ReferenceTables {
    pub fn embedded() -> Self {
        Self {
            price: ReferenceTable::from_pairs("price", &PRICE_PER_PYEONG_2024),
            academy: ReferenceTable::from_pairs("academy_count", &ACADEMY_COUNTS),
        }
    }
}
