use super::DistrictPopulation;
use crate::config::BracketKeywords;

/// Counts for the four 5-year brackets the estimates are built from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BracketCounts {
    pub age_0_4: f64,
    pub age_5_9: f64,
    pub age_10_14: f64,
    pub age_15_19: f64,
}

/// Returns every label containing `keyword`, in the order of `labels`.
///
/// Whitespace is ignored on both sides, so "0 - 4세" and "0-4세" match the
/// same labels. An empty keyword matches nothing.
pub fn match_bracket_columns(labels: &[String], keyword: &str) -> Vec<String> {
    let needle = strip_whitespace(keyword);
    if needle.is_empty() {
        return Vec::new();
    }
    labels
        .iter()
        .filter(|label| strip_whitespace(label).contains(&needle))
        .cloned()
        .collect()
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Sums the counts of every matching label. No match sums to 0.
pub fn sum_bracket(district: &DistrictPopulation, labels: &[String], keyword: &str) -> f64 {
    match_bracket_columns(labels, keyword)
        .iter()
        .filter_map(|label| district.age_counts.get(label))
        .sum()
}

pub fn bracket_counts(
    district: &DistrictPopulation,
    labels: &[String],
    keywords: &BracketKeywords,
) -> BracketCounts {
    BracketCounts {
        age_0_4: sum_bracket(district, labels, &keywords.age_0_4),
        age_5_9: sum_bracket(district, labels, &keywords.age_5_9),
        age_10_14: sum_bracket(district, labels, &keywords.age_10_14),
        age_15_19: sum_bracket(district, labels, &keywords.age_15_19),
    }
}
