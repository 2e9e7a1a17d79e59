use crate::config::AnalysisSettings;
use crate::data::MergedDistrictRecord;

/// Rows ordered by price, most expensive first. Ties keep their input order.
pub fn sort_by_price_desc(records: &[MergedDistrictRecord]) -> Vec<&MergedDistrictRecord> {
    let mut sorted: Vec<_> = records.iter().collect();
    sorted.sort_by(|a, b| b.price.cmp(&a.price));
    sorted
}

/// Districts worth labelling on the academy/price scatter.
pub fn notable_districts<'a>(
    records: &'a [MergedDistrictRecord],
    settings: &AnalysisSettings,
) -> Vec<&'a MergedDistrictRecord> {
    records
        .iter()
        .filter(|r| r.academy_count > settings.annotate_min_academies || r.price > settings.annotate_min_price)
        .collect()
}

pub fn format_ratio(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}%", value)
    } else {
        "n/a".to_string()
    }
}

/// Renders the summary table shown next to the charts.
pub fn render_table(records: &[MergedDistrictRecord]) -> String {
    let mut out = format!(
        "{:<10} {:>12} {:>10} {:>10} {:>10} {:>10}\n",
        "region", "price", "academies", "infant", "elem", "adol"
    );
    out.push_str(&format!("{:-<67}\n", ""));
    for r in sort_by_price_desc(records) {
        out.push_str(&format!(
            "{:<10} {:>9} 만원 {:>8} 개 {:>10} {:>10} {:>10}\n",
            r.region,
            r.price,
            r.academy_count,
            format_ratio(r.ratio_infant),
            format_ratio(r.ratio_elem),
            format_ratio(r.ratio_adol),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(region: &str, price: u64, academy: u64) -> MergedDistrictRecord {
        MergedDistrictRecord {
            region: region.to_string(),
            price,
            academy_count: academy,
            infant: 0.0,
            elementary: 0.0,
            adolescent: 0.0,
            ratio_infant: 1.234,
            ratio_elem: f64::NAN,
            ratio_adol: 3.0,
            ratio_total_youth: f64::NAN,
            total_pop: 0,
        }
    }

    #[test]
    fn test_sort_by_price() {
        let records = vec![record("중구", 3850, 150), record("강남구", 8150, 2578), record("도봉구", 2450, 290)];
        let regions: Vec<_> = sort_by_price_desc(&records).iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["강남구", "중구", "도봉구"]);
    }

    #[test]
    fn test_notable_thresholds_are_exclusive() {
        let records = vec![
            record("a", 5000, 500),
            record("b", 5001, 0),
            record("c", 0, 501),
        ];
        let notable: Vec<_> = notable_districts(&records, &AnalysisSettings::default())
            .iter()
            .map(|r| r.region.as_str())
            .collect();
        assert_eq!(notable, vec!["b", "c"]);
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&[record("강남구", 8150, 2578)]);
        let row = table.lines().nth(2).unwrap();

        assert!(row.contains("8150 만원"));
        assert!(row.contains("1.23%"));
        assert!(row.contains("n/a"));
    }
}
