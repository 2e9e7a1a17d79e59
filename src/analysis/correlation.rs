use crate::data::MergedDistrictRecord;
use ndarray::{Array1, ArrayView1};
use serde::Serialize;

/// Pearson correlation over the pairs where both values are finite.
/// Fewer than two pairs, or a constant series, gives NaN.
pub fn pearson(x: ArrayView1<f64>, y: ArrayView1<f64>) -> f64 {
    let (xs, ys): (Vec<f64>, Vec<f64>) = x
        .iter()
        .zip(y.iter())
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .unzip();
    if xs.len() < 2 {
        return f64::NAN;
    }

    let x = Array1::from(xs);
    let y = Array1::from(ys);
    let x_centered = &x - x.mean().unwrap_or(0.0);
    let y_centered = &y - y.mean().unwrap_or(0.0);

    let cov = x_centered.dot(&y_centered);
    let denom = (x_centered.dot(&x_centered) * y_centered.dot(&y_centered)).sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    cov / denom
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgeGroup {
    Infant,
    Elementary,
    Adolescent,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [AgeGroup::Infant, AgeGroup::Elementary, AgeGroup::Adolescent];

    pub fn label(&self) -> &'static str {
        match self {
            AgeGroup::Infant => "영유아 (0~6세)",
            AgeGroup::Elementary => "초등학생 (7~12세)",
            AgeGroup::Adolescent => "중고등학생 (13~18세)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AgeGroup::Infant => "보육 중심",
            AgeGroup::Elementary => "학군 형성기",
            AgeGroup::Adolescent => "본격 입시 학군",
        }
    }

    pub fn ratio(&self, record: &MergedDistrictRecord) -> f64 {
        match self {
            AgeGroup::Infant => record.ratio_infant,
            AgeGroup::Elementary => record.ratio_elem,
            AgeGroup::Adolescent => record.ratio_adol,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceCorrelations {
    pub by_age_group: Vec<(AgeGroup, f64)>,
    pub academy: f64,
}

impl PriceCorrelations {
    pub fn compute(records: &[MergedDistrictRecord]) -> Self {
        let price: Array1<f64> = records.iter().map(|r| r.price as f64).collect();

        let by_age_group = AgeGroup::ALL
            .iter()
            .map(|group| {
                let ratios: Array1<f64> = records.iter().map(|r| group.ratio(r)).collect();
                (*group, pearson(ratios.view(), price.view()))
            })
            .collect();

        let academies: Array1<f64> = records.iter().map(|r| r.academy_count as f64).collect();

        Self {
            by_age_group,
            academy: pearson(academies.view(), price.view()),
        }
    }

    pub fn get(&self, group: AgeGroup) -> f64 {
        self.by_age_group
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, c)| *c)
            .unwrap_or(f64::NAN)
    }

    /// Age group most positively correlated with price; NaN entries are skipped
    /// and the first group wins ties.
    pub fn strongest(&self) -> Option<(AgeGroup, f64)> {
        self.by_age_group
            .iter()
            .filter(|(_, c)| !c.is_nan())
            .fold(None, |best: Option<(AgeGroup, f64)>, &(g, c)| match best {
                Some((_, b)) if b >= c => best,
                _ => Some((g, c)),
            })
    }
}
