use super::brackets::BracketCounts;
use super::{YouthEstimate, YouthRatio};

// Share of each 5-year bracket attributed to the school-age groups. These are
// fixed heuristics (single-year ages are not published) and are not normalized.
pub const INFANT_FROM_5_9: f64 = 0.4;
pub const ELEMENTARY_FROM_5_9: f64 = 0.6;
pub const ELEMENTARY_FROM_10_14: f64 = 0.6;
pub const ADOLESCENT_FROM_10_14: f64 = 0.4;
pub const ADOLESCENT_FROM_15_19: f64 = 0.8;

impl YouthEstimate {
    pub fn from_brackets(b: &BracketCounts) -> Self {
        Self {
            infant: b.age_0_4 + b.age_5_9 * INFANT_FROM_5_9,
            elementary: b.age_5_9 * ELEMENTARY_FROM_5_9 + b.age_10_14 * ELEMENTARY_FROM_10_14,
            adolescent: b.age_10_14 * ADOLESCENT_FROM_10_14 + b.age_15_19 * ADOLESCENT_FROM_15_19,
        }
    }
}

impl YouthRatio {
    /// Percentages of `total_pop`. A zero population yields NaN for every
    /// ratio rather than an infinity.
    pub fn from_estimate(estimate: &YouthEstimate, total_pop: u64) -> Self {
        if total_pop == 0 {
            return Self {
                ratio_infant: f64::NAN,
                ratio_elem: f64::NAN,
                ratio_adol: f64::NAN,
                ratio_total_youth: f64::NAN,
            };
        }

        let total = total_pop as f64;
        let ratio_infant = estimate.infant / total * 100.0;
        let ratio_elem = estimate.elementary / total * 100.0;
        let ratio_adol = estimate.adolescent / total * 100.0;
        Self {
            ratio_infant,
            ratio_elem,
            ratio_adol,
            ratio_total_youth: ratio_infant + ratio_elem + ratio_adol,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.ratio_infant.is_finite()
            && self.ratio_elem.is_finite()
            && self.ratio_adol.is_finite()
            && self.ratio_total_youth.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_estimate_weights() {
        let counts = BracketCounts {
            age_0_4: 10000.0,
            age_5_9: 10000.0,
            age_10_14: 10000.0,
            age_15_19: 10000.0,
        };
        let est = YouthEstimate::from_brackets(&counts);

        assert_relative_eq!(est.infant, 14000.0, epsilon = 1e-9);
        assert_relative_eq!(est.elementary, 12000.0, epsilon = 1e-9);
        assert_relative_eq!(est.adolescent, 12000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_estimates_are_not_normalized() {
        let counts = BracketCounts {
            age_0_4: 0.0,
            age_5_9: 100.0,
            age_10_14: 100.0,
            age_15_19: 100.0,
        };
        let est = YouthEstimate::from_brackets(&counts);
        // 40 + 120 + 120, not the 300 in the brackets
        assert_relative_eq!(est.infant + est.elementary + est.adolescent, 280.0, epsilon = 1e-9);
    }

    #[test]
    fn test_ratio_sum() {
        let est = YouthEstimate {
            infant: 1234.5,
            elementary: 2222.2,
            adolescent: 3100.9,
        };
        let ratio = YouthRatio::from_estimate(&est, 98765);

        assert_relative_eq!(
            ratio.ratio_infant + ratio.ratio_elem + ratio.ratio_adol,
            ratio.ratio_total_youth,
            epsilon = 1e-12
        );
        assert!(ratio.is_finite());
    }

    #[test]
    fn test_zero_population_is_nan() {
        let est = YouthEstimate {
            infant: 10.0,
            elementary: 0.0,
            adolescent: 5.0,
        };
        let ratio = YouthRatio::from_estimate(&est, 0);

        assert!(ratio.ratio_infant.is_nan());
        assert!(ratio.ratio_elem.is_nan());
        assert!(ratio.ratio_total_youth.is_nan());
        assert!(!ratio.is_finite());
    }
}
