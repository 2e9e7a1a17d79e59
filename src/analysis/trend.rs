use ndarray::{Array1, ArrayView1};
use serde::Serialize;

/// Least-squares line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trendline {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub n: usize,
}

impl Trendline {
    /// Fits over finite pairs only. None when fewer than two pairs remain or x is constant.
    pub fn fit(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Option<Self> {
        let (xs, ys): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y.iter())
            .filter(|(a, b)| a.is_finite() && b.is_finite())
            .map(|(a, b)| (*a, *b))
            .unzip();
        let n = xs.len();
        if n < 2 {
            return None;
        }

        let x = Array1::from(xs);
        let y = Array1::from(ys);
        let x_mean = x.mean()?;
        let y_mean = y.mean()?;
        let x_centered = &x - x_mean;
        let y_centered = &y - y_mean;

        let sxx = x_centered.dot(&x_centered);
        if sxx == 0.0 {
            return None;
        }
        let slope = x_centered.dot(&y_centered) / sxx;
        let intercept = y_mean - slope * x_mean;

        let residuals = &y - &(&x * slope + intercept);
        let ss_res = residuals.dot(&residuals);
        let ss_tot = y_centered.dot(&y_centered);
        let r_squared = if ss_tot == 0.0 { 1.0 } else { 1.0 - ss_res / ss_tot };

        Some(Self {
            slope,
            intercept,
            r_squared,
            n,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}
