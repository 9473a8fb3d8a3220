//! Small descriptive statistics over `f64` slices.
//!
//! Callers strip nulls before handing values in; every function returns
//! `None` instead of a NaN when the statistic is undefined.

use std::f64::consts::PI;

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Standard deviation with `ddof = 0`.
pub fn population_std(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(var.sqrt())
}

/// Standard deviation with `ddof = 1`; undefined below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

/// Pearson correlation coefficient of two equally long series.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.is_empty() {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom > 0.0 {
        Some((cov / denom).clamp(-1.0, 1.0))
    } else {
        None
    }
}

/// `n` evenly spaced points over `[start, end]`, endpoints included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// One-dimensional Gaussian kernel density estimate with Scott's bandwidth.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    points: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Returns `None` when the estimate cannot be formed: fewer than two
    /// points or zero spread.
    pub fn new(points: &[f64]) -> Option<Self> {
        let std = sample_std(points)?;
        if std <= 0.0 || !std.is_finite() {
            return None;
        }
        let scott = (points.len() as f64).powf(-0.2);
        Some(Self {
            points: points.to_vec(),
            bandwidth: std * scott,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        let norm = 1.0 / (self.points.len() as f64 * self.bandwidth * (2.0 * PI).sqrt());
        let sum: f64 = self
            .points
            .iter()
            .map(|p| {
                let z = (x - p) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum();
        norm * sum
    }
}

/// Fixed-width histogram over the data range.
///
/// A degenerate range (all values equal) is widened to `value ± 0.5`; the
/// last bin is closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn new(values: &[f64], bins: usize) -> Option<Self> {
        if values.is_empty() || bins == 0 {
            return None;
        }
        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let edges = linspace(lo, hi, bins + 1);
        let width = (hi - lo) / bins as f64;
        let mut counts = vec![0usize; bins];
        for v in values {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Bin heights normalized so the histogram integrates to one.
    pub fn densities(&self) -> Vec<f64> {
        let scale = self.total() as f64 * self.bin_width();
        if scale <= 0.0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts.iter().map(|&c| c as f64 / scale).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_and_median() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
        assert_eq!(median(&[5.0, 1.0, 3.0]), Some(3.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
    }

    #[test]
    fn test_std_variants() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx(population_std(&values).unwrap(), 2.0));
        assert!(approx(sample_std(&values).unwrap(), (32.0f64 / 7.0).sqrt()));
        assert_eq!(sample_std(&[1.0]), None);
        assert_eq!(population_std(&[1.0]), Some(0.0));
    }

    #[test]
    fn test_pearson_perfect_and_degenerate() {
        assert!(approx(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap(), 1.0));
        assert!(approx(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap(), -1.0));
        assert_eq!(pearson(&[1.0, 1.0], &[1.0, 2.0]), None);
        assert_eq!(pearson(&[1.0], &[1.0, 2.0]), None);
    }

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(0.0, 1.0, 5);
        assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
    }

    #[test]
    fn test_kde_requires_spread() {
        assert!(GaussianKde::new(&[1.0]).is_none());
        assert!(GaussianKde::new(&[2.0, 2.0, 2.0]).is_none());

        let kde = GaussianKde::new(&[0.0, 1.0, 2.0]).unwrap();
        assert!(kde.bandwidth() > 0.0);
        // Symmetric sample: density peaks at the centre.
        assert!(kde.evaluate(1.0) > kde.evaluate(0.0));
        assert!(approx(kde.evaluate(0.0), kde.evaluate(2.0)));
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let kde = GaussianKde::new(&[0.5, 1.0, 1.5, 2.0]).unwrap();
        let xs = linspace(-10.0, 12.0, 4001);
        let dx = xs[1] - xs[0];
        let area: f64 = xs.iter().map(|&x| kde.evaluate(x) * dx).sum();
        assert!((area - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_histogram_counts_include_right_edge() {
        let hist = Histogram::new(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.total(), 5);
        assert!(approx(hist.bin_width(), 1.0));
    }

    #[test]
    fn test_histogram_degenerate_range() {
        let hist = Histogram::new(&[3.0, 3.0], 20).unwrap();
        assert!(approx(hist.edges[0], 2.5));
        assert!(approx(*hist.edges.last().unwrap(), 3.5));
        assert_eq!(hist.total(), 2);

        let area: f64 = hist.densities().iter().map(|d| d * hist.bin_width()).sum();
        assert!(approx(area, 1.0));
    }
}
