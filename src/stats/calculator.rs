//! Statistics Calculator Module
//! Correlation and histogram binning used by the chart selector.

use statrs::statistics::Statistics;

/// Equal-width histogram: `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.last()) {
            (Some(first), Some(last)) if !self.counts.is_empty() => {
                (last - first) / self.counts.len() as f64
            }
            _ => 0.0,
        }
    }

    /// Bin centers paired with their counts.
    pub fn bars(&self) -> Vec<(f64, usize)> {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| ((edge[0] + edge[1]) / 2.0, count))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Handles the numeric summaries behind chart interpretations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Keep only the pairs where both sides are present and finite.
    pub fn complete_pairs(x: &[Option<f64>], y: &[Option<f64>]) -> (Vec<f64>, Vec<f64>) {
        x.iter()
            .zip(y.iter())
            .filter_map(|pair| match pair {
                (Some(a), Some(b)) if a.is_finite() && b.is_finite() => Some((*a, *b)),
                _ => None,
            })
            .unzip()
    }

    /// Pearson correlation over the pairwise-complete values.
    ///
    /// Fewer than two pairs or a constant series yields NaN.
    pub fn pearson_correlation(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
        let (xs, ys) = Self::complete_pairs(x, y);
        if xs.len() < 2 {
            return f64::NAN;
        }

        let covariance = xs.iter().covariance(ys.iter());
        let denom = xs.iter().std_dev() * ys.iter().std_dev();
        if denom == 0.0 {
            return f64::NAN;
        }
        covariance / denom
    }

    /// Bin values into `bins` equal-width bins spanning their range.
    ///
    /// The last bin is closed on the right. A degenerate range `[v, v]` is
    /// widened to `[v - 0.5, v + 0.5]`; an empty input spans `[0, 1]`.
    pub fn histogram(values: &[f64], bins: usize) -> Histogram {
        let bins = bins.max(1);
        let (mut lo, mut hi) = values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        if values.is_empty() {
            lo = 0.0;
            hi = 1.0;
        } else if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Histogram { edges, counts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn correlation_of_perfect_linear_relation_is_one() {
        let x: Vec<Option<f64>> = (0..10).map(|i| Some(i as f64)).collect();
        let y: Vec<Option<f64>> = (0..10).map(|i| Some(3.0 * i as f64 - 2.0)).collect();
        assert_relative_eq!(StatsCalculator::pearson_correlation(&x, &y), 1.0, epsilon = 1e-12);

        let neg: Vec<Option<f64>> = (0..10).map(|i| Some(-(i as f64))).collect();
        assert_relative_eq!(StatsCalculator::pearson_correlation(&x, &neg), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn correlation_excludes_missing_pairwise() {
        let x = [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0)];
        let y = [Some(2.0), Some(1.0), Some(100.0), None, Some(7.0)];
        // Complete pairs: (1,2) (2,1) (5,7)
        let xs = [1.0, 2.0, 5.0];
        let ys = [2.0, 1.0, 7.0];
        let mx = 8.0 / 3.0;
        let my = 10.0 / 3.0;
        let sxy: f64 = xs.iter().zip(ys.iter()).map(|(a, b)| (a - mx) * (b - my)).sum();
        let sxx: f64 = xs.iter().map(|a| (a - mx).powi(2)).sum();
        let syy: f64 = ys.iter().map(|b| (b - my).powi(2)).sum();
        let expected = sxy / (sxx * syy).sqrt();

        assert_relative_eq!(
            StatsCalculator::pearson_correlation(&x, &y),
            expected,
            epsilon = 1e-12
        );
    }

    #[test]
    fn correlation_is_nan_for_degenerate_input() {
        assert!(StatsCalculator::pearson_correlation(&[Some(1.0)], &[Some(2.0)]).is_nan());
        let constant = [Some(1.0), Some(1.0), Some(1.0)];
        let varying = [Some(1.0), Some(2.0), Some(3.0)];
        assert!(StatsCalculator::pearson_correlation(&constant, &varying).is_nan());
    }

    #[test]
    fn histogram_spans_range_with_equal_width_bins() {
        let values: Vec<f64> = (0..=100).map(|v| v as f64).collect();
        let hist = StatsCalculator::histogram(&values, 20);

        assert_eq!(hist.counts.len(), 20);
        assert_eq!(hist.edges.len(), 21);
        assert_relative_eq!(hist.edges[0], 0.0);
        assert_relative_eq!(hist.edges[20], 100.0);
        assert_relative_eq!(hist.bin_width(), 5.0);
        assert_eq!(hist.total(), 101);
        // Maximum lands in the last, right-closed bin.
        assert_eq!(hist.counts[19], 6);
        assert_eq!(hist.counts[0], 5);
    }

    #[test]
    fn histogram_widens_constant_range() {
        let hist = StatsCalculator::histogram(&[2.0, 2.0, 2.0], 20);
        assert_relative_eq!(hist.edges[0], 1.5, epsilon = 1e-12);
        assert_relative_eq!(hist.edges[20], 2.5, epsilon = 1e-12);
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.counts.iter().filter(|&&c| c > 0).count(), 1);
    }

    #[test]
    fn histogram_bars_are_bin_centers() {
        let hist = StatsCalculator::histogram(&[0.0, 10.0], 2);
        assert_eq!(hist.bars(), vec![(2.5, 1), (7.5, 1)]);
    }
}
