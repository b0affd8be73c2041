use std::ops::Range;

use serde::Serialize;

/// A fixed-width histogram of a dataset.
///
/// The bins evenly split `[start, end]`. Every bin is half-open except the
/// last one, which also holds values equal to `end` so the maximum is counted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Bins in ascending order.
    pub bins: Vec<HistogramBin>,
    /// Number of values that fell outside `[start, end]` (only possible with an
    /// explicit range).
    pub out_of_range: u64,
}

/// A single histogram bin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin.
    pub range: Range<f64>,
    /// The number of values in this bin.
    pub count: u64,
}

impl Histogram {
    /// Builds a histogram with `num_bins` bins.
    ///
    /// The bounds default to the data's minimum and maximum; pass
    /// `explicit_range` to fix them instead.
    ///
    /// # Examples
    ///
    /// ```
    /// # use cltsim_stats::histogram::Histogram;
    /// let values = [1.0, 2.0, 2.5, 3.0, 4.0];
    /// let histogram = Histogram::new(&values, 3, None);
    /// assert_eq!(histogram.bins.len(), 3);
    /// assert_eq!(histogram.total_count(), 5);
    /// assert_eq!(histogram.bins[2].count, 2); // 3.0 and the maximum 4.0
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(values: &[f64], num_bins: usize, explicit_range: Option<Range<f64>>) -> Self {
        if values.is_empty() || num_bins == 0 {
            return Self {
                bins: vec![],
                out_of_range: 0,
            };
        }

        let Range { start, mut end } = explicit_range.unwrap_or_else(|| {
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            min..max
        });
        if end - start < f64::EPSILON {
            // All values are concentrated at one point
            end = start + 1.0;
        }
        let width = (end - start) / num_bins as f64;

        let mut bins = (0..num_bins)
            .map(|i| HistogramBin {
                // Recompute each edge from `start` to avoid accumulating error
                range: start + i as f64 * width..start + (i + 1) as f64 * width,
                count: 0,
            })
            .collect::<Vec<_>>();
        bins[num_bins - 1].range.end = end;

        let mut histogram = Self {
            bins,
            out_of_range: 0,
        };
        for &value in values {
            match histogram.bin_index(value) {
                Some(idx) => histogram.bins[idx].count += 1,
                None => histogram.out_of_range += 1,
            }
        }
        histogram
    }

    /// Returns the index of the bin containing `value`, if any.
    ///
    /// Used to place markers (such as the population mean) on the histogram.
    ///
    /// ```
    /// # use cltsim_stats::histogram::Histogram;
    /// let histogram = Histogram::new(&[0.0, 10.0], 5, None);
    /// assert_eq!(histogram.bin_index(0.0), Some(0));
    /// assert_eq!(histogram.bin_index(5.0), Some(2));
    /// assert_eq!(histogram.bin_index(10.0), Some(4));
    /// assert_eq!(histogram.bin_index(10.5), None);
    /// ```
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_sign_loss,
        clippy::cast_possible_truncation
    )]
    #[must_use]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let (first, last) = (self.bins.first()?, self.bins.last()?);
        let (start, end) = (first.range.start, last.range.end);
        if !(start..=end).contains(&value) {
            return None;
        }
        // `new` counts through here too, so a marker lands in the counted bin
        let num_bins = self.bins.len();
        let width = (end - start) / num_bins as f64;
        Some((((value - start) / width).floor() as usize).min(num_bins - 1))
    }

    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let histogram = Histogram::new(&[], 10, None);
        assert!(histogram.bins.is_empty());
        assert_eq!(histogram.bin_index(1.0), None);
    }

    #[test]
    fn test_zero_bins() {
        let histogram = Histogram::new(&[1.0, 2.0], 0, None);
        assert!(histogram.bins.is_empty());
    }

    #[test]
    fn test_counts_every_value() {
        let values = (0..1000).map(|i| f64::from(i) * 0.01).collect::<Vec<_>>();
        let histogram = Histogram::new(&values, 7, None);
        assert_eq!(histogram.total_count(), 1000);
        assert_eq!(histogram.out_of_range, 0);
    }

    #[test]
    fn test_bins_are_contiguous() {
        let histogram = Histogram::new(&[1.0, 4.0, 9.0], 4, None);
        for pair in histogram.bins.windows(2) {
            assert!((pair[0].range.end - pair[1].range.start).abs() < 1e-12);
        }
        assert_eq!(histogram.bins[0].range.start, 1.0);
        assert_eq!(histogram.bins[3].range.end, 9.0);
    }

    #[test]
    fn test_single_point_distribution() {
        let histogram = Histogram::new(&[2.0, 2.0, 2.0], 4, None);
        assert_eq!(histogram.total_count(), 3);
        assert_eq!(histogram.bins[0].count, 3);
    }

    #[test]
    fn test_bin_index_matches_counted_bin() {
        let range = 4.3..5.9;
        let num_bins = 30;
        let edges = Histogram::new(&[4.3], num_bins, Some(range.clone()));
        let probes = edges
            .bins
            .iter()
            .flat_map(|bin| {
                let edge = bin.range.start;
                [edge.next_down(), edge, edge.next_up()]
            })
            .chain([range.end.next_down(), range.end]);
        for value in probes {
            let single = Histogram::new(&[value], num_bins, Some(range.clone()));
            match single.bin_index(value) {
                Some(idx) => assert_eq!(single.bins[idx].count, 1, "value {value}"),
                None => assert_eq!(single.out_of_range, 1, "value {value}"),
            }
        }
    }

    #[test]
    fn test_explicit_range_tracks_outliers() {
        let histogram = Histogram::new(&[-1.0, 0.5, 1.5, 3.0], 2, Some(0.0..2.0));
        assert_eq!(histogram.total_count(), 2);
        assert_eq!(histogram.out_of_range, 2);
        assert_eq!(histogram.max_count(), 1);
    }
}
