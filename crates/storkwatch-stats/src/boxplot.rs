use crate::{descriptive::DescriptiveStats, percentiles};

/// Summary values needed to draw one box of a box plot.
///
/// Quartiles use linear interpolation. Whiskers extend to the most extreme
/// data points that still lie within 1.5 × IQR of the box; points beyond
/// them are outliers and are not represented here.
///
/// # Examples
///
/// ```
/// use storkwatch_stats::boxplot::BoxPlotStats;
///
/// let stats = BoxPlotStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(stats.q1, 2.0);
/// assert_eq!(stats.median, 3.0);
/// assert_eq!(stats.q3, 4.0);
/// assert_eq!(stats.whisker_low, 1.0);
/// assert_eq!(stats.whisker_high, 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct BoxPlotStats {
    /// First quartile (P25).
    pub q1: f64,
    /// Median (P50).
    pub median: f64,
    /// Third quartile (P75).
    pub q3: f64,
    /// Arithmetic mean, drawn as a marker.
    pub mean: f64,
    /// Lowest data point no further than 1.5 × IQR below `q1`.
    pub whisker_low: f64,
    /// Highest data point no further than 1.5 × IQR above `q3`.
    pub whisker_high: f64,
}

impl BoxPlotStats {
    /// Multiple of the interquartile range that bounds the whiskers.
    pub const WHISKER_IQR_FACTOR: f64 = 1.5;

    /// Computes box-plot statistics from unsorted values.
    ///
    /// Returns `None` if the sample is empty.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes box-plot statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        let stats = DescriptiveStats::from_sorted(sorted_values)?;
        let q1 = percentiles::compute_percentile(sorted_values, 25.0);
        let median = percentiles::compute_percentile(sorted_values, 50.0);
        let q3 = percentiles::compute_percentile(sorted_values, 75.0);
        let reach = Self::WHISKER_IQR_FACTOR * (q3 - q1);

        let whisker_low = sorted_values
            .iter()
            .copied()
            .find(|v| *v >= q1 - reach)
            .unwrap_or(q1);
        let whisker_high = sorted_values
            .iter()
            .rev()
            .copied()
            .find(|v| *v <= q3 + reach)
            .unwrap_or(q3);

        Some(Self {
            q1,
            median,
            q3,
            mean: stats.mean,
            whisker_low,
            whisker_high,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sample() {
        assert!(BoxPlotStats::new([]).is_none());
    }

    #[test]
    fn test_outlier_is_excluded_from_whiskers() {
        let stats = BoxPlotStats::new([1.0, 2.0, 3.0, 4.0, 100.0]).unwrap();
        assert_eq!(stats.q1, 2.0);
        assert_eq!(stats.q3, 4.0);
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 4.0);
        assert_eq!(stats.mean, 22.0);
    }

    #[test]
    fn test_single_value_collapses_box() {
        let stats = BoxPlotStats::new([12.5]).unwrap();
        assert_eq!(stats.q1, 12.5);
        assert_eq!(stats.q3, 12.5);
        assert_eq!(stats.whisker_low, 12.5);
        assert_eq!(stats.whisker_high, 12.5);
    }
}
