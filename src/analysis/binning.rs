use crate::data::model::CleanDataset;

/// Bin count used by the heat map.
pub const DEFAULT_BIN_COUNT: usize = 10;

/// Fewest significant digits used when printing bin edges.
const LABEL_PRECISION: i32 = 3;

/// Upper limit when raising the precision to keep labels distinct.
const MAX_LABEL_PRECISION: i32 = 20;

// ---------------------------------------------------------------------------
// Bins – equal-width, right-closed intervals
// ---------------------------------------------------------------------------

/// `n` equal-width intervals `(e[i], e[i+1]]` over the observed range.
///
/// The lowest interval also contains its left edge, and that edge sits 0.1 %
/// of the range below the minimum so the minimum lands strictly inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bins {
    edges: Vec<f64>,
}

impl Bins {
    /// Partition the span of `values` into `count` bins. NaNs are ignored.
    ///
    /// Returns `None` when there are no values or `count` is zero.
    pub fn equal_width<I>(values: I, count: usize) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        if count == 0 {
            return None;
        }
        let (mut min, mut max) = values
            .into_iter()
            .filter(|v| !v.is_nan())
            .fold(None, |acc: Option<(f64, f64)>, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })?;

        if min == max {
            let widen = |v: f64| if v != 0.0 { v.abs() * 0.001 } else { 0.001 };
            min -= widen(min);
            max += widen(max);
            Some(Bins {
                edges: linspace(min, max, count + 1),
            })
        } else {
            let mut edges = linspace(min, max, count + 1);
            edges[0] -= (max - min) * 0.001;
            Some(Bins { edges })
        }
    }

    /// Number of bins.
    pub fn len(&self) -> usize {
        self.edges.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `len() + 1` bin edges, ascending.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Index of the bin containing `value`, or `None` if it falls outside.
    pub fn index_of(&self, value: f64) -> Option<usize> {
        let first = *self.edges.first()?;
        let last = *self.edges.last()?;
        if value.is_nan() || value < first || value > last {
            return None;
        }
        // first edge >= value; the bin ends at that edge
        let upper = self.edges.partition_point(|&e| e < value);
        Some(upper.saturating_sub(1).min(self.len() - 1))
    }

    /// Interval labels in the Pandas style, e.g. `"(0.997, 2.0]"`.
    pub fn labels(&self) -> Vec<String> {
        let precision = self.label_precision();
        let mut lefts: Vec<f64> = self.edges[..self.len()]
            .iter()
            .map(|&e| round_frac(e, precision))
            .collect();
        // the lowest interval is closed, print its edge just below the rounded minimum
        if let Some(first) = lefts.first_mut() {
            *first -= 10f64.powi(-precision);
        }
        lefts
            .iter()
            .zip(&self.edges[1..])
            .map(|(&lo, &hi)| {
                format!(
                    "({}, {}]",
                    format_edge(lo),
                    format_edge(round_frac(hi, precision))
                )
            })
            .collect()
    }

    /// Smallest precision at which every rounded edge is distinct.
    fn label_precision(&self) -> i32 {
        (LABEL_PRECISION..MAX_LABEL_PRECISION)
            .find(|&precision| {
                self.edges
                    .windows(2)
                    .all(|w| round_frac(w[0], precision) != round_frac(w[1], precision))
            })
            .unwrap_or(LABEL_PRECISION)
    }
}

/// `num` evenly spaced points from `start` to `stop`, both included.
fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    if num == 1 {
        return vec![start];
    }
    let step = (stop - start) / (num - 1) as f64;
    let mut points: Vec<f64> = (0..num).map(|i| start + step * i as f64).collect();
    points[num - 1] = stop;
    points
}

/// Round to `precision` significant digits of the fractional part.
fn round_frac(x: f64, precision: i32) -> f64 {
    if !x.is_finite() || x == 0.0 {
        return x;
    }
    let digits = if x.trunc() == 0.0 {
        -(x.fract().abs().log10().floor() as i32) - 1 + precision
    } else {
        precision
    };
    let scale = 10f64.powi(digits);
    (x * scale).round() / scale
}

fn format_edge(x: f64) -> String {
    if x.fract() == 0.0 && x.is_finite() {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

// ---------------------------------------------------------------------------
// Cross-tabulation of price bins against quantity bins
// ---------------------------------------------------------------------------

/// Count matrix: `counts[price_bin][quantity_bin]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossTab {
    pub price_bins: Bins,
    pub quantity_bins: Bins,
    pub counts: Vec<Vec<u64>>,
}

impl CrossTab {
    /// Total number of records counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }
}

/// Bin price and quantity into `count` bins each and count every record that
/// has a price.
///
/// Price bins span the records that have a price; quantity bins span all
/// records. Returns `None` when no record has a price.
pub fn cross_tab(dataset: &CleanDataset, count: usize) -> Option<CrossTab> {
    let price_bins = Bins::equal_width(dataset.records.iter().filter_map(|r| r.price), count)?;
    let quantity_bins = Bins::equal_width(dataset.records.iter().map(|r| r.quantity), count)?;

    let mut counts = vec![vec![0u64; quantity_bins.len()]; price_bins.len()];
    for (price, quantity) in dataset.price_quantity_points() {
        let cell = (price_bins.index_of(price), quantity_bins.index_of(quantity));
        if let (Some(p), Some(q)) = cell {
            counts[p][q] += 1;
        }
    }

    Some(CrossTab {
        price_bins,
        quantity_bins,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CleanRecord;

    #[test]
    fn edges_span_the_range() {
        let bins = Bins::equal_width([0.0, 10.0, 5.0], 10).unwrap();
        let edges = bins.edges();
        assert_eq!(edges.len(), 11);
        assert!((edges[0] - -0.01).abs() < 1e-12);
        assert_eq!(edges[10], 10.0);
        assert!((edges[5] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn min_and_max_fall_in_outer_bins() {
        let bins = Bins::equal_width([3.0, 7.0, 4.2, 13.0], 10).unwrap();
        assert_eq!(bins.index_of(3.0), Some(0));
        assert_eq!(bins.index_of(13.0), Some(9));
        assert_eq!(bins.index_of(2.0), None);
        assert_eq!(bins.index_of(f64::NAN), None);
    }

    #[test]
    fn bins_are_right_closed() {
        let bins = Bins::equal_width([0.0, 10.0], 10).unwrap();
        assert_eq!(bins.index_of(1.0), Some(0));
        assert_eq!(bins.index_of(1.0001), Some(1));
        assert_eq!(bins.index_of(5.0), Some(4));
    }

    #[test]
    fn constant_values_widen_the_range() {
        let bins = Bins::equal_width([5.0, 5.0], 10).unwrap();
        assert!((bins.edges()[0] - 4.995).abs() < 1e-12);
        assert!((bins.edges()[10] - 5.005).abs() < 1e-12);
        assert!(bins.index_of(5.0).is_some());

        let zero = Bins::equal_width([0.0], 4).unwrap();
        assert!((zero.edges()[0] - -0.001).abs() < 1e-12);
    }

    #[test]
    fn no_values_no_bins() {
        assert!(Bins::equal_width(std::iter::empty(), 10).is_none());
        assert!(Bins::equal_width([1.0], 0).is_none());
    }

    #[test]
    fn labels_follow_pandas_formatting() {
        let bins = Bins::equal_width([1.0, 3.0], 2).unwrap();
        assert_eq!(bins.labels(), ["(0.997, 2.0]", "(2.0, 3.0]"]);
    }

    #[test]
    fn labels_stay_distinct_for_narrow_ranges() {
        let bins = Bins::equal_width([1000.0001, 1000.0005, 1000.0009], 10).unwrap();
        let labels = bins.labels();
        let mut unique = labels.clone();
        unique.dedup();
        assert_eq!(unique.len(), 10);
        assert_eq!(labels[1], "(1000.00018, 1000.00026]");
    }

    #[test]
    fn cross_tab_counts_every_priced_record() {
        let records = vec![
            (Some(1.0), 10.0),
            (Some(2.0), 20.0),
            (Some(10.0), 100.0),
            (None, 50.0),
            (Some(10.0), 10.0),
        ]
        .into_iter()
        .map(|(price, quantity)| CleanRecord {
            price,
            quantity,
            brand: None,
        })
        .collect();
        let ds = CleanDataset {
            records,
            dropped: 0,
        };

        let tab = cross_tab(&ds, DEFAULT_BIN_COUNT).unwrap();
        assert_eq!(tab.counts.len(), 10);
        assert!(tab.counts.iter().all(|row| row.len() == 10));
        assert_eq!(tab.total(), 4);
        assert_eq!(tab.counts[0][0], 1);
        assert_eq!(tab.counts[9][9], 1);
        assert_eq!(tab.counts[9][0], 1);
    }

    #[test]
    fn cross_tab_of_empty_dataset() {
        assert!(cross_tab(&CleanDataset::default(), 10).is_none());
    }
}
