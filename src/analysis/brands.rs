use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::CleanDataset;

/// Label of the pie slice that merges the small brands.
pub const OTHER_LABEL: &str = "Other";

/// Minimum summed quantity for a brand to appear in the bar chart.
pub const BAR_MIN_TOTAL: f64 = 100.0;

/// Brands under this share (in percent) are merged into [`OTHER_LABEL`].
pub const PIE_MIN_PERCENT: f64 = 2.0;

/// Summed quantity of one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandTotal {
    pub brand: String,
    pub total: f64,
}

/// One slice of the brand share pie.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub total: f64,
    pub percent: f64,
}

/// Sum quantity per brand, ordered by brand name.
///
/// Records without a brand are not attributed to any group.
pub fn brand_totals(dataset: &CleanDataset) -> Vec<BrandTotal> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for r in &dataset.records {
        if let Some(brand) = r.brand.as_deref() {
            *sums.entry(brand).or_default() += r.quantity;
        }
    }
    sums.into_iter()
        .map(|(brand, total)| BrandTotal {
            brand: brand.to_string(),
            total,
        })
        .collect()
}

/// Brands whose total is at least `min_total`, largest first.
pub fn bar_view(totals: &[BrandTotal], min_total: f64) -> Vec<BrandTotal> {
    let mut kept: Vec<BrandTotal> = totals
        .iter()
        .filter(|t| t.total >= min_total)
        .cloned()
        .collect();
    kept.sort_by(|a, b| b.total.total_cmp(&a.total));
    kept
}

/// Share of each brand in the grand total, with every brand below
/// `min_percent` merged into one [`OTHER_LABEL`] slice.
///
/// The merged slice only exists when its sum is positive, and it is sorted
/// together with the others by total.
pub fn pie_view(totals: &[BrandTotal], min_percent: f64) -> Vec<PieSlice> {
    let grand: f64 = totals.iter().map(|t| t.total).sum();
    if grand == 0.0 {
        return Vec::new();
    }
    let percent = |v: f64| v / grand * 100.0;

    let mut slices: Vec<PieSlice> = Vec::new();
    let mut other = 0.0;
    for t in totals {
        if percent(t.total) < min_percent {
            other += t.total;
        } else {
            slices.push(PieSlice {
                label: t.brand.clone(),
                total: t.total,
                percent: percent(t.total),
            });
        }
    }

    if other > 0.0 {
        // a real brand called "Other" absorbs the merged remainder
        match slices.iter_mut().find(|s| s.label == OTHER_LABEL) {
            Some(existing) => {
                existing.total += other;
                existing.percent = percent(existing.total);
            }
            None => slices.push(PieSlice {
                label: OTHER_LABEL.to_string(),
                total: other,
                percent: percent(other),
            }),
        }
    }

    slices.sort_by(|a, b| b.total.total_cmp(&a.total));
    slices
}
