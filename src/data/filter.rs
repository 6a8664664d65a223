use super::model::{CleanDataset, CleanRecord};

/// Records whose normalized quantity is at least `threshold`, in dataset order.
pub fn min_quantity(dataset: &CleanDataset, threshold: f64) -> Vec<&CleanRecord> {
    dataset
        .records
        .iter()
        .filter(|r| r.quantity >= threshold)
        .collect()
}
