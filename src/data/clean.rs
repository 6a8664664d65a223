use super::model::{CleanDataset, CleanRecord, Dataset};
use super::normalize::normalize_quantity;

/// Normalize every record's quantity and drop the ones that fail to parse.
///
/// Surviving records keep their relative order.
pub fn clean(dataset: Dataset) -> CleanDataset {
    let total = dataset.len();
    let records: Vec<CleanRecord> = dataset
        .records
        .into_iter()
        .filter_map(|r| {
            let quantity = normalize_quantity(&r.quantity_sold)?;
            Some(CleanRecord {
                price: r.price,
                quantity,
                brand: r.brand,
            })
        })
        .collect();

    let dropped = total - records.len();
    log::debug!("cleaned {total} records, dropped {dropped} with unparseable quantity");

    CleanDataset { records, dropped }
}
