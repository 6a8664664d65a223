use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::{cast_with_options, CastOptions};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DatasetError;
use super::model::{CellValue, Column, Dataset, Record, BRAND, PRICE, QUANTITY_SOLD};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a listing dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with `Price`, `Quantity Sold`, `Brand` (or the
///   Portuguese `Preço`, `Qtd_Vendidos`, `Marca`)
/// * `.json`    – `[{ "Price": 19.9, "Quantity Sold": "+100", "Brand": "X" }, ...]`
/// * `.parquet` – flat columns with the same names
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(DatasetError::UnsupportedExtension(other.to_string()).into()),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!("Loaded {} records from {}", dataset.len(), path.display());
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Every cell is read as text; empty cells become nulls.
/// Columns other than the three required ones are ignored.
fn load_csv(path: &Path) -> Result<Dataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let price_idx = PRICE.position(&headers)?;
    let qty_idx = QUANTITY_SOLD.position(&headers)?;
    let brand_idx = BRAND.position(&headers)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;
        let cell = |idx: usize| CellValue::from_text(row.get(idx).unwrap_or(""));

        records.push(Record::from_cells(
            row_no,
            cell(price_idx),
            cell(qty_idx),
            cell(brand_idx),
        )?);
    }

    Ok(Dataset::new(records))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Price": 45.9, "Quantity Sold": "1mil+", "Brand": "Acme" },
///   ...
/// ]
/// ```
///
/// The first record decides which header spelling is used; a key absent from
/// a later record reads as null.
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let rows = root.as_array().ok_or(DatasetError::NotAnArray)?;
    let Some(first) = rows.first() else {
        return Ok(Dataset::default());
    };
    let first = first
        .as_object()
        .ok_or(DatasetError::NotAnObject { row: 0 })?;

    let price_key = json_key(first, &PRICE)?;
    let qty_key = json_key(first, &QUANTITY_SOLD)?;
    let brand_key = json_key(first, &BRAND)?;

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row.as_object().ok_or(DatasetError::NotAnObject { row: i })?;
        let cell = |key: &str| obj.get(key).map(json_to_cell).unwrap_or(CellValue::Null);

        records.push(Record::from_cells(
            i,
            cell(price_key),
            cell(qty_key),
            cell(brand_key),
        )?);
    }

    Ok(Dataset::new(records))
}

fn json_key<'a>(obj: &'a Map<String, JsonValue>, column: &Column) -> Result<&'a str, DatasetError> {
    obj.keys()
        .find(|k| column.matches(k))
        .map(String::as_str)
        .ok_or_else(|| column.missing())
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::from_text(s),
        JsonValue::Number(n) => n
            .as_f64()
            .map(CellValue::Number)
            .unwrap_or_else(|| CellValue::Text(n.to_string())),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of listings.
///
/// Numeric columns of any width (and dictionaries of numbers) are read as
/// `Float64`; text, large/view text and dictionary-encoded text (Pandas
/// `category`, Polars `Categorical`) are read as `Utf8`. A column that cannot
/// be converted is an error.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();

        let price_col = readable_column(batch.column(PRICE.position(&names)?), &PRICE)?;
        let qty_col =
            readable_column(batch.column(QUANTITY_SOLD.position(&names)?), &QUANTITY_SOLD)?;
        let brand_col = readable_column(batch.column(BRAND.position(&names)?), &BRAND)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len();
            records.push(Record::from_cells(
                row_no,
                extract_cell(&price_col, row),
                extract_cell(&qty_col, row),
                extract_cell(&brand_col, row),
            )?);
        }
    }

    Ok(Dataset::new(records))
}

// -- Parquet / Arrow helpers --

/// Cast a column to `Float64` (numbers) or `Utf8` (everything else).
fn readable_column(col: &ArrayRef, column: &Column) -> Result<ArrayRef, DatasetError> {
    let target = match col.data_type() {
        DataType::Utf8 | DataType::Float64 => return Ok(col.clone()),
        DataType::Dictionary(_, values) if values.is_numeric() => DataType::Float64,
        t if t.is_numeric() => DataType::Float64,
        _ => DataType::Utf8,
    };
    let options = CastOptions {
        safe: false,
        ..Default::default()
    };
    cast_with_options(col, &target, &options).map_err(|source| DatasetError::UnreadableColumn {
        column: column.name,
        data_type: col.data_type().clone(),
        source,
    })
}

/// Extract a single cell from a column prepared by [`readable_column`].
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    if let Some(s) = any.downcast_ref::<StringArray>() {
        CellValue::from_text(s.value(row))
    } else if let Some(f) = any.downcast_ref::<Float64Array>() {
        CellValue::Number(f.value(row))
    } else {
        CellValue::Null
    }
}
