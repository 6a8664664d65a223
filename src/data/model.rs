use super::error::DatasetError;

// ---------------------------------------------------------------------------
// CellValue – a single raw cell as read from the source file
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring what a Pandas `object` column may hold.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Null,
}

impl CellValue {
    /// Classify a text cell: empty strings become `Null`, everything else stays text.
    pub fn from_text(s: &str) -> Self {
        if s.trim().is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// Column – a required input column and the header names accepted for it
// ---------------------------------------------------------------------------

/// A required column of the listing file.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Canonical name, used in error messages.
    pub name: &'static str,
    /// Header spellings accepted for this column (canonical name first).
    pub aliases: &'static [&'static str],
}

pub const PRICE: Column = Column {
    name: "Price",
    aliases: &["Price", "Preço"],
};

pub const QUANTITY_SOLD: Column = Column {
    name: "Quantity Sold",
    aliases: &["Quantity Sold", "Qtd_Vendidos"],
};

pub const BRAND: Column = Column {
    name: "Brand",
    aliases: &["Brand", "Marca"],
};

impl Column {
    /// Position of this column in a header row.
    pub fn position<S: AsRef<str>>(&self, headers: &[S]) -> Result<usize, DatasetError> {
        headers
            .iter()
            .position(|h| self.matches(h.as_ref()))
            .ok_or_else(|| self.missing())
    }

    /// Whether a header name refers to this column.
    pub fn matches(&self, header: &str) -> bool {
        self.aliases.iter().any(|a| *a == header)
    }

    pub fn missing(&self) -> DatasetError {
        DatasetError::MissingColumn {
            column: self.name,
            accepted: self.aliases.join(", "),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source file
// ---------------------------------------------------------------------------

/// A single product listing as loaded, before cleaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub price: Option<f64>,
    /// Raw "quantity sold" cell, e.g. `"+100"`, `"1,5mil"`, `"5mil+"`.
    pub quantity_sold: CellValue,
    pub brand: Option<String>,
}

impl Record {
    /// Build a record from the three raw cells of source row `row`.
    ///
    /// The price must be numeric or empty; any other price text is an error.
    pub fn from_cells(
        row: usize,
        price: CellValue,
        quantity_sold: CellValue,
        brand: CellValue,
    ) -> Result<Self, DatasetError> {
        let price = match price {
            CellValue::Number(v) if v.is_nan() => None,
            CellValue::Number(v) if v.is_infinite() => {
                return Err(DatasetError::InvalidPrice {
                    row,
                    value: v.to_string(),
                })
            }
            CellValue::Number(v) => Some(v),
            CellValue::Null => None,
            CellValue::Text(s) => parse_price(&s, row)?,
        };
        let brand = match brand {
            CellValue::Text(s) if !s.trim().is_empty() => Some(s),
            CellValue::Number(v) => Some(v.to_string()),
            _ => None,
        };
        Ok(Record {
            price,
            quantity_sold,
            brand,
        })
    }
}

fn parse_price(s: &str, row: usize) -> Result<Option<f64>, DatasetError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(DatasetError::InvalidPrice {
            row,
            value: s.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// All listings in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CleanDataset – listings with a numeric quantity
// ---------------------------------------------------------------------------

/// A listing whose quantity field parsed successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanRecord {
    pub price: Option<f64>,
    /// Normalized quantity sold.
    pub quantity: f64,
    pub brand: Option<String>,
}

/// The cleaned dataset every chart is derived from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanDataset {
    /// Surviving records, in their original order.
    pub records: Vec<CleanRecord>,
    /// How many source records were dropped for an unparseable quantity.
    pub dropped: usize,
}

impl CleanDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// `(price, quantity)` pairs of every record that has a price.
    pub fn price_quantity_points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.records
            .iter()
            .filter_map(|r| r.price.map(|p| (p, r.quantity)))
    }
}

/// Turn a cleaned dataset back into raw form; quantities become numeric cells.
impl From<CleanDataset> for Dataset {
    fn from(clean: CleanDataset) -> Self {
        let records = clean
            .records
            .into_iter()
            .map(|r| Record {
                price: r.price,
                quantity_sold: CellValue::Number(r.quantity),
                brand: r.brand,
            })
            .collect();
        Dataset { records }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_matches_any_alias() {
        let headers = ["Título", "Preço", "Qtd_Vendidos", "Marca"];
        assert_eq!(PRICE.position(&headers).unwrap(), 1);
        assert_eq!(QUANTITY_SOLD.position(&headers).unwrap(), 2);
        assert_eq!(BRAND.position(&headers).unwrap(), 3);
    }

    #[test]
    fn missing_column_names_accepted_headers() {
        let err = BRAND.position(&["Price"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required column 'Brand' (accepted names: Brand, Marca)"
        );
    }

    #[test]
    fn record_price_text_is_parsed() {
        let rec = Record::from_cells(
            0,
            CellValue::Text(" 19.9 ".into()),
            CellValue::Text("100+".into()),
            CellValue::Text("Acme".into()),
        )
        .unwrap();
        assert_eq!(rec.price, Some(19.9));
        assert_eq!(rec.brand.as_deref(), Some("Acme"));
    }

    #[test]
    fn record_empty_price_and_brand_are_missing() {
        let rec = Record::from_cells(
            3,
            CellValue::Null,
            CellValue::Text("5".into()),
            CellValue::Text("  ".into()),
        )
        .unwrap();
        assert_eq!(rec.price, None);
        assert_eq!(rec.brand, None);
    }

    #[test]
    fn record_rejects_non_numeric_price() {
        let err = Record::from_cells(
            7,
            CellValue::Text("cheap".into()),
            CellValue::Null,
            CellValue::Null,
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::InvalidPrice { row: 7, .. }));
    }

    #[test]
    fn record_rejects_non_finite_price() {
        for price in [
            CellValue::Text("inf".into()),
            CellValue::Text("1e400".into()),
            CellValue::Number(f64::NEG_INFINITY),
        ] {
            let err =
                Record::from_cells(0, price, CellValue::Text("5".into()), CellValue::Null)
                    .unwrap_err();
            assert!(matches!(err, DatasetError::InvalidPrice { row: 0, .. }));
        }
    }
}
