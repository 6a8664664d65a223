use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Quantity text the way listing sites print it: "+50", "5mil+", "+1,5mil"...
fn quantity_text(rng: &mut SimpleRng) -> String {
    const PLAIN: [u32; 8] = [1, 5, 25, 50, 100, 500, 1000, 5000];
    const THOUSANDS: [&str; 6] = ["1", "1.5", "5", "10", "25", "50"];

    match rng.below(20) {
        0 => "N/A".to_string(),
        1 => String::new(),
        2 => format!("+{},5mil", rng.below(9) + 1),
        3..=9 => format!("{}mil+", THOUSANDS[rng.below(THOUSANDS.len())]),
        _ => format!("+{}", PLAIN[rng.below(PLAIN.len())]),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    // (brand, median price, relative popularity)
    let brands: [(&str, f64, usize); 8] = [
        ("Nike", 250.0, 6),
        ("Adidas", 220.0, 5),
        ("Puma", 180.0, 3),
        ("Hering", 60.0, 4),
        ("Lupo", 45.0, 2),
        ("Olympikus", 150.0, 2),
        ("Mizuno", 400.0, 1),
        ("Fila", 130.0, 1),
    ];
    let weight_total: usize = brands.iter().map(|b| b.2).sum();

    let n_rows = 600;
    let mut prices: Vec<f64> = Vec::with_capacity(n_rows);
    let mut quantities: Vec<String> = Vec::with_capacity(n_rows);
    let mut brand_names: Vec<String> = Vec::with_capacity(n_rows);

    for _ in 0..n_rows {
        let mut pick = rng.below(weight_total);
        let (brand, median, _) = brands
            .iter()
            .find(|b| {
                if pick < b.2 {
                    true
                } else {
                    pick -= b.2;
                    false
                }
            })
            .copied()
            .unwrap_or(brands[0]);

        let price = (median * rng.gauss(0.0, 0.35).exp() * 100.0).round() / 100.0;
        prices.push(price);
        quantities.push(quantity_text(&mut rng));
        brand_names.push(brand.to_string());
    }

    // Write CSV
    let csv_path = "sample_ecommerce.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV file")?;
    writer.write_record(["Price", "Quantity Sold", "Brand"])?;
    for ((price, qty), brand) in prices.iter().zip(&quantities).zip(&brand_names) {
        writer.write_record([price.to_string().as_str(), qty.as_str(), brand.as_str()])?;
    }
    writer.flush().context("flushing CSV file")?;

    // Write Parquet with the same columns
    let schema = Arc::new(Schema::new(vec![
        Field::new("Price", DataType::Float64, false),
        Field::new("Quantity Sold", DataType::Utf8, false),
        Field::new("Brand", DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Float64Array::from(prices)),
            Arc::new(StringArray::from(quantities)),
            Arc::new(StringArray::from(brand_names)),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "sample_ecommerce.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;

    println!("Wrote {n_rows} listings to {csv_path} and {parquet_path}");
    Ok(())
}
