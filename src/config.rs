use std::net::SocketAddr;
use std::path::PathBuf;

use crate::analysis::binning::DEFAULT_BIN_COUNT;
use crate::analysis::brands::{BAR_MIN_TOTAL, PIE_MIN_PERCENT};
use crate::analysis::regression::REGRESSION_MIN_QUANTITY;

/// Dataset read when no path is given on the command line.
pub const DEFAULT_DATA_PATH: &str = "ecommerce_estatistica.csv";

/// Runtime settings for building and serving the dashboard.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Bins per axis of the price/quantity heat map.
    pub heatmap_bins: usize,
    /// Bins of the price histogram.
    pub histogram_bins: usize,
    pub bar_min_total: f64,
    pub pie_min_percent: f64,
    pub regression_min_quantity: f64,
    pub title: String,
    pub subtitle: String,
    pub footer: String,
    /// Script URL of plotly.js.
    pub plotly_src: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8050)),
            heatmap_bins: DEFAULT_BIN_COUNT,
            histogram_bins: 30,
            bar_min_total: BAR_MIN_TOTAL,
            pie_min_percent: PIE_MIN_PERCENT,
            regression_min_quantity: REGRESSION_MIN_QUANTITY,
            title: "E-commerce Data Analysis".to_string(),
            subtitle: "Interactive chart view".to_string(),
            footer: "Built with Rust, axum and plotly.js".to_string(),
            plotly_src: "https://cdn.plot.ly/plotly-2.35.2.min.js".to_string(),
        }
    }
}

impl Config {
    /// Settings from the command-line arguments (program name excluded).
    ///
    /// The only argument is an optional dataset path.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        if let Some(path) = args.into_iter().next() {
            config.data_path = PathBuf::from(path);
        }
        config
    }
}
