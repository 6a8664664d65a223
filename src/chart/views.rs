use crate::analysis::binning::CrossTab;
use crate::analysis::brands::{BrandTotal, PieSlice};
use crate::analysis::regression::LinearFit;
use crate::color::BrandColors;
use crate::data::model::CleanDataset;

use super::figure::{
    Axis, Bar, BoxPoints, ColorBar, Figure, Heatmap, Histogram, Histogram2d, Line, Marker,
    MarkerColor, Pie, Scatter, Title, Trace,
};

const PRICE: &str = "Price";
const QUANTITY: &str = "Quantity sold";
const ACCENT: &str = "#636efa";
const TREND: &str = "#ef553b";

// ---------------------------------------------------------------------------
// Distribution charts
// ---------------------------------------------------------------------------

/// Histogram of prices with a rug strip of the raw values above it.
pub fn price_histogram(dataset: &CleanDataset, bins: usize) -> Figure {
    let prices: Vec<f64> = dataset.records.iter().filter_map(|r| r.price).collect();

    let mut fig = Figure::new("Price histogram")
        .trace(Trace::Histogram(Histogram {
            x: prices.clone(),
            nbinsx: bins,
            name: Some(PRICE.to_string()),
            marker: Some(Marker {
                color: Some(MarkerColor::One(ACCENT.to_string())),
                ..Default::default()
            }),
        }))
        .trace(Trace::Box(BoxPoints {
            x: prices,
            boxpoints: "all",
            jitter: 0.0,
            fillcolor: "rgba(255,255,255,0)",
            line: Line {
                color: Some("rgba(255,255,255,0)".to_string()),
                width: None,
            },
            marker: Marker {
                color: Some(MarkerColor::One(ACCENT.to_string())),
                symbol: Some("line-ns-open"),
                ..Default::default()
            },
            yaxis: "y2",
            showlegend: false,
            hoverinfo: "x",
        }))
        .x_title(PRICE)
        .y_title("Frequency");

    if let Some(y) = fig.layout.yaxis.as_mut() {
        y.domain = Some([0.0, 0.84]);
    }
    fig.layout.yaxis2 = Some(Axis {
        domain: Some([0.86, 1.0]),
        anchor: Some("x"),
        showticklabels: Some(false),
        showgrid: Some(false),
        ..Default::default()
    });
    fig
}

/// Every listing as a point of quantity sold against price.
pub fn quantity_scatter(dataset: &CleanDataset) -> Figure {
    let (x, y) = dataset.price_quantity_points().unzip();
    Figure::new("Scatter plot: quantity sold vs price")
        .trace(Trace::Scatter(Scatter {
            x,
            y,
            mode: "markers",
            marker: Some(Marker {
                color: Some(MarkerColor::One(ACCENT.to_string())),
                ..Default::default()
            }),
            ..Default::default()
        }))
        .x_title(PRICE)
        .y_title(QUANTITY)
}

/// Count of listings per (price bin, quantity bin) cell.
pub fn price_quantity_heatmap(table: Option<&CrossTab>) -> Figure {
    let fig = Figure::new("Heat map: price vs quantity sold (count)");
    let Some(table) = table else {
        return fig;
    };
    let n_price = table.price_bins.len();
    let n_qty = table.quantity_bins.len();

    fig.trace(Trace::Heatmap(Heatmap {
        z: table.counts.clone(),
        x: table.quantity_bins.labels(),
        y: table.price_bins.labels(),
        colorscale: "Viridis",
        colorbar: Some(ColorBar {
            title: Title::new("Count"),
        }),
    }))
    .x_title(format!("{QUANTITY} ({n_qty} intervals)"))
    .y_title(format!("{PRICE} ({n_price} intervals)"))
}

/// Two-dimensional histogram of price against quantity sold.
pub fn density_heatmap(dataset: &CleanDataset) -> Figure {
    let (x, y) = dataset.price_quantity_points().unzip();
    Figure::new("Density plot: price vs quantity sold")
        .trace(Trace::Histogram2d(Histogram2d {
            x,
            y,
            colorscale: "Viridis",
            colorbar: Some(ColorBar {
                title: Title::new("Count"),
            }),
        }))
        .x_title(PRICE)
        .y_title(QUANTITY)
}

// ---------------------------------------------------------------------------
// Brand charts
// ---------------------------------------------------------------------------

/// Total quantity sold per brand, for brands above the bar threshold.
pub fn brand_bar(bars: &[BrandTotal], colors: &BrandColors, min_total: f64) -> Figure {
    Figure::new(format!(
        "Bar chart: total sales per brand (minimum {min_total} sales)"
    ))
    .trace(Trace::Bar(Bar {
        x: bars.iter().map(|b| b.brand.clone()).collect(),
        y: bars.iter().map(|b| b.total).collect(),
        marker: Some(Marker {
            color: Some(MarkerColor::Each(
                bars.iter()
                    .map(|b| colors.color_for(&b.brand).to_string())
                    .collect(),
            )),
            ..Default::default()
        }),
    }))
    .x_title("Brand")
    .y_title("Total sales")
}

/// Share of total quantity per brand, small brands merged.
pub fn brand_pie(slices: &[PieSlice], colors: &BrandColors, min_percent: f64) -> Figure {
    Figure::new(format!(
        "Pie chart: sales share per brand (brands under {min_percent}% grouped as \"Other\")"
    ))
    .trace(Trace::Pie(Pie {
        labels: slices.iter().map(|s| s.label.clone()).collect(),
        values: slices.iter().map(|s| s.total).collect(),
        textposition: "inside",
        textinfo: "percent+label",
        sort: false,
        marker: Some(Marker {
            colors: Some(
                slices
                    .iter()
                    .map(|s| colors.color_for(&s.label).to_string())
                    .collect(),
            ),
            ..Default::default()
        }),
    }))
}

// ---------------------------------------------------------------------------
// Regression chart
// ---------------------------------------------------------------------------

/// High-volume listings with an OLS trend line over them.
pub fn regression(points: &[(f64, f64)], fit: Option<LinearFit>, min_quantity: f64) -> Figure {
    let mut fig = Figure::new(format!(
        "Regression: price vs quantity sold (>= {min_quantity} sales)"
    ))
    .trace(Trace::Scatter(Scatter {
        x: points.iter().map(|p| p.0).collect(),
        y: points.iter().map(|p| p.1).collect(),
        mode: "markers",
        name: Some("Listings".to_string()),
        marker: Some(Marker {
            color: Some(MarkerColor::One(ACCENT.to_string())),
            ..Default::default()
        }),
        ..Default::default()
    }));

    if let Some(fit) = fit {
        let (lo, hi) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.0), hi.max(p.0))
            });
        fig = fig.trace(Trace::Scatter(Scatter {
            x: vec![lo, hi],
            y: vec![fit.predict(lo), fit.predict(hi)],
            mode: "lines",
            name: Some("OLS trend".to_string()),
            line: Some(Line {
                color: Some(TREND.to_string()),
                width: Some(2.0),
            }),
            hovertemplate: Some(format!(
                "y = {:.4} x + {:.4}<br>R² = {:.4}<extra></extra>",
                fit.slope, fit.intercept, fit.r_squared
            )),
            ..Default::default()
        }));
    }

    fig.x_title(PRICE).y_title(QUANTITY)
}
