use anyhow::{Context, Result};
use serde_json::{Map, Value as JsonValue};

use crate::analysis::binning::cross_tab;
use crate::analysis::brands::{bar_view, brand_totals, pie_view};
use crate::analysis::regression::ols_fit;
use crate::chart::views;
use crate::chart::Figure;
use crate::color::BrandColors;
use crate::config::Config;
use crate::data::filter::min_quantity;
use crate::data::model::CleanDataset;

const PAGE_TEMPLATE: &str = include_str!("../assets/dashboard.html");

// ---------------------------------------------------------------------------
// Dashboard – the seven charts, computed once
// ---------------------------------------------------------------------------

/// One chart of the page: its element id and figure.
#[derive(Debug, Clone)]
pub struct Chart {
    pub id: &'static str,
    pub figure: Figure,
}

/// Everything the page shows, derived from one cleaned dataset.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub title: String,
    pub subtitle: String,
    pub footer: String,
    pub plotly_src: String,
    pub charts: Vec<Chart>,
}

impl Dashboard {
    /// Compute every view and figure from `dataset`.
    pub fn build(dataset: &CleanDataset, config: &Config) -> Self {
        let table = cross_tab(dataset, config.heatmap_bins);

        let totals = brand_totals(dataset);
        let colors = BrandColors::new(totals.iter().map(|t| t.brand.as_str()));
        let bars = bar_view(&totals, config.bar_min_total);
        let slices = pie_view(&totals, config.pie_min_percent);

        let high_volume: Vec<(f64, f64)> = min_quantity(dataset, config.regression_min_quantity)
            .into_iter()
            .filter_map(|r| r.price.map(|p| (p, r.quantity)))
            .collect();
        let fit = ols_fit(&high_volume);

        log::debug!(
            "{} brands, {} in bar chart, {} pie slices, {} high-volume listings",
            totals.len(),
            bars.len(),
            slices.len(),
            high_volume.len()
        );

        let charts = vec![
            Chart {
                id: "price-histogram",
                figure: views::price_histogram(dataset, config.histogram_bins),
            },
            Chart {
                id: "quantity-price-scatter",
                figure: views::quantity_scatter(dataset),
            },
            Chart {
                id: "price-quantity-heatmap",
                figure: views::price_quantity_heatmap(table.as_ref()),
            },
            Chart {
                id: "brand-sales-bar",
                figure: views::brand_bar(&bars, &colors, config.bar_min_total),
            },
            Chart {
                id: "brand-sales-pie",
                figure: views::brand_pie(&slices, &colors, config.pie_min_percent),
            },
            Chart {
                id: "price-quantity-density",
                figure: views::density_heatmap(dataset),
            },
            Chart {
                id: "price-quantity-regression",
                figure: views::regression(&high_volume, fit, config.regression_min_quantity),
            },
        ];

        Dashboard {
            title: config.title.clone(),
            subtitle: config.subtitle.clone(),
            footer: config.footer.clone(),
            plotly_src: config.plotly_src.clone(),
            charts,
        }
    }

    /// All figures as one JSON object keyed by chart id.
    pub fn figures_json(&self) -> Result<JsonValue> {
        let mut map = Map::new();
        for chart in &self.charts {
            let fig = serde_json::to_value(&chart.figure)
                .with_context(|| format!("serializing chart '{}'", chart.id))?;
            map.insert(chart.id.to_string(), fig);
        }
        Ok(JsonValue::Object(map))
    }

    /// The complete HTML page with every figure embedded.
    pub fn render_page(&self) -> Result<String> {
        let figures = serde_json::to_string(&self.figures_json()?)
            .context("serializing figures")?
            // keep "</script>" and friends out of the inline JSON
            .replace('<', "\\u003c");

        let charts = self
            .charts
            .iter()
            .map(|c| format!("    <div id=\"{}\" class=\"chart\"></div>", c.id))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(fill_template(PAGE_TEMPLATE, |key| match key {
            "title" => Some(escape_html(&self.title)),
            "subtitle" => Some(escape_html(&self.subtitle)),
            "footer" => Some(escape_html(&self.footer)),
            "plotly_src" => Some(escape_html(&self.plotly_src)),
            "charts" => Some(charts.clone()),
            "figures" => Some(figures.clone()),
            _ => None,
        }))
    }
}

// ---------------------------------------------------------------------------
// Template helpers
// ---------------------------------------------------------------------------

/// Replace every `{{key}}` in one pass; unknown keys are left as they are.
fn fill_template<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match lookup(key) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CleanRecord;

    fn dataset() -> CleanDataset {
        let rows = [
            (10.0, 50.0, "A"),
            (20.0, 60.0, "A"),
            (15.0, 5.0, "B"),
            (40.0, 12_000.0, "C"),
            (80.0, 25_000.0, "C"),
            (60.0, 15_000.0, "</script>"),
        ];
        CleanDataset {
            records: rows
                .iter()
                .map(|&(price, quantity, brand)| CleanRecord {
                    price: Some(price),
                    quantity,
                    brand: Some(brand.to_string()),
                })
                .collect(),
            dropped: 0,
        }
    }

    #[test]
    fn seven_charts_in_page_order() {
        let dash = Dashboard::build(&dataset(), &Config::default());
        let ids: Vec<_> = dash.charts.iter().map(|c| c.id).collect();
        assert_eq!(
            ids,
            [
                "price-histogram",
                "quantity-price-scatter",
                "price-quantity-heatmap",
                "brand-sales-bar",
                "brand-sales-pie",
                "price-quantity-density",
                "price-quantity-regression",
            ]
        );
    }

    #[test]
    fn figures_json_is_keyed_by_id() {
        let dash = Dashboard::build(&dataset(), &Config::default());
        let json = dash.figures_json().unwrap();
        assert_eq!(json.as_object().unwrap().len(), 7);
        assert_eq!(json["brand-sales-bar"]["data"][0]["type"], "bar");
        assert_eq!(json["price-quantity-regression"]["data"][1]["mode"], "lines");
    }

    #[test]
    fn page_embeds_every_chart_safely() {
        let mut config = Config::default();
        config.title = "Sales & <Stats>".to_string();
        let page = Dashboard::build(&dataset(), &config).render_page().unwrap();

        assert_eq!(page.matches("class=\"chart\"").count(), 7);
        assert!(page.contains("<title>Sales &amp; &lt;Stats&gt;</title>"));
        assert!(page.contains("\\u003c/script>"));
        assert_eq!(page.matches("</script>").count(), 3);
        assert!(!page.contains("{{"));
    }

    #[test]
    fn template_leaves_unknown_keys() {
        let out = fill_template("a {{x}} b {{y}} c {{", |k| (k == "x").then(|| "1".to_string()));
        assert_eq!(out, "a 1 b {{y}} c {{");
    }
}
