use serde::Serialize;

// ---------------------------------------------------------------------------
// Figure – the JSON document handed to `Plotly.newPlot`
// ---------------------------------------------------------------------------

/// A plotly.js figure: traces plus layout.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    /// An empty figure with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Figure {
            data: Vec::new(),
            layout: Layout {
                title: Title::new(title),
                ..Default::default()
            },
        }
    }

    pub fn trace(mut self, trace: Trace) -> Self {
        self.data.push(trace);
        self
    }

    pub fn x_title(mut self, text: impl Into<String>) -> Self {
        self.layout.xaxis.get_or_insert_with(Axis::default).title = Some(Title::new(text));
        self
    }

    pub fn y_title(mut self, text: impl Into<String>) -> Self {
        self.layout.yaxis.get_or_insert_with(Axis::default).title = Some(Title::new(text));
        self
    }
}

/// One plotted series; `type` selects the plotly.js trace kind.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Histogram(Histogram),
    Scatter(Scatter),
    Heatmap(Heatmap),
    Bar(Bar),
    Pie(Pie),
    Histogram2d(Histogram2d),
    Box(BoxPoints),
}

// ---------------------------------------------------------------------------
// Trace kinds
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct Histogram {
    pub x: Vec<f64>,
    pub nbinsx: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Scatter {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertemplate: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Heatmap {
    pub z: Vec<Vec<u64>>,
    pub x: Vec<String>,
    pub y: Vec<String>,
    pub colorscale: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Bar {
    pub x: Vec<String>,
    pub y: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Pie {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub textposition: &'static str,
    pub textinfo: &'static str,
    /// Keep the slice order as given instead of re-sorting client side.
    pub sort: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Histogram2d {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub colorscale: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
}

/// A box trace showing only its points, used as a rug strip.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BoxPoints {
    pub x: Vec<f64>,
    pub boxpoints: &'static str,
    pub jitter: f64,
    pub fillcolor: &'static str,
    pub line: Line,
    pub marker: Marker,
    pub yaxis: &'static str,
    pub showlegend: bool,
    pub hoverinfo: &'static str,
}

// ---------------------------------------------------------------------------
// Styling
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MarkerColor {
    One(String),
    Each(Vec<String>),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<MarkerColor>,
    /// Per-slice colours (pie traces only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<&'static str>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Line {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub title: Title,
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    pub title: Title,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<Axis>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Title { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn trace_kind_is_tagged() {
        let fig = Figure::new("t").trace(Trace::Histogram2d(Histogram2d {
            x: vec![1.0],
            y: vec![2.0],
            colorscale: "Viridis",
            colorbar: None,
        }));
        let v = serde_json::to_value(&fig).unwrap();
        assert_eq!(
            v["data"][0],
            json!({"type": "histogram2d", "x": [1.0], "y": [2.0], "colorscale": "Viridis"})
        );
    }

    #[test]
    fn axis_titles_and_empty_options_are_skipped() {
        let fig = Figure::new("Sales").x_title("Price").y_title("Count");
        let v = serde_json::to_value(&fig).unwrap();
        assert_eq!(
            v["layout"],
            json!({
                "title": {"text": "Sales"},
                "xaxis": {"title": {"text": "Price"}},
                "yaxis": {"title": {"text": "Count"}}
            })
        );
    }

    #[test]
    fn marker_serializes_only_what_is_set() {
        assert_eq!(serde_json::to_value(Marker::default()).unwrap(), json!({}));
        let rug = Marker {
            symbol: Some("line-ns-open"),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(rug).unwrap(),
            json!({"symbol": "line-ns-open"})
        );
    }

    #[test]
    fn marker_color_serializes_untagged() {
        let one = serde_json::to_value(MarkerColor::One("#fff".into())).unwrap();
        let each = serde_json::to_value(MarkerColor::Each(vec!["#fff".into()])).unwrap();
        assert_eq!(one, json!("#fff"));
        assert_eq!(each, json!(["#fff"]));
    }
}
