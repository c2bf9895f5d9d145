//! Chart specification returned by the callbacks.
//!
//! The types serialize to plotly figure JSON (`{"data": [...], "layout": {...}}`)
//! so the web page can hand them to `Plotly.react` untouched. The native
//! viewer draws the same values with egui.

use serde::{Deserialize, Serialize};

/// A complete chart: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Figure {
            data: Vec::new(),
            layout: Layout {
                title: Title::new(title),
                ..Layout::default()
            },
        }
    }

    pub fn title(&self) -> &str {
        &self.layout.title.text
    }

    /// Whether the chart has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(Trace::is_empty)
    }
}

// ---------------------------------------------------------------------------
// Traces
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Pie(PieTrace),
    Scatter(ScatterTrace),
}

impl Trace {
    pub fn is_empty(&self) -> bool {
        match self {
            Trace::Pie(pie) => pie.values.is_empty(),
            Trace::Scatter(scatter) => scatter.x.is_empty(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PieTrace {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    /// Fraction of the radius cut out for a donut.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hole: Option<f64>,
    #[serde(default, skip_serializing_if = "Marker::is_empty")]
    pub marker: Marker,
    /// Keep slices in the order given instead of plotly's size sort.
    pub sort: bool,
}

impl PieTrace {
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScatterMode {
    #[default]
    Markers,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScatterTrace {
    /// Legend entry (the colour group).
    pub name: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Hover text, one per point.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub text: Vec<String>,
    pub mode: ScatterMode,
    #[serde(default, skip_serializing_if = "Marker::is_empty")]
    pub marker: Marker,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Single colour for every point of a trace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Per-slice colours of a pie.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,
}

impl Marker {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.colors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Title { text: text.into() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub title: Title,
}
