//! Declarative description of the dashboard page.
//!
//! Both frontends build themselves from [`DashboardLayout`]: the web page
//! fetches it as JSON, the native viewer reads the same widget values.

use serde::Serialize;

use crate::bindings::{BindingSpec, BINDINGS};
use crate::data::filter::{ALL_SITES, ALL_SITES_LABEL};
use crate::data::model::LaunchTable;

pub const SITE_DROPDOWN: &str = "site-dropdown";
pub const PAYLOAD_SLIDER: &str = "payload-slider";
pub const SUCCESS_PIE_CHART: &str = "success-pie-chart";
pub const SUCCESS_PAYLOAD_SCATTER_CHART: &str = "success-payload-scatter-chart";

pub const DASHBOARD_TITLE: &str = "SpaceX Launch Records Dashboard";
pub const SITE_PLACEHOLDER: &str = "Select a Launch Site here";
pub const PAYLOAD_LABEL: &str = "Payload range (Kg):";
/// Range slider step, in kg.
pub const PAYLOAD_STEP: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Widgets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SliderMark {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingStyle {
    pub text_align: &'static str,
    pub color: &'static str,
    pub font_size: u32,
}

/// One element of the page, top to bottom.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Widget {
    Heading {
        text: String,
        style: HeadingStyle,
    },
    Dropdown {
        id: &'static str,
        options: Vec<DropdownOption>,
        value: String,
        placeholder: &'static str,
        searchable: bool,
    },
    Graph {
        id: &'static str,
    },
    Label {
        text: &'static str,
    },
    RangeSlider {
        id: &'static str,
        min: f64,
        max: f64,
        step: f64,
        marks: Vec<SliderMark>,
        value: [f64; 2],
    },
}

/// The whole page: widgets in display order plus the reactive bindings
/// between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub title: &'static str,
    pub widgets: Vec<Widget>,
    pub bindings: Vec<BindingSpec>,
}

/// Dropdown options: the "All Sites" sentinel, then every site in table order.
pub fn site_options(table: &LaunchTable) -> Vec<DropdownOption> {
    std::iter::once(DropdownOption {
        label: ALL_SITES_LABEL.to_string(),
        value: ALL_SITES.to_string(),
    })
    .chain(table.sites().iter().map(|site| DropdownOption {
        label: site.clone(),
        value: site.clone(),
    }))
    .collect()
}

/// Slider marks at the integer payload bounds.
pub fn payload_marks(table: &LaunchTable) -> Vec<SliderMark> {
    let mut marks = vec![mark(table.min_payload())];
    if table.max_payload().trunc() != table.min_payload().trunc() {
        marks.push(mark(table.max_payload()));
    }
    marks
}

fn mark(payload: f64) -> SliderMark {
    let value = payload.trunc();
    SliderMark {
        value,
        label: format!("{value:.0}"),
    }
}

impl DashboardLayout {
    /// Derive the page from the loaded table. Done once at startup.
    pub fn build(table: &LaunchTable) -> Self {
        let widgets = vec![
            Widget::Heading {
                text: DASHBOARD_TITLE.to_string(),
                style: HeadingStyle {
                    text_align: "center",
                    color: "#503D36",
                    font_size: 40,
                },
            },
            Widget::Dropdown {
                id: SITE_DROPDOWN,
                options: site_options(table),
                value: ALL_SITES.to_string(),
                placeholder: SITE_PLACEHOLDER,
                searchable: true,
            },
            Widget::Graph {
                id: SUCCESS_PIE_CHART,
            },
            Widget::Label {
                text: PAYLOAD_LABEL,
            },
            Widget::RangeSlider {
                id: PAYLOAD_SLIDER,
                min: table.min_payload(),
                max: table.max_payload(),
                step: PAYLOAD_STEP,
                marks: payload_marks(table),
                value: [table.min_payload(), table.max_payload()],
            },
            Widget::Graph {
                id: SUCCESS_PAYLOAD_SCATTER_CHART,
            },
        ];

        DashboardLayout {
            title: DASHBOARD_TITLE,
            widgets,
            bindings: BINDINGS.iter().map(|b| b.spec()).collect(),
        }
    }
}
