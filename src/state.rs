use std::collections::BTreeMap;
use std::sync::Arc;

use log::warn;
use serde_json::json;

use crate::bindings::{Binding, CallbackInputs, BINDINGS};
use crate::chart::Figure;
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::model::LaunchTable;
use crate::layout::{
    site_options, DropdownOption, PAYLOAD_SLIDER, PAYLOAD_STEP, SITE_DROPDOWN,
    SUCCESS_PAYLOAD_SCATTER_CHART, SUCCESS_PIE_CHART,
};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The native viewer's widget values and the figures derived from them,
/// independent of rendering.
pub struct AppState {
    /// Shared read-only launch table.
    pub table: Arc<LaunchTable>,

    /// Dropdown options ("All Sites" first).
    pub site_options: Vec<DropdownOption>,

    /// Current dropdown value.
    pub site: SiteSelection,

    /// Search text typed into the site dropdown.
    pub site_search: String,

    /// Current slider value, always `low <= high` and inside the table bounds.
    pub payload: PayloadRange,

    /// Latest figure per output widget id.
    figures: BTreeMap<&'static str, Figure>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Set up the initial selection (all sites, full payload range) and
    /// evaluate every binding once.
    pub fn new(table: Arc<LaunchTable>) -> Self {
        let mut state = Self {
            site_options: site_options(&table),
            site: SiteSelection::All,
            site_search: String::new(),
            payload: PayloadRange::full(&table),
            figures: BTreeMap::new(),
            status_message: None,
            table,
        };
        state.run_pass(&BINDINGS);
        state
    }

    pub fn figure(&self, output: &str) -> Option<&Figure> {
        self.figures.get(output)
    }

    pub fn pie(&self) -> Option<&Figure> {
        self.figure(SUCCESS_PIE_CHART)
    }

    pub fn scatter(&self) -> Option<&Figure> {
        self.figure(SUCCESS_PAYLOAD_SCATTER_CHART)
    }

    /// Change the dropdown value; re-runs only the bindings it feeds.
    pub fn set_site(&mut self, site: SiteSelection) {
        if site != self.site {
            self.site = site;
            self.input_changed(SITE_DROPDOWN);
        }
    }

    /// Change the slider value. Ends are snapped to the slider step, put in
    /// order and kept inside the table's payload bounds.
    pub fn set_payload(&mut self, low: f64, high: f64) {
        let (min, max) = (self.table.min_payload(), self.table.max_payload());
        let a = snap_to_step(low, min, max, PAYLOAD_STEP);
        let b = snap_to_step(high, min, max, PAYLOAD_STEP);
        let range = PayloadRange::new(a.min(b), a.max(b));
        if range != self.payload {
            self.payload = range;
            self.input_changed(PAYLOAD_SLIDER);
        }
    }

    /// Dropdown options whose label contains the search text.
    pub fn visible_site_options(&self) -> Vec<&DropdownOption> {
        let needle = self.site_search.to_lowercase();
        self.site_options
            .iter()
            .filter(|opt| needle.is_empty() || opt.label.to_lowercase().contains(&needle))
            .collect()
    }

    fn inputs(&self) -> CallbackInputs {
        CallbackInputs::new()
            .with(SITE_DROPDOWN, self.site.value())
            .with(PAYLOAD_SLIDER, json!([self.payload.low, self.payload.high]))
    }

    fn input_changed(&mut self, id: &str) {
        self.run_pass(BINDINGS.iter().filter(|b| b.depends_on(id)));
    }

    /// Evaluate `bindings` against the current inputs. The status message
    /// reports the first failure of this pass and is cleared otherwise.
    fn run_pass<'a>(&mut self, bindings: impl IntoIterator<Item = &'a Binding>) {
        self.status_message = None;
        let inputs = self.inputs();
        for binding in bindings {
            match binding.run(&self.table, &inputs) {
                Ok(figure) => {
                    self.figures.insert(binding.output, figure);
                }
                Err(e) => {
                    warn!("callback for '{}' failed: {e}", binding.output);
                    self.status_message.get_or_insert_with(|| format!("Error: {e}"));
                }
            }
        }
    }
}

/// Round `value` to the nearest `min + k * step`, clamped to `[min, max]`.
/// The upper bound itself stays reachable even when it is not on a step.
pub fn snap_to_step(value: f64, min: f64, max: f64, step: f64) -> f64 {
    if value >= max {
        return max;
    }
    let snapped = min + ((value - min) / step).round() * step;
    snapped.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::CallbackError;
    use crate::callbacks::{payload_correlation, site_summary};
    use crate::data::model::tests::two_site_table;

    fn state() -> AppState {
        AppState::new(Arc::new(two_site_table()))
    }

    #[test]
    fn starts_with_all_sites_and_full_range() {
        let state = state();
        assert_eq!(state.site, SiteSelection::All);
        assert_eq!(state.payload, PayloadRange::new(0.0, 9600.0));
        assert_eq!(
            state.pie(),
            Some(&site_summary(&state.table, &SiteSelection::All))
        );
        assert!(state.scatter().is_some());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn site_change_updates_both_charts() {
        let mut state = state();
        let a = SiteSelection::Site("A".into());
        state.set_site(a.clone());
        assert_eq!(state.pie(), Some(&site_summary(&state.table, &a)));
        assert_eq!(
            state.scatter(),
            Some(&payload_correlation(&state.table, &a, state.payload))
        );
    }

    #[test]
    fn payload_change_leaves_pie_alone() {
        let mut state = state();
        let pie_before = state.pie().cloned();
        state.set_payload(2000.0, 4000.0);
        assert_eq!(state.payload, PayloadRange::new(2000.0, 4000.0));
        assert_eq!(state.pie().cloned(), pie_before);
        assert_eq!(
            state.scatter(),
            Some(&payload_correlation(
                &state.table,
                &SiteSelection::All,
                PayloadRange::new(2000.0, 4000.0)
            ))
        );
    }

    #[test]
    fn payload_ends_are_ordered_and_clamped() {
        let mut state = state();
        state.set_payload(20_000.0, 1_400.0);
        assert_eq!(state.payload, PayloadRange::new(1000.0, 9600.0));
        state.set_payload(-50.0, 0.0);
        assert_eq!(state.payload, PayloadRange::new(0.0, 0.0));
    }

    #[test]
    fn snapping_keeps_max_reachable() {
        assert_eq!(snap_to_step(9400.0, 0.0, 9600.0, 1000.0), 9000.0);
        assert_eq!(snap_to_step(9599.0, 0.0, 9600.0, 1000.0), 9600.0);
        assert_eq!(snap_to_step(9700.0, 0.0, 9600.0, 1000.0), 9600.0);
        assert_eq!(snap_to_step(1499.0, 0.0, 9600.0, 1000.0), 1000.0);
        assert_eq!(snap_to_step(3500.0, 500.0, 9600.0, 1000.0), 3500.0);
    }

    #[test]
    fn search_filters_site_options() {
        let mut state = state();
        state.site_search = "b".into();
        let labels: Vec<&str> = state
            .visible_site_options()
            .iter()
            .map(|o| o.label.as_str())
            .collect();
        assert_eq!(labels, ["B"]);
        state.site_search.clear();
        assert_eq!(state.visible_site_options().len(), 3);
    }

    #[test]
    fn failure_is_not_cleared_by_a_later_success_in_the_same_pass() {
        fn broken(_: &LaunchTable, _: &CallbackInputs) -> Result<Figure, CallbackError> {
            Err(CallbackError::MissingInput("gauge"))
        }
        fn fine(_: &LaunchTable, _: &CallbackInputs) -> Result<Figure, CallbackError> {
            Ok(Figure::new("ok"))
        }
        let pass = [
            Binding::new("broken-chart", &[SITE_DROPDOWN], broken),
            Binding::new("fine-chart", &[SITE_DROPDOWN], fine),
        ];

        let mut state = state();
        state.run_pass(&pass);
        assert_eq!(
            state.status_message.as_deref(),
            Some("Error: missing value for input 'gauge'")
        );
        assert!(state.figure("fine-chart").is_some());

        state.run_pass(&pass[1..]);
        assert!(state.status_message.is_none());
    }
}
