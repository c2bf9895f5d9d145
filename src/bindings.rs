use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::callbacks::{payload_correlation, site_summary};
use crate::chart::Figure;
use crate::data::filter::{PayloadRange, SiteSelection};
use crate::data::model::LaunchTable;
use crate::layout::{
    PAYLOAD_SLIDER, SITE_DROPDOWN, SUCCESS_PAYLOAD_SCATTER_CHART, SUCCESS_PIE_CHART,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A callback request that cannot be evaluated.
#[derive(Debug, Error)]
pub enum CallbackError {
    #[error("no callback produces output '{0}'")]
    UnknownOutput(String),
    #[error("missing value for input '{0}'")]
    MissingInput(&'static str),
    #[error("invalid value for input '{id}'")]
    InvalidInput {
        id: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Current values of the input widgets, keyed by widget id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackInputs(HashMap<String, JsonValue>);

impl CallbackInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: &str, value: impl Into<JsonValue>) -> Self {
        self.0.insert(id.to_string(), value.into());
        self
    }

    fn get<T: DeserializeOwned>(&self, id: &'static str) -> Result<T, CallbackError> {
        let raw = self.0.get(id).ok_or(CallbackError::MissingInput(id))?;
        T::deserialize(raw).map_err(|source| CallbackError::InvalidInput { id, source })
    }

    pub fn site(&self) -> Result<SiteSelection, CallbackError> {
        self.get(SITE_DROPDOWN)
    }

    pub fn payload(&self) -> Result<PayloadRange, CallbackError> {
        self.get(PAYLOAD_SLIDER)
    }
}

// ---------------------------------------------------------------------------
// Binding registry
// ---------------------------------------------------------------------------

pub type CallbackFn = fn(&LaunchTable, &CallbackInputs) -> Result<Figure, CallbackError>;

/// One reactive binding: whenever any input widget changes, `run` produces
/// the replacement figure for the output widget.
pub struct Binding {
    pub output: &'static str,
    pub inputs: &'static [&'static str],
    run: CallbackFn,
}

/// Serializable view of a [`Binding`], published in the page layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BindingSpec {
    pub output: &'static str,
    pub inputs: &'static [&'static str],
}

impl Binding {
    pub const fn new(
        output: &'static str,
        inputs: &'static [&'static str],
        run: CallbackFn,
    ) -> Self {
        Self {
            output,
            inputs,
            run,
        }
    }

    pub fn spec(&self) -> BindingSpec {
        BindingSpec {
            output: self.output,
            inputs: self.inputs,
        }
    }

    pub fn run(
        &self,
        table: &LaunchTable,
        inputs: &CallbackInputs,
    ) -> Result<Figure, CallbackError> {
        (self.run)(table, inputs)
    }

    /// Whether a change of widget `id` should re-run this binding.
    pub fn depends_on(&self, id: &str) -> bool {
        self.inputs.iter().any(|input| *input == id)
    }
}

pub static BINDINGS: [Binding; 2] = [
    Binding::new(SUCCESS_PIE_CHART, &[SITE_DROPDOWN], update_pie_chart),
    Binding::new(
        SUCCESS_PAYLOAD_SCATTER_CHART,
        &[SITE_DROPDOWN, PAYLOAD_SLIDER],
        update_scatter_chart,
    ),
];

fn update_pie_chart(table: &LaunchTable, inputs: &CallbackInputs) -> Result<Figure, CallbackError> {
    Ok(site_summary(table, &inputs.site()?))
}

fn update_scatter_chart(
    table: &LaunchTable,
    inputs: &CallbackInputs,
) -> Result<Figure, CallbackError> {
    Ok(payload_correlation(table, &inputs.site()?, inputs.payload()?))
}

/// Evaluate the binding that owns `output`.
pub fn dispatch(
    table: &LaunchTable,
    output: &str,
    inputs: &CallbackInputs,
) -> Result<Figure, CallbackError> {
    let binding = BINDINGS
        .iter()
        .find(|b| b.output == output)
        .ok_or_else(|| CallbackError::UnknownOutput(output.to_string()))?;
    binding.run(table, inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::Trace;
    use crate::data::model::tests::two_site_table;
    use serde_json::json;

    #[test]
    fn dispatches_by_output_id() {
        let table = two_site_table();
        let inputs = CallbackInputs::new()
            .with(SITE_DROPDOWN, "A")
            .with(PAYLOAD_SLIDER, json!([0, 9600]));

        let pie = dispatch(&table, SUCCESS_PIE_CHART, &inputs).unwrap();
        assert_eq!(pie, site_summary(&table, &SiteSelection::Site("A".into())));

        let scatter = dispatch(&table, SUCCESS_PAYLOAD_SCATTER_CHART, &inputs).unwrap();
        assert!(scatter.data.iter().all(|t| matches!(t, Trace::Scatter(_))));
        assert_eq!(
            scatter,
            payload_correlation(
                &table,
                &SiteSelection::Site("A".into()),
                PayloadRange::new(0.0, 9600.0)
            )
        );
    }

    #[test]
    fn pie_ignores_slider_input() {
        let table = two_site_table();
        let inputs = CallbackInputs::new().with(SITE_DROPDOWN, "ALL");
        assert!(dispatch(&table, SUCCESS_PIE_CHART, &inputs).is_ok());
    }

    #[test]
    fn reports_unknown_output_and_bad_inputs() {
        let table = two_site_table();
        let inputs = CallbackInputs::new().with(SITE_DROPDOWN, "ALL");

        assert!(matches!(
            dispatch(&table, "no-such-chart", &inputs),
            Err(CallbackError::UnknownOutput(_))
        ));
        assert!(matches!(
            dispatch(&table, SUCCESS_PAYLOAD_SCATTER_CHART, &inputs),
            Err(CallbackError::MissingInput(PAYLOAD_SLIDER))
        ));

        let bad = inputs.with(PAYLOAD_SLIDER, json!([1, 2, 3]));
        assert!(matches!(
            dispatch(&table, SUCCESS_PAYLOAD_SCATTER_CHART, &bad),
            Err(CallbackError::InvalidInput { id: PAYLOAD_SLIDER, .. })
        ));
    }

    #[test]
    fn bindings_declare_their_inputs() {
        let scatter = &BINDINGS[1];
        assert!(scatter.depends_on(SITE_DROPDOWN));
        assert!(scatter.depends_on(PAYLOAD_SLIDER));
        assert!(!BINDINGS[0].depends_on(PAYLOAD_SLIDER));
    }
}
