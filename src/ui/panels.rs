use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::SiteSelection;
use crate::layout::{PAYLOAD_LABEL, SITE_PLACEHOLDER};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – input widgets
// ---------------------------------------------------------------------------

/// Render the site dropdown and the payload range slider.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Launch Site");
    ui.separator();

    ui.add(egui::TextEdit::singleline(&mut state.site_search).hint_text(SITE_PLACEHOLDER));

    let selected_label = state
        .site_options
        .iter()
        .find(|opt| opt.value == state.site.value())
        .map(|opt| opt.label.clone())
        .unwrap_or_else(|| state.site.label().to_string());

    let mut picked: Option<SiteSelection> = None;
    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(selected_label)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in state.visible_site_options() {
                let is_selected = opt.value == state.site.value();
                if ui.selectable_label(is_selected, &opt.label).clicked() {
                    picked = Some(SiteSelection::parse(&opt.value));
                }
            }
        });
    if let Some(site) = picked {
        state.set_site(site);
    }

    ui.add_space(12.0);
    ui.strong(PAYLOAD_LABEL);

    let (min, max) = (state.table.min_payload(), state.table.max_payload());
    let mut low = state.payload.low;
    let mut high = state.payload.high;
    // No `step_by`: it would make an off-step maximum unreachable. Values
    // are snapped by `set_payload` instead, so a drag shows raw values.
    let low_changed = ui
        .add(egui::Slider::new(&mut low, min..=max).text("from"))
        .changed();
    let high_changed = ui
        .add(egui::Slider::new(&mut high, min..=max).text("to"))
        .changed();
    if low_changed || high_changed {
        state.set_payload(low, high);
    }

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("{min:.0}"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            ui.label(format!("{max:.0}"));
        });
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the status bar: record counts and the last callback error.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!(
            "{} launches from {} sites",
            state.table.len(),
            state.table.sites().len()
        ));

        ui.separator();

        ui.label(format!(
            "Selected: {}, {:.0}–{:.0} kg",
            state.site.label(),
            state.payload.low,
            state.payload.high
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}
