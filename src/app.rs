use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::LaunchTable;
use crate::layout::DASHBOARD_TITLE;
use crate::state::AppState;
use crate::ui::{panels, plot};

const TITLE_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub state: AppState,
}

impl LaunchDashApp {
    pub fn new(table: Arc<LaunchTable>) -> Self {
        Self {
            state: AppState::new(table),
        }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: site dropdown + payload slider ----
        egui::SidePanel::left("controls_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: both charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    ui.vertical_centered(|ui: &mut Ui| {
                        ui.label(RichText::new(DASHBOARD_TITLE).size(40.0).color(TITLE_COLOR));
                    });
                    ui.add_space(8.0);
                    if let Some(fig) = self.state.pie() {
                        plot::pie_chart(ui, fig);
                    }
                    ui.separator();
                    if let Some(fig) = self.state.scatter() {
                        plot::scatter_chart(ui, fig);
                    }
                });
        });
    }
}
