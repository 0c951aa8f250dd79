use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ClusterHoursApp {
    pub state: AppState,
}

impl ClusterHoursApp {
    /// Resolves credentials and runs the first load before the first frame.
    pub fn new() -> Self {
        Self {
            state: AppState::new(),
        }
    }
}

impl Default for ClusterHoursApp {
    fn default() -> Self {
        Self::new()
    }
}

impl eframe::App for ClusterHoursApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: locator + reload ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: cluster filter ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: table + metric ----
        egui::CentralPanel::default().show(ctx, |ui| {
            table::central_panel(ui, &self.state);
        });
    }
}
