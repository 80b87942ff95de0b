use std::path::Path;

use eframe::egui::{self, ScrollArea, Ui};

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    /// Build the app and load the startup dataset.
    pub fn new(data_path: &Path) -> Self {
        let mut state = AppState::default();
        state.open(data_path);
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Apply this frame's control changes before drawing. The top bar
        // already showed the old counts, so ask for one more frame.
        if self.state.refresh() {
            ctx.request_repaint();
        }

        // ---- Central panel: metrics, map, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.dataset.is_none() {
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.heading("Open a file to explore locations  (File → Open…)");
                });
                return;
            }
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| dashboard(ui, &self.state));
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    ui.heading("Big Tech Data Center Dashboard");
    ui.add_space(6.0);
    panels::metrics(ui, state);
    ui.add_space(6.0);

    plot::location_map(ui, state);

    ui.add_space(12.0);
    ui.heading("Company Presence by Country");
    plot::company_country_chart(ui, state);

    ui.add_space(12.0);
    ui.heading("Market Share by Company");
    plot::market_share_chart(ui, state);

    ui.add_space(12.0);
    ui.heading("Distribution of Openings by Year");
    plot::year_histogram_chart(ui, state);

    ui.add_space(12.0);
    table::data_table(ui, state);
}
