use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

const HEADERS: [&str; 5] = ["City", "Country", "Opened Year", "Company", "Location"];

/// Row-level table of the rows behind the metrics.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let rows = &state.table_rows;
    if rows.is_empty() {
        ui.weak("No locations match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(360.0)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(100.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in HEADERS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                for text in [&r.city, &r.country, &r.opened, &r.company, &r.location] {
                    row.col(|ui: &mut Ui| {
                        ui.label(text.as_str());
                    });
                }
            });
        });
}
