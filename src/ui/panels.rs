use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::export::export_summary;
use crate::state::{AppState, FilterColumn};

const DATASET_URL: &str =
    "https://www.kaggle.com/datasets/farnazamiri/datacentermap-toptechcompanies/data";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            multi_select(ui, state, FilterColumn::Company, true);
            multi_select(ui, state, FilterColumn::Continent, false);
            multi_select(ui, state, FilterColumn::Country, false);
            ui.separator();

            year_range(ui, state);
            ui.separator();

            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
            ui.add_space(8.0);
            ui.hyperlink_to("Download Full Dataset on Kaggle", DATASET_URL);
        });
}

/// Collapsible checkbox list for one column.
fn multi_select(ui: &mut Ui, state: &mut AppState, column: FilterColumn, default_open: bool) {
    let options = state.options(column).to_vec();
    let n_selected = state.selection(column).len();
    let header_text = format!("{}  ({n_selected}/{})", column.label(), options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(column.label())
        .default_open(default_open)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(column);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(column);
                }
            });

            if column != FilterColumn::Company && state.selection(column).is_empty() {
                ui.weak("Nothing selected: no restriction");
            }

            for value in &options {
                let mut checked = state.selection(column).contains(value);
                let mut text = RichText::new(value);
                if column == FilterColumn::Company {
                    text = text.color(state.colors.color_for(value));
                }
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle(column, value);
                }
            }
        });
}

fn year_range(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Year opened");
    let (min, max) = state.year_bounds();
    let (mut lo, mut hi) = state.criteria.year_range;

    let from = ui.add(egui::Slider::new(&mut lo, min..=max).text("from"));
    let to = ui.add(egui::Slider::new(&mut hi, min..=max).text("to"));
    if from.changed() || to.changed() {
        // Dragging "from" past "to" pushes "to" along.
        if from.changed() && lo > hi {
            hi = lo;
        }
        state.set_year_range(lo, hi);
    }
    if min == 0 {
        ui.weak("Year 0 marks an unknown opening date");
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui
                .add_enabled(state.source_path().is_some(), egui::Button::new("Reload"))
                .clicked()
            {
                state.reload();
                ui.close_menu();
            }
            if ui
                .add_enabled(state.dataset.is_some(), egui::Button::new("Export summary…"))
                .clicked()
            {
                export_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} locations loaded, {} match filters, {} with a known opening year",
                ds.len(),
                state.filtered.len(),
                state.valid.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Metric cards
// ---------------------------------------------------------------------------

pub fn metrics(ui: &mut Ui, state: &AppState) {
    let s = &state.summary;
    let cards = [
        ("Total Locations", s.total_locations),
        ("Countries Covered", s.countries_covered),
        ("Companies Represented", s.companies_represented),
    ];
    ui.columns(cards.len(), |cols| {
        for (col, (label, value)) in cols.iter_mut().zip(cards) {
            col.group(|ui: &mut Ui| {
                ui.set_min_width(ui.available_width());
                ui.label(label);
                ui.label(RichText::new(value.to_string()).size(28.0).strong());
            });
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open data center locations")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}

pub fn export_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export summary")
        .add_filter("JSON", &["json"])
        .set_file_name("summary.json")
        .save_file();

    if let Some(path) = file {
        if let Err(e) = export_summary(&path, &state.summary_export()) {
            log::error!("Failed to export summary: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
