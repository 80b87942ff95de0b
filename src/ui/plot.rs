use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{
    uniform_grid_spacer, Bar, BarChart, Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;

/// Largest wedge drawn as a single polygon; polygons must stay convex.
const MAX_WEDGE: f64 = TAU / 8.0;

// ---------------------------------------------------------------------------
// Map (central panel)
// ---------------------------------------------------------------------------

/// Scatter of the filtered locations in lon/lat space, one series per company.
pub fn location_map(ui: &mut Ui, state: &AppState) {
    Plot::new("location_map")
        .legend(Legend::default())
        .height(CHART_HEIGHT + 80.0)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(80.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .show(ui, |plot_ui| {
            let Some(ds) = &state.dataset else {
                return;
            };
            for company in &ds.companies {
                let points: PlotPoints = state
                    .map_points
                    .iter()
                    .filter(|p| &p.company == company)
                    .map(|p| [p.lon, p.lat])
                    .collect();
                if points.points().is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(points)
                        .name(company)
                        .color(state.colors.color_for(company))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(3.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Company presence by country (stacked bars)
// ---------------------------------------------------------------------------

pub fn company_country_chart(ui: &mut Ui, state: &AppState) {
    let matrix = &state.summary.company_country_matrix;

    let mut charts: Vec<BarChart> = Vec::with_capacity(matrix.companies.len());
    for company in &matrix.companies {
        let bars: Vec<Bar> = matrix
            .company_column(company)
            .into_iter()
            .enumerate()
            .map(|(i, n)| {
                Bar::new(i as f64, n as f64)
                    .width(0.6)
                    .name(&matrix.countries[i])
            })
            .collect();

        let below: Vec<&BarChart> = charts.iter().collect();
        let chart = BarChart::new(bars)
            .name(company)
            .color(state.colors.color_for(company))
            .stack_on(&below);
        charts.push(chart);
    }

    let tallest = matrix.country_totals().into_iter().max().unwrap_or(0);
    let countries = matrix.countries.clone();
    Plot::new("company_country_chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .include_y(0.0)
        .include_y(tallest as f64 + 1.0)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Country")
        .y_axis_label("Number of Locations")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 25.0]))
        .x_axis_formatter(move |mark, _range| category_label(&countries, mark.value))
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Label of the category at integer position `x`, empty between categories.
fn category_label(categories: &[String], x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    categories.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Market share (pie)
// ---------------------------------------------------------------------------

/// A pie slice in radians. Slices start at 12 o'clock and run
/// counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
struct Slice {
    start: f64,
    sweep: f64,
}

fn pie_slices(shares: &[f64]) -> Vec<Slice> {
    let mut start = FRAC_PI_2;
    shares
        .iter()
        .map(|&share| {
            let sweep = share * TAU;
            let slice = Slice { start, sweep };
            start += sweep;
            slice
        })
        .collect()
}

/// Convex polygons (center + arc) that together cover one slice.
fn wedges(slice: &Slice) -> Vec<Vec<[f64; 2]>> {
    let pieces = (slice.sweep / MAX_WEDGE).ceil().max(1.0) as usize;
    let step = slice.sweep / pieces as f64;
    (0..pieces)
        .map(|p| {
            let a0 = slice.start + p as f64 * step;
            let mut pts = vec![[0.0, 0.0]];
            let segments = 12;
            for s in 0..=segments {
                let a = a0 + step * s as f64 / segments as f64;
                pts.push([a.cos(), a.sin()]);
            }
            pts
        })
        .collect()
}

pub fn market_share_chart(ui: &mut Ui, state: &AppState) {
    let counts = &state.summary.company_counts;
    let shares: Vec<f64> = counts.iter().map(|c| c.share).collect();
    let slices = pie_slices(&shares);

    Plot::new("market_share_chart")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid([false, false])
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.4)
        .include_x(1.4)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            for (entry, slice) in counts.iter().zip(&slices) {
                let color = state.colors.color_for(&entry.company);
                for wedge in wedges(slice) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(wedge))
                            .name(&entry.company)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::from_gray(30))),
                    );
                }

                let mid = slice.start + slice.sweep / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                        format!("{:.1}%", entry.share * 100.0),
                    )
                    .color(Color32::BLACK),
                );
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                        entry.company.as_str(),
                    )
                    .color(Color32::WHITE),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Openings per year (histogram)
// ---------------------------------------------------------------------------

pub fn year_histogram_chart(ui: &mut Ui, state: &AppState) {
    let Some(hist) = &state.summary.year_histogram else {
        ui.weak("No openings with a known year in the current selection.");
        return;
    };

    let bars: Vec<Bar> = hist
        .buckets()
        .map(|(year, n)| {
            Bar::new(year as f64, n as f64)
                .width(1.0)
                .name(year)
                .fill(Color32::from_rgb(0, 255, 255))
                .stroke(Stroke::new(1.0, Color32::BLACK))
        })
        .collect();

    let first = hist.first_year;
    let last = hist.last_year();
    ui.weak(format!("{} openings between {first} and {last}", hist.total()));
    Plot::new("year_histogram_chart")
        .height(CHART_HEIGHT)
        .include_x(first as f64 - 0.5)
        .include_x(last as f64 + 0.5)
        .allow_drag(false)
        .allow_scroll(false)
        .x_axis_label("Year")
        .y_axis_label("Number of Openings")
        .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 25.0]))
        .x_axis_formatter(move |mark, _range| year_tick(first, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Openings"));
        });
}

/// Tick label every 5 years counted from the first bucket.
fn year_tick(first_year: i32, x: f64) -> String {
    let year = x.round();
    if (x - year).abs() > 1e-6 {
        return String::new();
    }
    let year = year as i32;
    if year >= first_year && (year - first_year) % 5 == 0 {
        year.to_string()
    } else {
        String::new()
    }
}
