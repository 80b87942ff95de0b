use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Company colours
// ---------------------------------------------------------------------------

/// `n` distinct colours with evenly spaced hues, tuned for a dark background.
pub fn company_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let hue = 200.0 + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.70, 0.60);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

/// Fixed company → colour assignment shared by the map and every chart.
#[derive(Debug, Clone, Default)]
pub struct CompanyColors {
    mapping: BTreeMap<String, Color32>,
}

impl CompanyColors {
    /// Assign colours in the order companies appear in the dataset.
    pub fn new(companies: &[String]) -> Self {
        let mapping = companies
            .iter()
            .cloned()
            .zip(company_palette(companies.len()))
            .collect();
        CompanyColors { mapping }
    }

    pub fn color_for(&self, company: &str) -> Color32 {
        self.mapping.get(company).copied().unwrap_or(Color32::GRAY)
    }
}
