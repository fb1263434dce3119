use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            hsl_to_color32(hsl)
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Color mapping: group label → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct GROUP_EN labels to distinct colours for the scatter.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map from the sorted set of group labels.
    pub fn new(labels: &BTreeSet<String>) -> Self {
        let palette = generate_palette(labels.len());
        let mapping: BTreeMap<String, Color32> = labels
            .iter()
            .zip(palette.into_iter())
            .map(|(label, c): (&String, Color32)| (label.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a group label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Continuous scales for the heatmap and bar chart
// ---------------------------------------------------------------------------

/// Diverging blue↔red scale for a correlation coefficient in [-1, 1].
/// NaN (zero-variance column) renders as neutral grey.
pub fn diverging_color(r: f64) -> Color32 {
    if r.is_nan() {
        return Color32::GRAY;
    }
    let t = (r.clamp(-1.0, 1.0) as f32 + 1.0) / 2.0;
    // Hue 240° (blue) down to 0° (red), washed out around zero.
    let hue = 240.0 * (1.0 - t);
    let saturation = 0.65;
    let lightness = 0.85 - 0.35 * (2.0 * t - 1.0).abs();
    hsl_to_color32(Hsl::new(hue, saturation, lightness))
}

/// Sequential blue scale for a value normalised to [0, 1], used to tint the
/// area bars by their mean transaction value.
pub fn sequential_color(t: f64) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    hsl_to_color32(Hsl::new(215.0, 0.70, 0.80 - 0.45 * t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_yields_distinct_colors() {
        let palette = generate_palette(8);
        assert_eq!(palette.len(), 8);
        for (i, a) in palette.iter().enumerate() {
            for b in &palette[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn color_map_falls_back_for_unknown_labels() {
        let labels: BTreeSet<String> = ["Sales", "Mortgages"].iter().map(|s| s.to_string()).collect();
        let map = ColorMap::new(&labels);
        assert_ne!(map.color_for("Sales"), map.color_for("Mortgages"));
        assert_eq!(map.color_for("Gifts"), Color32::GRAY);
    }

    #[test]
    fn diverging_scale_separates_the_extremes() {
        assert_ne!(diverging_color(-1.0), diverging_color(1.0));
        assert_eq!(diverging_color(f64::NAN), Color32::GRAY);
    }
}
