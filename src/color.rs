use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Lift;

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
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Leading slice colours of the sex distribution chart.
pub const DISTRIBUTION_BASE: [Color32; 2] = [Color32::BLUE, Color32::RED];

/// Bar colour of a lift's ranking chart.
pub fn lift_color(lift: Lift) -> Color32 {
    match lift {
        Lift::Squat | Lift::Deadlift => Color32::BLUE,
        Lift::Bench => Color32::RED,
    }
}

// ---------------------------------------------------------------------------
// Color mapping: category label → Color32
// ---------------------------------------------------------------------------

/// Maps category labels to colours: the `base` colours in order, then
/// generated hues for any labels beyond them.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a, I>(labels: I, base: &[Color32]) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let labels: Vec<&str> = labels.into_iter().collect();
        let extra = generate_palette(labels.len().saturating_sub(base.len()));
        let mapping = labels
            .into_iter()
            .zip(base.iter().copied().chain(extra))
            .map(|(label, color)| (label.to_string(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_length() {
        assert!(generate_palette(0).is_empty());
        let colours = generate_palette(5);
        assert_eq!(colours.len(), 5);
        assert_ne!(colours[0], colours[1]);
    }

    #[test]
    fn base_colours_come_first() {
        let map = ColorMap::new(["M", "F", "Mx"], &DISTRIBUTION_BASE);
        assert_eq!(map.color_for("M"), Color32::BLUE);
        assert_eq!(map.color_for("F"), Color32::RED);
        assert_ne!(map.color_for("Mx"), Color32::GRAY);
        assert_eq!(map.color_for("unknown"), Color32::GRAY);
    }
}
