use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{FromColor, Hsl, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Hue step between consecutive values.
const GOLDEN_ANGLE: f32 = 137.507_77;

/// Chip colours for `n` facet values. Neighbouring values in the sorted
/// index land far apart on the hue wheel and alternate between two
/// lightness bands.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| {
            let lightness = if i % 2 == 0 { 0.42 } else { 0.52 };
            let hsl = Hsl::new((i as f32 * GOLDEN_ANGLE) % 360.0, 0.55, lightness);
            let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsl).into_format();
            Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: facet value → Color32
// ---------------------------------------------------------------------------

/// Maps the values of one facet (health regions) to chip colours.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
}

impl ColorMap {
    pub fn new(values: &[String]) -> Self {
        let mapping = values
            .iter()
            .cloned()
            .zip(generate_palette(values.len()))
            .collect();
        ColorMap { mapping }
    }

    /// Colour for `value`, grey for anything outside the index.
    pub fn color_for(&self, value: &str) -> Color32 {
        self.mapping.get(value).copied().unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size_and_distinct_colors() {
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_values_are_grey() {
        let map = ColorMap::new(&["North".to_string(), "South".to_string()]);
        assert_ne!(map.color_for("North"), map.color_for("South"));
        assert_eq!(map.color_for("West"), Color32::GRAY);
    }
}
