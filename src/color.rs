use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::charts::SeriesKey;
use crate::data::model::CellValue;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hue: f32, saturation: f32, lightness: f32) -> Color32 {
    let rgb: Srgb = Hsl::new(hue, saturation, lightness).into_color();
    Color32::from_rgb(
        (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
        (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    (0..n)
        .map(|i| hsl_to_color32((210.0 + (i as f32 / n as f32) * 360.0) % 360.0, 0.75, 0.55))
        .collect()
}

/// Colour `index` of an `of`-step sequential ramp from dark violet to light yellow.
pub fn sequential(index: usize, of: usize) -> Color32 {
    let t = if of > 1 {
        index as f32 / (of - 1) as f32
    } else {
        0.0
    };
    hsl_to_color32(260.0 - 200.0 * t, 0.7, 0.35 + 0.3 * t)
}

/// Blue for -1, white for 0, red for +1; grey for NaN.
pub fn diverging(r: f64) -> Color32 {
    if r.is_nan() {
        return Color32::from_gray(160);
    }
    let r = r.clamp(-1.0, 1.0) as f32;
    let hue = if r < 0.0 { 220.0 } else { 5.0 };
    hsl_to_color32(hue, 0.75, 1.0 - 0.5 * r.abs())
}

// ---------------------------------------------------------------------------
// Color mapping: cell value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct values of a chosen column to distinct colours.
///
/// Built from the full dataset so a value keeps its colour whatever the
/// filters hide.
#[derive(Debug, Clone)]
pub struct ColorMap {
    pub column: String,
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Build a colour map for the given column from its distinct values.
    pub fn new(column: &str, unique_values: &BTreeSet<CellValue>) -> Self {
        let palette = generate_palette(unique_values.len());
        let mapping: BTreeMap<CellValue, Color32> = unique_values
            .iter()
            .zip(palette)
            .map(|(v, c)| (v.clone(), c))
            .collect();

        ColorMap {
            column: column.to_string(),
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a given cell value.
    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Colour of a chart series.
    pub fn series_color(&self, key: &SeriesKey) -> Color32 {
        match key {
            SeriesKey::Value(value) => self.color_for(value),
            SeriesKey::Band { index, of } => sequential(*index, *of),
            SeriesKey::Single => Color32::LIGHT_BLUE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colours_are_distinct() {
        let colors = generate_palette(5);
        let unique: BTreeSet<[u8; 4]> = colors.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 5);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_values_fall_back_to_grey() {
        let values: BTreeSet<CellValue> = ["No", "Yes"].into_iter().map(CellValue::from).collect();
        let map = ColorMap::new("Attrition", &values);
        assert_ne!(map.color_for(&CellValue::from("No")), map.color_for(&CellValue::from("Yes")));
        assert_eq!(map.color_for(&CellValue::from("Maybe")), Color32::GRAY);
    }

    #[test]
    fn diverging_scale_is_white_at_zero() {
        assert_eq!(diverging(0.0), Color32::WHITE);
        assert_ne!(diverging(1.0), diverging(-1.0));
    }
}
