use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::CellValue;

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

// ---------------------------------------------------------------------------
// Color mapping: cluster value → Color32
// ---------------------------------------------------------------------------

/// Maps the distinct cluster values to distinct colours, used to tint the
/// cluster column and the filter entries.
#[derive(Debug, Clone)]
pub struct ClusterColors {
    mapping: BTreeMap<CellValue, Color32>,
    default_color: Color32,
}

impl ClusterColors {
    pub fn new(unique_values: &BTreeSet<CellValue>) -> Self {
        let palette = generate_palette(unique_values.len());
        let mapping = unique_values
            .iter()
            .cloned()
            .zip(palette)
            .collect();

        ClusterColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, value: &CellValue) -> Color32 {
        self.mapping
            .get(value)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_values_get_distinct_colors() {
        let values: BTreeSet<CellValue> = ["서울", "부산", "대전"]
            .iter()
            .map(|s| CellValue::String(s.to_string()))
            .collect();
        let colors = ClusterColors::new(&values);

        let assigned: BTreeSet<_> = values
            .iter()
            .map(|v| {
                let c = colors.color_for(v);
                (c.r(), c.g(), c.b())
            })
            .collect();
        assert_eq!(assigned.len(), values.len());
    }

    #[test]
    fn unknown_values_fall_back_to_gray() {
        let colors = ClusterColors::new(&BTreeSet::new());
        assert_eq!(
            colors.color_for(&CellValue::String("x".into())),
            Color32::GRAY
        );
    }
}
