use std::collections::{BTreeMap, BTreeSet};

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

/// Single-hue ramp for heatmap cells: `t = 0` is pale, `t = 1` is dark.
pub fn heat_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    hsl_to_color32(Hsl::new(210.0, 0.7, 0.9 - 0.6 * t))
}

// ---------------------------------------------------------------------------
// Color mapping: genre → Color32
// ---------------------------------------------------------------------------

/// Stable colour per genre, shared by every chart so a genre keeps its
/// colour whatever the selection.
#[derive(Debug, Clone, Default)]
pub struct GenreColors {
    mapping: BTreeMap<String, Color32>,
}

impl GenreColors {
    pub fn new(genres: &BTreeSet<String>) -> Self {
        let mapping = genres
            .iter()
            .cloned()
            .zip(generate_palette(genres.len()))
            .collect();
        GenreColors { mapping }
    }

    pub fn color_for(&self, genre: &str) -> Color32 {
        self.mapping.get(genre).copied().unwrap_or(Color32::GRAY)
    }
}

/// Display label for a genre token; the empty token reads as "(none)".
pub fn genre_label(genre: &str) -> &str {
    if genre.is_empty() {
        "(none)"
    } else {
        genre
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_colours() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        let unique: BTreeSet<_> = palette.iter().map(|c| c.to_array()).collect();
        assert_eq!(unique.len(), 6);
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn unknown_genre_is_grey() {
        let genres: BTreeSet<String> = ["Action", "Drama"].iter().map(|s| s.to_string()).collect();
        let colors = GenreColors::new(&genres);
        assert_ne!(colors.color_for("Action"), colors.color_for("Drama"));
        assert_eq!(colors.color_for("Western"), Color32::GRAY);
    }

    #[test]
    fn heat_ramp_darkens() {
        let pale = heat_color(0.0);
        let dark = heat_color(1.0);
        assert!(pale.r() as u32 + pale.g() as u32 > dark.r() as u32 + dark.g() as u32);
    }
}
