use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

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
            let hsl = Hsl::new(hue, 0.65, 0.45);
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
// Ordinal colour scale: category key → Color32
// ---------------------------------------------------------------------------

/// Maps a fixed, ordered list of category keys to distinct colours.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    entries: Vec<(String, Color32)>,
    default_color: Color32,
}

impl CategoryColors {
    /// Build a colour scale over `keys`, preserving their order.
    pub fn new<S: AsRef<str>>(keys: &[S]) -> Self {
        let palette = generate_palette(keys.len());
        let entries = keys
            .iter()
            .zip(palette)
            .map(|(k, c)| (k.as_ref().to_string(), c))
            .collect();

        CategoryColors {
            entries,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a category key.
    pub fn color_for(&self, key: &str) -> Color32 {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }

    /// Legend entries (key → colour) in domain order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.entries.clone()
    }
}

// ---------------------------------------------------------------------------
// Sequential ramp for the choropleth
// ---------------------------------------------------------------------------

/// Interpolate between two anchor colours in linear RGB. `t` is expected in
/// [0, 1]; values outside are clamped (a colour ramp has no off-canvas).
pub fn sequential_ramp(t: f64, low: Color32, high: Color32) -> Color32 {
    let t = t.clamp(0.0, 1.0) as f32;
    let a: LinSrgb = Srgb::new(
        low.r() as f32 / 255.0,
        low.g() as f32 / 255.0,
        low.b() as f32 / 255.0,
    )
    .into_color();
    let b: LinSrgb = Srgb::new(
        high.r() as f32 / 255.0,
        high.g() as f32 / 255.0,
        high.b() as f32 / 255.0,
    )
    .into_color();
    let mixed: Srgb = a.mix(b, t).into_color();
    Color32::from_rgb(
        (mixed.red * 255.0) as u8,
        (mixed.green * 255.0) as u8,
        (mixed.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let p = generate_palette(6);
        assert_eq!(p.len(), 6);
        for i in 0..p.len() {
            for j in (i + 1)..p.len() {
                assert_ne!(p[i], p[j]);
            }
        }
    }

    #[test]
    fn category_colors_are_stable_and_keyed() {
        let keys = ["Africa", "Asia", "Europe"];
        let scale = CategoryColors::new(&keys);
        assert_eq!(scale.color_for("Asia"), scale.color_for("Asia"));
        assert_ne!(scale.color_for("Asia"), scale.color_for("Europe"));
        assert_eq!(scale.color_for("Atlantis"), Color32::GRAY);
        let legend = scale.legend_entries();
        assert_eq!(legend.len(), 3);
        assert_eq!(legend[0].0, "Africa");
    }

    #[test]
    fn ramp_clamps_and_hits_anchors() {
        let low = Color32::from_rgb(255, 245, 235);
        let high = Color32::from_rgb(127, 39, 4);
        assert_eq!(sequential_ramp(0.0, low, high), low);
        let end = sequential_ramp(1.0, low, high);
        assert!((end.r() as i32 - high.r() as i32).abs() <= 1);
        assert_eq!(sequential_ramp(2.0, low, high), end);
    }
}
