use eframe::egui::{Align2, Color32, RichText};
use egui_plot::{MarkerShape, PlotPoint, PlotUi, Points, Text};

// ---------------------------------------------------------------------------
// Fixed callout labels over specific data points
// ---------------------------------------------------------------------------

/// Country codes every annotated chart highlights. Codes absent from a
/// chart's dataset are skipped.
pub const HIGHLIGHT_CODES: [&str; 4] = ["RUS", "USA", "KWT", "PAK"];

/// A callout anchored near one data point. `dx`/`dy` are screen-pixel
/// offsets from the anchor, positive `dy` pointing down.
#[derive(Debug, Clone)]
pub struct Callout {
    pub title: String,
    pub label: String,
    pub dx: f32,
    pub dy: f32,
    /// Draw a ring around the anchored point (the trend chart's style).
    pub circled: bool,
}

/// Which side of the offset position the text block attaches to.
fn anchor_for(dx: f32, dy: f32) -> Align2 {
    if dx < 0.0 {
        Align2::RIGHT_CENTER
    } else if dx > 0.0 {
        Align2::LEFT_CENTER
    } else if dy > 0.0 {
        Align2::CENTER_TOP
    } else {
        Align2::CENTER_BOTTOM
    }
}

/// Draw `callout` anchored at `anchor` (plot coordinates).
pub fn draw(plot_ui: &mut PlotUi, anchor: [f64; 2], callout: &Callout) {
    let (ux, uy) = super::units_per_px(plot_ui);

    if callout.circled {
        plot_ui.points(
            Points::new(vec![anchor])
                .shape(MarkerShape::Circle)
                .filled(false)
                .radius(14.0)
                .color(Color32::GRAY),
        );
    }

    // Screen y grows downward, plot y upward.
    let pos = PlotPoint::new(
        anchor[0] + callout.dx as f64 * ux,
        anchor[1] - callout.dy as f64 * uy,
    );
    let body = format!("{}\n{}", callout.title, callout.label);
    plot_ui.text(
        Text::new(
            pos,
            RichText::new(body).size(12.0).color(Color32::from_gray(220)),
        )
        .anchor(anchor_for(callout.dx, callout.dy)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_attaches_opposite_the_offset_direction() {
        assert_eq!(anchor_for(-30.0, 30.0), Align2::RIGHT_CENTER);
        assert_eq!(anchor_for(30.0, 0.0), Align2::LEFT_CENTER);
        assert_eq!(anchor_for(0.0, 90.0), Align2::CENTER_TOP);
        assert_eq!(anchor_for(0.0, -45.0), Align2::CENTER_BOTTOM);
    }
}
