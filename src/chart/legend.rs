use eframe::egui::{Align2, Color32, RichText};
use egui_plot::{PlotPoint, PlotUi, Points, Text};

// ---------------------------------------------------------------------------
// Static color-key legend
// ---------------------------------------------------------------------------

/// Horizontal distance of the swatch column from the plot's right edge.
const RIGHT_INSET_PX: f64 = 100.0;
/// Vertical start below the plot's top edge.
const TOP_INSET_PX: f64 = 50.0;
/// Vertical spacing between entries.
const ROW_SPACING_PX: f64 = 25.0;
/// Label offset right of the swatch.
const LABEL_OFFSET_PX: f64 = 8.0;

/// Draw one swatch+label pair per entry, stacked vertically at a fixed
/// offset from the plot's top-right corner. Purely a function of the entry
/// list; no interactivity.
pub fn draw(plot_ui: &mut PlotUi, entries: &[(String, Color32)]) {
    let (ux, uy) = super::units_per_px(plot_ui);
    let bounds = plot_ui.plot_bounds();
    let x = bounds.max()[0] - RIGHT_INSET_PX * ux;

    for (i, (label, color)) in entries.iter().enumerate() {
        let y = bounds.max()[1] - (TOP_INSET_PX + ROW_SPACING_PX * i as f64) * uy;
        plot_ui.points(
            Points::new(vec![[x, y]])
                .radius(3.0)
                .filled(true)
                .color(*color),
        );
        plot_ui.text(
            Text::new(
                PlotPoint::new(x + LABEL_OFFSET_PX * ux, y),
                RichText::new(label).size(12.0).color(*color),
            )
            .anchor(Align2::LEFT_CENTER),
        );
    }
}
