/// Shared chart machinery: hover geometry, fixed tick sets, tooltips,
/// annotations, legends, and the selector transition.
pub mod annotation;
pub mod legend;
pub mod tooltip;
pub mod transition;

use egui_plot::{GridMark, PlotUi};

/// Plot units per screen pixel for the current viewport, per axis.
pub fn units_per_px(plot_ui: &PlotUi) -> (f64, f64) {
    let bounds = plot_ui.plot_bounds();
    let rect = plot_ui.response().rect;
    (
        bounds.width() / rect.width().max(1.0) as f64,
        bounds.height() / rect.height().max(1.0) as f64,
    )
}

/// Index of the point nearest to `pointer` within `radius_px` screen pixels,
/// measured through the units-per-pixel factors of each axis.
pub fn nearest_within(
    points: &[[f64; 2]],
    pointer: [f64; 2],
    units_per_px: (f64, f64),
    radius_px: f64,
) -> Option<usize> {
    let (ux, uy) = units_per_px;
    if ux <= 0.0 || uy <= 0.0 {
        return None;
    }
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        let dx = (p[0] - pointer[0]) / ux;
        let dy = (p[1] - pointer[1]) / uy;
        let d2 = dx * dx + dy * dy;
        if d2 <= radius_px * radius_px && best.map_or(true, |(_, bd)| d2 < bd) {
            best = Some((i, d2));
        }
    }
    best.map(|(i, _)| i)
}

/// Round a raw step to a 1/2/5 × 10^k value.
pub fn nice_step(range: f64, target_steps: usize) -> f64 {
    let raw_step = range / target_steps.max(1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Grid marks at fixed positions. A uniform large step size keeps every mark
/// (and its label) rendered at full strength.
pub fn fixed_marks(positions: &[f64]) -> Vec<GridMark> {
    positions
        .iter()
        .map(|&value| GridMark {
            value,
            step_size: 1.0,
        })
        .collect()
}

/// Label for an axis position out of a fixed `(position, label)` tick set.
pub fn label_at(labels: &[(f64, String)], value: f64) -> String {
    labels
        .iter()
        .find(|(p, _)| (p - value).abs() < 1e-9)
        .map(|(_, l)| l.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_respects_pixel_radius() {
        let points = vec![[0.1, 0.1], [0.5, 0.5], [0.52, 0.5]];
        // 0.01 plot units per pixel: the pointer is 2 px from point 2 and
        // 2 px + a bit from point 1.
        let upp = (0.01, 0.01);
        assert_eq!(nearest_within(&points, [0.54, 0.5], upp, 5.0), Some(2));
        assert_eq!(nearest_within(&points, [0.54, 0.5], upp, 1.0), None);
        // Nearest wins when several are in range.
        assert_eq!(nearest_within(&points, [0.51, 0.5], upp, 50.0), Some(2));
        assert_eq!(nearest_within(&[], [0.0, 0.0], upp, 5.0), None);
    }

    #[test]
    fn nice_step_rounds_to_125() {
        assert!((nice_step(10.0, 10) - 1.0).abs() < 1e-12);
        assert!((nice_step(12.0, 10) - 2.0).abs() < 1e-12);
        assert!((nice_step(40.0, 10) - 5.0).abs() < 1e-12);
        assert!((nice_step(0.9, 10) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn tick_labels_match_by_position() {
        let labels = vec![(0.25, "a".to_string()), (0.75, "b".to_string())];
        assert_eq!(label_at(&labels, 0.75), "b");
        assert_eq!(label_at(&labels, 0.5), "");
    }
}
