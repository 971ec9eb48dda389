use eframe::egui::{self, ScrollArea, Ui};

use crate::slides::SlideId;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// App title plus dataset readiness.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Heat Stories");
        ui.separator();

        let (ready, total) = state.data.ready_count();
        if state.data.any_loading() {
            ui.spinner();
        }
        ui.label(format!("{ready}/{total} datasets ready"));
    });
}

// ---------------------------------------------------------------------------
// Left rail – slide navigation
// ---------------------------------------------------------------------------

pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.add_space(4.0);
    ui.heading("Slides");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (i, slide) in SlideId::ALL.iter().enumerate() {
                let label = format!("{}. {}", i + 1, slide.title());
                if ui
                    .selectable_label(state.current == *slide, label)
                    .clicked()
                {
                    state.current = *slide;
                }
            }
        });
}
