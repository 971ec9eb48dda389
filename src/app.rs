use std::time::Duration;

use eframe::egui;

use crate::slides::{self, SlideId};
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HeatStoriesApp {
    pub state: AppState,
}

impl Default for HeatStoriesApp {
    fn default() -> Self {
        Self {
            state: AppState::new(),
        }
    }
}

impl eframe::App for HeatStoriesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.data.poll();
        if self.state.data.any_loading() {
            ctx.request_repaint_after(Duration::from_millis(150));
        }

        // ---- Top panel: title and load status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left rail: slide navigation ----
        egui::SidePanel::left("slide_rail")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: the current slide ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let AppState {
                current,
                data,
                view,
            } = &mut self.state;

            ui.heading(current.title());
            ui.label(current.narration());
            ui.add_space(6.0);

            // A failed or in-flight load leaves the slide blank.
            match *current {
                SlideId::WorkHours => {
                    if let Some(rows) = data.work_hours.get() {
                        slides::work_hours::show(ui, rows, &mut view.work_hours_tip);
                    }
                }
                SlideId::MortalityBars => {
                    if let Some(rows) = data.mortality.get() {
                        slides::mortality_bars::show(ui, rows, &mut view.mortality_tip);
                    }
                }
                SlideId::HeatTrend => {
                    if let Some(rows) = data.trend.get() {
                        slides::heat_trend::show(ui, rows, &mut view.trend);
                    }
                }
                SlideId::HeatGdp => {
                    if let Some(rows) = data.heat_gdp.get() {
                        slides::heat_gdp::show(ui, rows, &mut view.heat_gdp_tip);
                    }
                }
                SlideId::HeatCo2 => {
                    if let Some(rows) = data.heat_co2.get() {
                        slides::heat_co2::show(ui, rows, &mut view.heat_co2_tip);
                    }
                }
                SlideId::WorldMap => {
                    if let (Some(shapes), Some(rows)) =
                        (data.countries.get(), data.map_rates.get())
                    {
                        slides::world_map::show(ui, shapes, rows, &mut view.map_tip);
                    }
                }
            }
        });
    }
}
