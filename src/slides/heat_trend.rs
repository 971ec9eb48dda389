use eframe::egui::{self, Ui};
use egui_plot::{Line, Plot, PlotBounds};

use crate::chart::{self, annotation};
use crate::chart::annotation::Callout;
use crate::chart::transition::LineTransition;
use crate::color::generate_palette;
use crate::data::filter::{distinct_entities, entity_series};
use crate::data::loader::{self, Fetch};
use crate::data::model::TrendRow;
use crate::scale::NumericScale;
use crate::state::TrendView;

pub const DATA_URL: &str = "https://ykorde2.github.io/data/change-heat-death-rate.csv";

const YEAR_DOMAIN: (f64, f64) = (2030.0, 2090.0);
const RATE_DOMAIN: (f64, f64) = (-300.0, 150.0);
const YEAR_TICK_STEP: f64 = 10.0;
const RATE_TICK_STEP: f64 = 50.0;
const LINE_WIDTH: f32 = 4.0;

pub fn x_scale() -> NumericScale {
    NumericScale::linear(YEAR_DOMAIN, (0.0, 1.0))
}

pub fn y_scale() -> NumericScale {
    NumericScale::linear(RATE_DOMAIN, (0.0, 1.0))
}

pub fn fetch() -> Fetch<Vec<TrendRow>> {
    loader::spawn("change-heat-death-rate", || {
        loader::load_csv_rows(DATA_URL, TrendRow::from_record)
    })
}

/// The selected entity's series in plot coordinates, chronological order.
pub fn series_points(rows: &[TrendRow], entity: &str) -> Vec<[f64; 2]> {
    let x = x_scale();
    let y = y_scale();
    entity_series(rows, entity)
        .iter()
        .map(|r| [x.map(r.year as f64), y.map(r.heat_death_rate)])
        .collect()
}

pub fn show(ui: &mut Ui, rows: &[TrendRow], view: &mut TrendView) {
    let entities = distinct_entities(rows);
    if entities.is_empty() {
        return;
    }
    let selected = view
        .selected
        .get_or_insert_with(|| entities[0].clone())
        .clone();

    // Dropdown over the full set of distinct entity names.
    let mut switched: Option<String> = None;
    ui.horizontal(|ui| {
        ui.label("Country:");
        egui::ComboBox::from_id_salt("trend_country")
            .selected_text(&selected)
            .show_ui(ui, |ui| {
                for entity in &entities {
                    if ui.selectable_label(*entity == selected, entity).clicked()
                        && *entity != selected
                    {
                        switched = Some(entity.clone());
                    }
                }
            });
    });

    if let Some(new_entity) = switched {
        // Start the redraw animation from whatever is currently on screen.
        let displayed = view
            .transition
            .as_ref()
            .map(|t| t.current())
            .unwrap_or_else(|| series_points(rows, &selected));
        view.transition = Some(LineTransition::new(
            displayed,
            series_points(rows, &new_entity),
        ));
        view.selected = Some(new_entity);
    }

    let selected = view.selected.clone().unwrap_or_default();
    let target = series_points(rows, &selected);

    let dt = ui.input(|i| i.stable_dt);
    let mut drawn = target.clone();
    if let Some(t) = &mut view.transition {
        t.advance(dt);
        drawn = t.current();
        ui.ctx().request_repaint();
    }
    if view.transition.as_ref().is_some_and(|t| t.finished()) {
        view.transition = None;
    }

    let palette = generate_palette(10);
    let color_idx = entities.iter().position(|e| *e == selected).unwrap_or(0);
    let line_color = palette[color_idx % palette.len()];

    let x = x_scale();
    let y = y_scale();
    let mut x_ticks: Vec<(f64, String)> = Vec::new();
    let mut year = YEAR_DOMAIN.0;
    while year <= YEAR_DOMAIN.1 {
        x_ticks.push((x.map(year), format!("{year:.0}")));
        year += YEAR_TICK_STEP;
    }
    let mut y_ticks: Vec<(f64, String)> = Vec::new();
    let mut rate = RATE_DOMAIN.0;
    while rate <= RATE_DOMAIN.1 {
        y_ticks.push((y.map(rate), format!("{rate:.0} %")));
        rate += RATE_TICK_STEP;
    }

    let x_marks = chart::fixed_marks(&x_ticks.iter().map(|(p, _)| *p).collect::<Vec<_>>());
    let y_marks = chart::fixed_marks(&y_ticks.iter().map(|(p, _)| *p).collect::<Vec<_>>());
    let size = ui.available_size();

    Plot::new("heat_trend")
        .width(size.x)
        .height(size.y)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .x_axis_label("Year")
        .y_axis_label("Change in heat death rate")
        .x_grid_spacer(move |_input| x_marks.clone())
        .y_grid_spacer(move |_input| y_marks.clone())
        .x_axis_formatter(move |mark, _range| chart::label_at(&x_ticks, mark.value))
        .y_axis_formatter(move |mark, _range| chart::label_at(&y_ticks, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([0.0, 0.0], [1.0, 1.0]));

            plot_ui.line(Line::new(drawn).color(line_color).width(LINE_WIDTH));

            // The callout tracks the newly selected series' most recent
            // point; redrawing each frame replaces the previous one.
            if let Some(last) = entity_series(rows, &selected).last() {
                annotation::draw(
                    plot_ui,
                    [x.map(last.year as f64), y.map(last.heat_death_rate)],
                    &Callout {
                        title: selected.clone(),
                        label: format!("Heat death rate is {}", last.heat_death_rate),
                        dx: -100.0,
                        dy: -10.0,
                        circled: true,
                    },
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entity: &str, year: i32, rate: f64) -> TrendRow {
        TrendRow {
            entity: entity.to_string(),
            code: Some(entity[..3.min(entity.len())].to_uppercase()),
            year,
            heat_death_rate: rate,
        }
    }

    #[test]
    fn series_uses_exactly_the_selected_entity_in_year_order() {
        let rows = vec![
            row("Brazil", 2050, -10.0),
            row("Austria", 2030, 5.0),
            row("Brazil", 2030, -2.0),
        ];
        let pts = series_points(&rows, "Brazil");
        assert_eq!(pts.len(), 2);
        let x = x_scale();
        assert!((pts[0][0] - x.map(2030.0)).abs() < 1e-12);
        assert!((pts[1][0] - x.map(2050.0)).abs() < 1e-12);
    }

    #[test]
    fn switching_entities_lands_on_the_new_series() {
        let rows = vec![
            row("Brazil", 2030, -2.0),
            row("Brazil", 2090, -10.0),
            row("Austria", 2030, 5.0),
            row("Austria", 2090, 20.0),
        ];
        let mut transition = LineTransition::new(
            series_points(&rows, "Brazil"),
            series_points(&rows, "Austria"),
        );
        transition.advance(crate::chart::transition::DURATION_SECS);
        assert_eq!(transition.current(), series_points(&rows, "Austria"));
    }

    #[test]
    fn annotation_anchor_is_the_last_chronological_point() {
        let rows = vec![
            row("Brazil", 2090, -10.0),
            row("Brazil", 2030, -2.0),
        ];
        let last = entity_series(&rows, "Brazil").last().copied().unwrap();
        assert_eq!(last.year, 2090);
    }
}
