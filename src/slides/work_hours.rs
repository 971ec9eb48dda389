use eframe::egui::Ui;
use egui_plot::{Plot, PlotBounds, Points};

use crate::chart::{self, annotation, legend};
use crate::chart::annotation::Callout;
use crate::chart::tooltip::{Tooltip, TooltipContent};
use crate::color::CategoryColors;
use crate::data::loader::{self, Fetch};
use crate::data::model::WorkHoursRow;
use crate::scale::NumericScale;
use crate::slides::CONTINENT_KEYS;

pub const DATA_URL: &str = "https://ykorde2.github.io/data/hours-worked-vs-gdp.csv";
pub const TARGET_YEAR: i32 = 2015;

const GDP_DOMAIN: (f64, f64) = (700.0, 120_000.0);
const HOURS_DOMAIN: (f64, f64) = (1300.0, 2700.0);
const POPULATION_DOMAIN: (f64, f64) = (0.0, 1.5e9);
const RADIUS_RANGE: (f64, f64) = (2.0, 22.0);
const GDP_TICKS: [f64; 7] = [
    1000.0, 2000.0, 5000.0, 10_000.0, 20_000.0, 50_000.0, 100_000.0,
];
const HOURS_TICK_STEP: f64 = 200.0;
const HOVER_RADIUS_PX: f64 = 14.0;

pub fn x_scale() -> NumericScale {
    NumericScale::log10(GDP_DOMAIN, (0.0, 1.0))
}

pub fn y_scale() -> NumericScale {
    NumericScale::linear(HOURS_DOMAIN, (0.0, 1.0))
}

pub fn radius_scale() -> NumericScale {
    NumericScale::sqrt(POPULATION_DOMAIN, RADIUS_RANGE)
}

pub fn fetch() -> Fetch<Vec<WorkHoursRow>> {
    loader::spawn("hours-worked-vs-gdp", || {
        loader::load_csv_rows(DATA_URL, WorkHoursRow::from_record)
    })
}

/// Rows for the slide's fixed target year. Field presence was already
/// enforced when the rows were built.
pub fn filtered(rows: &[WorkHoursRow]) -> Vec<&WorkHoursRow> {
    rows.iter().filter(|r| r.year == TARGET_YEAR).collect()
}

pub fn show(ui: &mut Ui, rows: &[WorkHoursRow], tip: &mut Tooltip) {
    let rows = filtered(rows);
    let x = x_scale();
    let y = y_scale();
    let radius = radius_scale();
    let colors = CategoryColors::new(&CONTINENT_KEYS);

    let x_ticks: Vec<(f64, String)> = GDP_TICKS
        .iter()
        .map(|&t| (x.map(t), format!("${t:.0}")))
        .collect();
    let mut y_ticks: Vec<(f64, String)> = Vec::new();
    let mut h = (HOURS_DOMAIN.0 / HOURS_TICK_STEP).ceil() * HOURS_TICK_STEP;
    while h < HOURS_DOMAIN.1 {
        y_ticks.push((y.map(h), format!("{h:.0}")));
        h += HOURS_TICK_STEP;
    }

    let x_marks = chart::fixed_marks(&x_ticks.iter().map(|(p, _)| *p).collect::<Vec<_>>());
    let y_marks = chart::fixed_marks(&y_ticks.iter().map(|(p, _)| *p).collect::<Vec<_>>());
    let size = ui.available_size();

    Plot::new("work_hours")
        .width(size.x)
        .height(size.y)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .x_axis_label("GDP per capita")
        .y_axis_label("Average annual hours worked")
        .x_grid_spacer(move |_input| x_marks.clone())
        .y_grid_spacer(move |_input| y_marks.clone())
        .x_axis_formatter(move |mark, _range| chart::label_at(&x_ticks, mark.value))
        .y_axis_formatter(move |mark, _range| chart::label_at(&y_ticks, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([0.0, 0.0], [1.0, 1.0]));

            let positions: Vec<[f64; 2]> = rows
                .iter()
                .map(|r| [x.map(r.gdp_per_capita), y.map(r.hours_worked)])
                .collect();

            for (row, pos) in rows.iter().zip(&positions) {
                plot_ui.points(
                    Points::new(vec![*pos])
                        .radius(radius.map(row.population) as f32)
                        .filled(true)
                        .color(colors.color_for(&row.continent)),
                );
            }

            let hover = plot_ui
                .pointer_coordinate()
                .zip(plot_ui.response().hover_pos());
            if let Some((pointer, screen_pos)) = hover {
                let upp = chart::units_per_px(plot_ui);
                match chart::nearest_within(&positions, [pointer.x, pointer.y], upp, HOVER_RADIUS_PX)
                {
                    Some(i) => {
                        let row = rows[i];
                        tip.point_enter(
                            TooltipContent {
                                title: row.entity.clone(),
                                lines: vec![
                                    format!("GDP per capita ($): {:.0}", row.gdp_per_capita),
                                    format!("Hours worked: {:.0}", row.hours_worked),
                                    format!("Population: {:.0}", row.population),
                                ],
                            },
                            screen_pos,
                        );
                    }
                    None => tip.point_leave(),
                }
            } else {
                tip.point_leave();
            }

            legend::draw(plot_ui, &colors.legend_entries());

            for code in annotation::HIGHLIGHT_CODES {
                if let Some(row) = rows.iter().find(|r| r.code == code) {
                    annotation::draw(
                        plot_ui,
                        [x.map(row.gdp_per_capita), y.map(row.hours_worked)],
                        &Callout {
                            title: row.entity.clone(),
                            label: format!(
                                "GDP: ${:.0}, Hours: {:.0}",
                                row.gdp_per_capita, row.hours_worked
                            ),
                            dx: -30.0,
                            dy: -30.0,
                            circled: false,
                        },
                    );
                }
            }
        });

    tip.tick(ui.input(|i| i.stable_dt));
    tip.show(ui.ctx(), "work_hours_tip");
    if tip.animating() {
        ui.ctx().request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(year: i32) -> WorkHoursRow {
        WorkHoursRow {
            entity: "China".to_string(),
            code: "CHN".to_string(),
            year,
            gdp_per_capita: 14_000.0,
            hours_worked: 2_100.0,
            population: 1e9,
            continent: "Asia".to_string(),
        }
    }

    #[test]
    fn filter_keeps_only_the_target_year() {
        let rows = vec![row(2015), row(2014), row(2015)];
        assert_eq!(filtered(&rows).len(), 2);
    }

    #[test]
    fn example_row_encodes_per_the_configured_scales() {
        let rows = vec![row(2015)];
        let kept = filtered(&rows);
        assert_eq!(kept.len(), 1);

        let r = radius_scale();
        let expected = RADIUS_RANGE.0
            + (1e9 / POPULATION_DOMAIN.1).sqrt() * (RADIUS_RANGE.1 - RADIUS_RANGE.0);
        assert!((r.map(kept[0].population) - expected).abs() < 1e-9);

        let colors = CategoryColors::new(&CONTINENT_KEYS);
        assert_eq!(
            colors.color_for(&kept[0].continent),
            colors.color_for("Asia")
        );
    }

    #[test]
    fn gdp_axis_is_logarithmic() {
        let x = x_scale();
        // Equal ratios map to equal spans.
        let a = x.map(2_000.0) - x.map(1_000.0);
        let b = x.map(40_000.0) - x.map(20_000.0);
        assert!((a - b).abs() < 1e-9);
    }
}
