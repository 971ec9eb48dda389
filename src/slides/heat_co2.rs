use eframe::egui::{Color32, Ui};
use egui_plot::{HLine, Plot, PlotBounds, Points};

use crate::chart::{self, annotation, legend};
use crate::chart::annotation::Callout;
use crate::chart::tooltip::{Tooltip, TooltipContent};
use crate::color::CategoryColors;
use crate::data::filter::{join_indicator_slices, CountryIndicator};
use crate::data::loader::{self, Fetch};
use crate::scale::NumericScale;
use crate::slides::CONTINENT_KEYS;

pub const DATA_URL: &str = "https://ykorde2.github.io/data/heat-death-rate-vs-co2.csv";

const CO2_DOMAIN: (f64, f64) = (0.0, 40.0);
const RATE_DOMAIN: (f64, f64) = (-80.0, 40.0);
const CO2_TICK_STEP: f64 = 5.0;
const RATE_TICK_STEP: f64 = 20.0;
const DOT_RADIUS: f32 = 5.0;
const HOVER_RADIUS_PX: f64 = 10.0;

/// Square-root axis: spreads the many small emitters apart.
pub fn x_scale() -> NumericScale {
    NumericScale::sqrt(CO2_DOMAIN, (0.0, 1.0))
}

pub fn y_scale() -> NumericScale {
    NumericScale::linear(RATE_DOMAIN, (0.0, 1.0))
}

pub fn fetch() -> Fetch<Vec<CountryIndicator>> {
    loader::spawn("heat-death-rate-vs-co2", || {
        let records = loader::load_csv(DATA_URL)?;
        Ok(join_indicator_slices(&records, "AnnualCO2Emissions"))
    })
}

/// Per-entity callout offsets; everything else gets the default.
fn callout_offset(entity: &str) -> (f32, f32) {
    match entity {
        "Russia" => (30.0, 0.0),
        "United States" => (30.0, 30.0),
        "Kuwait" => (0.0, -30.0),
        _ => (0.0, -45.0),
    }
}

pub fn show(ui: &mut Ui, rows: &[CountryIndicator], tip: &mut Tooltip) {
    let x = x_scale();
    let y = y_scale();
    let colors = CategoryColors::new(&CONTINENT_KEYS);

    let mut x_ticks: Vec<(f64, String)> = Vec::new();
    let mut t = CO2_DOMAIN.0;
    while t <= CO2_DOMAIN.1 {
        x_ticks.push((x.map(t), format!("{t:.0}T")));
        t += CO2_TICK_STEP;
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

    Plot::new("heat_co2")
        .width(size.x)
        .height(size.y)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .x_axis_label("Annual CO2 emissions")
        .y_axis_label("Change in heat-related death rate")
        .x_grid_spacer(move |_input| x_marks.clone())
        .y_grid_spacer(move |_input| y_marks.clone())
        .x_axis_formatter(move |mark, _range| chart::label_at(&x_ticks, mark.value))
        .y_axis_formatter(move |mark, _range| chart::label_at(&y_ticks, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([0.0, 0.0], [1.0, 1.0]));

            plot_ui.hline(HLine::new(y.map(0.0)).color(Color32::GRAY).width(1.0));

            let positions: Vec<[f64; 2]> = rows
                .iter()
                .map(|r| [x.map(r.value), y.map(r.heat_death)])
                .collect();

            for (row, pos) in rows.iter().zip(&positions) {
                plot_ui.points(
                    Points::new(vec![*pos])
                        .radius(DOT_RADIUS)
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
                        let row = &rows[i];
                        tip.point_enter(
                            TooltipContent {
                                title: row.entity.clone(),
                                lines: vec![
                                    format!("Heat-related death rate: {:.2}%", row.heat_death),
                                    format!("Annual CO2 Emissions (T): {:.6}", row.value),
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
                    let (dx, dy) = callout_offset(&row.entity);
                    annotation::draw(
                        plot_ui,
                        [x.map(row.value), y.map(row.heat_death)],
                        &Callout {
                            title: row.entity.clone(),
                            label: format!(
                                "Annual CO2 Emissions: {:.0} T, Heat Death: {:.0}%",
                                row.value, row.heat_death
                            ),
                            dx,
                            dy,
                            circled: false,
                        },
                    );
                }
            }
        });

    tip.tick(ui.input(|i| i.stable_dt));
    tip.show(ui.ctx(), "heat_co2_tip");
    if tip.animating() {
        ui.ctx().request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqrt_axis_spreads_small_values() {
        let x = x_scale();
        // The first 10 T take more than a quarter of the axis.
        assert!(x.map(10.0) > 0.25 + 1e-9);
        let mut prev = x.map(0.0);
        let mut v = 0.0;
        while v < CO2_DOMAIN.1 {
            v += 2.5;
            let cur = x.map(v);
            assert!(cur > prev);
            prev = cur;
        }
    }

    #[test]
    fn kuwait_has_its_own_offset() {
        // Distinct from the default: the upstream fallthrough is fixed here.
        assert_eq!(callout_offset("Kuwait"), (0.0, -30.0));
        assert_eq!(callout_offset("Pakistan"), (0.0, -45.0));
        assert_eq!(callout_offset("Russia"), (30.0, 0.0));
        assert_eq!(callout_offset("United States"), (30.0, 30.0));
    }
}
