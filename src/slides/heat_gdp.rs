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

pub const DATA_URL: &str = "https://ykorde2.github.io/data/change-heat-deaths-gdp.csv";

const GDP_DOMAIN: (f64, f64) = (700.0, 120_000.0);
const RATE_DOMAIN: (f64, f64) = (-80.0, 40.0);
const GDP_TICKS: [f64; 7] = [
    1000.0, 2000.0, 5000.0, 10_000.0, 20_000.0, 50_000.0, 100_000.0,
];
const RATE_TICK_STEP: f64 = 20.0;
const DOT_RADIUS: f32 = 5.0;
const HOVER_RADIUS_PX: f64 = 10.0;

pub fn x_scale() -> NumericScale {
    NumericScale::log10(GDP_DOMAIN, (0.0, 1.0))
}

pub fn y_scale() -> NumericScale {
    NumericScale::linear(RATE_DOMAIN, (0.0, 1.0))
}

pub fn fetch() -> Fetch<Vec<CountryIndicator>> {
    loader::spawn("change-heat-deaths-gdp", || {
        let records = loader::load_csv(DATA_URL)?;
        Ok(join_indicator_slices(&records, "GDP"))
    })
}

/// Per-entity callout offsets; everything else gets the default.
fn callout_offset(entity: &str) -> (f32, f32) {
    match entity {
        "Russia" => (-30.0, 30.0),
        "United States" => (0.0, 90.0),
        "Kuwait" => (-30.0, -30.0),
        _ => (-30.0, -30.0),
    }
}

pub fn show(ui: &mut Ui, rows: &[CountryIndicator], tip: &mut Tooltip) {
    let x = x_scale();
    let y = y_scale();
    let colors = CategoryColors::new(&CONTINENT_KEYS);

    let x_ticks: Vec<(f64, String)> = GDP_TICKS
        .iter()
        .map(|&t| (x.map(t), format!("${t:.0}")))
        .collect();
    let mut y_ticks: Vec<(f64, String)> = Vec::new();
    let mut rate = RATE_DOMAIN.0;
    while rate <= RATE_DOMAIN.1 {
        y_ticks.push((y.map(rate), format!("{rate:.0} %")));
        rate += RATE_TICK_STEP;
    }

    let x_marks = chart::fixed_marks(&x_ticks.iter().map(|(p, _)| *p).collect::<Vec<_>>());
    let y_marks = chart::fixed_marks(&y_ticks.iter().map(|(p, _)| *p).collect::<Vec<_>>());
    let size = ui.available_size();

    Plot::new("heat_gdp")
        .width(size.x)
        .height(size.y)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .x_axis_label("GDP per capita")
        .y_axis_label("Change in heat-related death rate")
        .x_grid_spacer(move |_input| x_marks.clone())
        .y_grid_spacer(move |_input| y_marks.clone())
        .x_axis_formatter(move |mark, _range| chart::label_at(&x_ticks, mark.value))
        .y_axis_formatter(move |mark, _range| chart::label_at(&y_ticks, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([0.0, 0.0], [1.0, 1.0]));

            // Reference line at no change.
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
                                    format!("GDP per capita ($): {:.0}", row.value),
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
                                "GDP: ${:.0}, Heat Death: {:.0}%",
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
    tip.show(ui.ctx(), "heat_gdp_tip");
    if tip.animating() {
        ui.ctx().request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_axis_spaces_equal_ratios_equally() {
        let x = x_scale();
        let a = x.map(2_000.0) - x.map(1_000.0);
        let b = x.map(100_000.0) - x.map(50_000.0);
        assert!((a - b).abs() < 1e-9);
        // Monotone over the fixed tick set.
        for pair in GDP_TICKS.windows(2) {
            assert!(x.map(pair[1]) > x.map(pair[0]));
        }
    }

    #[test]
    fn special_cased_entities_keep_their_offsets() {
        assert_eq!(callout_offset("Russia"), (-30.0, 30.0));
        assert_eq!(callout_offset("United States"), (0.0, 90.0));
        assert_eq!(callout_offset("Kuwait"), (-30.0, -30.0));
        assert_eq!(callout_offset("Pakistan"), (-30.0, -30.0));
    }
}
