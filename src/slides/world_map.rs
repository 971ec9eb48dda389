use std::collections::BTreeMap;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Plot, Polygon};

use crate::chart::legend;
use crate::chart::tooltip::{Tooltip, TooltipContent};
use crate::color::sequential_ramp;
use crate::data::geo::{self, CountryShape};
use crate::data::loader::{self, Fetch};
use crate::data::model::TrendRow;
use crate::scale::NumericScale;

use super::heat_trend;

pub const GEO_URL: &str = "https://ykorde2.github.io/data/world-countries.geo.json";
/// The projection year the map colors by: the trend dataset's final year.
pub const MAP_YEAR: i32 = 2090;

const RATE_DOMAIN: (f64, f64) = (-300.0, 150.0);
const LEGEND_BINS: [f64; 5] = [-300.0, -150.0, 0.0, 75.0, 150.0];
/// Improving end of the ramp.
const RAMP_LOW: Color32 = Color32::from_rgb(69, 117, 180);
/// Worsening end of the ramp.
const RAMP_HIGH: Color32 = Color32::from_rgb(165, 15, 21);
const NO_DATA_FILL: Color32 = Color32::from_gray(55);
const BORDER: Stroke = Stroke {
    width: 0.5,
    color: Color32::from_gray(25),
};

pub fn fetch_countries() -> Fetch<Vec<CountryShape>> {
    loader::spawn("world-countries", || loader::load_countries(GEO_URL))
}

/// The map keeps its own copy of the rate dataset; slides share no state.
pub fn fetch_rates() -> Fetch<Vec<TrendRow>> {
    loader::spawn("map-heat-death-rate", || {
        loader::load_csv_rows(heat_trend::DATA_URL, TrendRow::from_record)
    })
}

pub fn value_scale() -> NumericScale {
    NumericScale::linear(RATE_DOMAIN, (0.0, 1.0))
}

/// Rate per ISO code for the map year. Codeless aggregate rows drop out.
pub fn rate_by_code(rows: &[TrendRow]) -> BTreeMap<&str, f64> {
    rows.iter()
        .filter(|r| r.year == MAP_YEAR)
        .filter_map(|r| r.code.as_deref().map(|c| (c, r.heat_death_rate)))
        .collect()
}

pub fn show(ui: &mut Ui, shapes: &[CountryShape], rows: &[TrendRow], tip: &mut Tooltip) {
    let rates = rate_by_code(rows);
    let scale = value_scale();
    let size = ui.available_size();

    Plot::new("world_map")
        .width(size.x)
        .height(size.y)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show_axes(false)
        .show_grid(false)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .show(ui, |plot_ui| {
            for shape in shapes {
                let fill = rates
                    .get(shape.code.as_str())
                    .map(|&r| sequential_ramp(scale.map(r), RAMP_LOW, RAMP_HIGH))
                    .unwrap_or(NO_DATA_FILL);
                for ring in &shape.rings {
                    plot_ui.polygon(Polygon::new(ring.clone()).fill_color(fill).stroke(BORDER));
                }
            }

            let hover = plot_ui
                .pointer_coordinate()
                .zip(plot_ui.response().hover_pos());
            if let Some((pointer, screen_pos)) = hover {
                match shapes
                    .iter()
                    .find(|s| geo::contains(s, pointer.x, pointer.y))
                {
                    Some(shape) => {
                        let lines = match rates.get(shape.code.as_str()) {
                            Some(rate) => {
                                vec![format!("Heat death rate by {MAP_YEAR}: {rate:.1}%")]
                            }
                            None => vec!["No projection available".to_string()],
                        };
                        tip.point_enter(
                            TooltipContent {
                                title: shape.name.clone(),
                                lines,
                            },
                            screen_pos,
                        );
                    }
                    None => tip.point_leave(),
                }
            } else {
                tip.point_leave();
            }

            let entries: Vec<(String, Color32)> = LEGEND_BINS
                .iter()
                .map(|&v| {
                    (
                        format!("{v:.0} %"),
                        sequential_ramp(scale.map(v), RAMP_LOW, RAMP_HIGH),
                    )
                })
                .collect();
            legend::draw(plot_ui, &entries);
        });

    tip.tick(ui.input(|i| i.stable_dt));
    tip.show(ui.ctx(), "world_map_tip");
    if tip.animating() {
        ui.ctx().request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entity: &str, code: Option<&str>, year: i32, rate: f64) -> TrendRow {
        TrendRow {
            entity: entity.to_string(),
            code: code.map(str::to_string),
            year,
            heat_death_rate: rate,
        }
    }

    #[test]
    fn map_join_uses_only_the_map_year_and_coded_rows() {
        let rows = vec![
            row("Austria", Some("AUT"), 2090, 12.0),
            row("Austria", Some("AUT"), 2030, 2.0),
            row("World", None, 2090, 5.0),
            row("Brazil", Some("BRA"), 2090, -40.0),
        ];
        let rates = rate_by_code(&rows);
        assert_eq!(rates.len(), 2);
        assert_eq!(rates.get("AUT"), Some(&12.0));
        assert_eq!(rates.get("BRA"), Some(&-40.0));
    }

    #[test]
    fn value_scale_spans_the_rate_domain() {
        let s = value_scale();
        assert!((s.map(RATE_DOMAIN.0)).abs() < 1e-12);
        assert!((s.map(RATE_DOMAIN.1) - 1.0).abs() < 1e-12);
    }
}
