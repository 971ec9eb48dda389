use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot, PlotBounds};

use crate::chart::{self, legend};
use crate::chart::tooltip::{Tooltip, TooltipContent};
use crate::color::CategoryColors;
use crate::data::filter::cumulative_stack;
use crate::data::loader::{self, Fetch};
use crate::data::model::MortalityRow;
use crate::scale::{BandScale, NumericScale};

pub const DATA_URL: &str = "https://ykorde2.github.io/data/deaths-temperature-gasparrini.csv";

/// The four temperature bands, in stacking order.
pub const BAND_KEYS: [&str; 4] = [
    "Extreme cold",
    "Moderate cold",
    "Moderate heat",
    "Extreme heat",
];

const BAND_PADDING: f64 = 0.1;

pub fn fetch() -> Fetch<Vec<MortalityRow>> {
    loader::spawn("deaths-temperature", || {
        let rows = loader::load_csv_rows(DATA_URL, MortalityRow::from_record)?;
        Ok(sorted(rows))
    })
}

/// Bars are ordered by descending total share.
pub fn sorted(mut rows: Vec<MortalityRow>) -> Vec<MortalityRow> {
    rows.sort_by(|a, b| b.total().total_cmp(&a.total()));
    rows
}

/// Cumulative (start, end) boundaries of one row's four stacked segments.
pub fn stacked_segments(row: &MortalityRow) -> Vec<(f64, f64)> {
    cumulative_stack(&row.bands())
}

pub fn show(ui: &mut Ui, rows: &[MortalityRow], tip: &mut Tooltip) {
    if rows.is_empty() {
        return;
    }
    let entities: Vec<String> = rows.iter().map(|r| r.entity.clone()).collect();
    let band = BandScale::new(entities, (1.0, 0.0), BAND_PADDING);
    let max_total = rows.iter().map(|r| r.total()).fold(0.0, f64::max);
    let x = NumericScale::linear((0.0, max_total), (0.0, 1.0));
    let colors = CategoryColors::new(&BAND_KEYS);

    let step = chart::nice_step(max_total, 10);
    let step = if step.is_finite() && step > 0.0 { step } else { 1.0 };
    let mut x_ticks: Vec<(f64, String)> = Vec::new();
    let mut v = 0.0;
    while v <= max_total {
        x_ticks.push((x.map(v), format!("{v}%")));
        v += step;
    }
    let y_ticks: Vec<(f64, String)> = band
        .keys()
        .iter()
        .enumerate()
        .map(|(i, entity)| (band.center_at(i), entity.clone()))
        .collect();

    let x_marks = chart::fixed_marks(&x_ticks.iter().map(|(p, _)| *p).collect::<Vec<_>>());
    let y_marks = chart::fixed_marks(&y_ticks.iter().map(|(p, _)| *p).collect::<Vec<_>>());
    let size = ui.available_size();

    Plot::new("mortality_bars")
        .width(size.x)
        .height(size.y)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .x_axis_label("Share of deaths attributed to temperature")
        .x_grid_spacer(move |_input| x_marks.clone())
        .y_grid_spacer(move |_input| y_marks.clone())
        .x_axis_formatter(move |mark, _range| chart::label_at(&x_ticks, mark.value))
        .y_axis_formatter(move |mark, _range| chart::label_at(&y_ticks, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([0.0, 0.0], [1.0, 1.0]));

            for (band_idx, key) in BAND_KEYS.iter().enumerate() {
                let bars: Vec<Bar> = rows
                    .iter()
                    .enumerate()
                    .map(|(row_idx, row)| {
                        let (start, end) = stacked_segments(row)[band_idx];
                        Bar::new(band.center_at(row_idx), x.map(end) - x.map(start))
                            .base_offset(x.map(start))
                            .width(band.bandwidth())
                            .fill(colors.color_for(key))
                    })
                    .collect();
                plot_ui.bar_chart(BarChart::new(bars).horizontal());
            }

            let hover = plot_ui
                .pointer_coordinate()
                .zip(plot_ui.response().hover_pos());
            let mut hovering = false;
            if let Some((pointer, screen_pos)) = hover {
                if let Some(entity) = band.key_at(pointer.y) {
                    if let Some(row) = rows.iter().find(|r| r.entity == entity) {
                        if pointer.x >= 0.0 && pointer.x <= x.map(row.total()) {
                            hovering = true;
                            tip.point_enter(
                                TooltipContent {
                                    title: row.entity.clone(),
                                    lines: vec![
                                        format!("Extreme Cold: {}%", row.extreme_cold),
                                        format!("Moderate Cold: {}%", row.moderate_cold),
                                        format!("Moderate Heat: {}%", row.moderate_heat),
                                        format!("Extreme Heat: {}%", row.extreme_heat),
                                        format!("Total: {:.2}%", row.total()),
                                    ],
                                },
                                screen_pos,
                            );
                        }
                    }
                }
            }
            if !hovering {
                tip.point_leave();
            }

            legend::draw(plot_ui, &colors.legend_entries());
        });

    tip.tick(ui.input(|i| i.stable_dt));
    tip.show(ui.ctx(), "mortality_tip");
    if tip.animating() {
        ui.ctx().request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(entity: &str, bands: [f64; 4]) -> MortalityRow {
        MortalityRow {
            entity: entity.to_string(),
            code: entity[..3.min(entity.len())].to_uppercase(),
            extreme_cold: bands[0],
            moderate_cold: bands[1],
            moderate_heat: bands[2],
            extreme_heat: bands[3],
        }
    }

    #[test]
    fn rows_sort_by_descending_total() {
        let rows = sorted(vec![
            row("Low", [0.1, 1.0, 0.1, 0.1]),
            row("High", [1.0, 8.0, 0.5, 0.5]),
            row("Mid", [0.5, 4.0, 0.2, 0.3]),
        ]);
        let order: Vec<&str> = rows.iter().map(|r| r.entity.as_str()).collect();
        assert_eq!(order, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn segments_stack_to_the_total() {
        let r = row("Japan", [0.5, 8.0, 0.3, 0.2]);
        let segments = stacked_segments(&r);
        assert_eq!(segments.len(), 4);
        assert!((segments[0].0).abs() < 1e-12);
        for pair in segments.windows(2) {
            assert!(pair[1].0 >= pair[0].0);
            assert!((pair[0].1 - pair[1].0).abs() < 1e-12);
        }
        assert!((segments[3].1 - r.total()).abs() < 1e-12);
    }
}
