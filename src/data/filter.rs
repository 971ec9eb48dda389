use std::collections::BTreeMap;

use super::model::{Record, TrendRow};

// ---------------------------------------------------------------------------
// Year slicing and the three-slice country join
// ---------------------------------------------------------------------------

/// Year whose rows carry the indicator value (GDP, CO2) and the entity name.
pub const VALUE_YEAR: i32 = 2021;
/// Year whose rows carry the projected heat-death change.
pub const PROJECTION_YEAR: i32 = 2030;
/// Year whose rows carry the continent assignment.
pub const CONTINENT_YEAR: i32 = 2015;

/// Rows whose `Year` equals `year`.
pub fn year_slice<'a>(records: &'a [Record], year: i32) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|r| r.int("Year") == Some(year))
        .collect()
}

/// One country after merging the three year slices on ISO code.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryIndicator {
    pub code: String,
    pub entity: String,
    /// The indicator named by `value_column` (GDP per capita, CO2 emissions).
    pub value: f64,
    pub heat_death: f64,
    pub continent: String,
}

#[derive(Default)]
struct PartialCountry {
    entity: Option<String>,
    value: Option<f64>,
    heat_death: Option<f64>,
    continent: Option<String>,
}

/// Merge three year slices of `records` keyed on country code: the value
/// year contributes `value_column` and the entity name, the projection year
/// the heat-death change, the continent year the continent. Codes missing
/// from any slice (or with any merged field unparsable) are dropped without
/// error.
pub fn join_indicator_slices(records: &[Record], value_column: &str) -> Vec<CountryIndicator> {
    let mut merged: BTreeMap<String, PartialCountry> = BTreeMap::new();

    for r in year_slice(records, VALUE_YEAR) {
        let Some(code) = r.text("Code") else { continue };
        let entry = merged.entry(code.to_string()).or_default();
        entry.value = r.num(value_column);
        entry.entity = r.text("Entity").map(str::to_string);
    }

    for r in year_slice(records, PROJECTION_YEAR) {
        let Some(code) = r.text("Code") else { continue };
        merged.entry(code.to_string()).or_default().heat_death = r.num("HeatDeath");
    }

    for r in year_slice(records, CONTINENT_YEAR) {
        let Some(code) = r.text("Code") else { continue };
        merged.entry(code.to_string()).or_default().continent =
            r.text("Continent").map(str::to_string);
    }

    merged
        .into_iter()
        .filter_map(|(code, p)| {
            Some(CountryIndicator {
                code,
                entity: p.entity?,
                value: p.value?,
                heat_death: p.heat_death?,
                continent: p.continent?,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Stacking
// ---------------------------------------------------------------------------

/// Cumulative (start, end) boundaries for a stacked sequence of sub-values.
pub fn cumulative_stack(values: &[f64]) -> Vec<(f64, f64)> {
    let mut start = 0.0;
    values
        .iter()
        .map(|&v| {
            let seg = (start, start + v);
            start += v;
            seg
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Entity extraction for the selector
// ---------------------------------------------------------------------------

/// Distinct entity names in first-appearance order.
pub fn distinct_entities(rows: &[TrendRow]) -> Vec<String> {
    let mut seen = Vec::new();
    for row in rows {
        if !seen.iter().any(|e| e == &row.entity) {
            seen.push(row.entity.clone());
        }
    }
    seen
}

/// The selected entity's rows in chronological order.
pub fn entity_series<'a>(rows: &'a [TrendRow], entity: &str) -> Vec<&'a TrendRow> {
    let mut series: Vec<&TrendRow> = rows.iter().filter(|r| r.entity == entity).collect();
    series.sort_by_key(|r| r.year);
    series
}
