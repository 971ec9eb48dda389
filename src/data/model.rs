use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Record – one raw CSV row
// ---------------------------------------------------------------------------

/// A parsed CSV row: column name → raw cell text. Cells are loosely typed;
/// charts coerce them through the accessors below, and an empty cell counts
/// as absent.
#[derive(Debug, Clone, Default)]
pub struct Record {
    values: BTreeMap<String, String>,
}

impl Record {
    pub fn new(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    /// Convenience constructor for tests and generators.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// The trimmed cell under `column`, or `None` when missing or empty.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.values
            .get(column)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    pub fn num(&self, column: &str) -> Option<f64> {
        let v = self.text(column)?.parse::<f64>().ok()?;
        v.is_finite().then_some(v)
    }

    pub fn int(&self, column: &str) -> Option<i32> {
        // Year columns sometimes carry a decimal point ("2015.0").
        self.num(column).map(|v| v.round() as i32)
    }
}

// ---------------------------------------------------------------------------
// Typed rows – one per chart
// ---------------------------------------------------------------------------

/// Hours-worked vs. GDP bubble chart row.
#[derive(Debug, Clone)]
pub struct WorkHoursRow {
    pub entity: String,
    pub code: String,
    pub year: i32,
    pub gdp_per_capita: f64,
    pub hours_worked: f64,
    pub population: f64,
    pub continent: String,
}

impl WorkHoursRow {
    /// `None` when any encoded field is missing; such rows are excluded.
    pub fn from_record(r: &Record) -> Option<Self> {
        Some(Self {
            entity: r.text("Entity")?.to_string(),
            code: r.text("Code")?.to_string(),
            year: r.int("Year")?,
            gdp_per_capita: r.num("gdp_per_capita")?,
            hours_worked: r.num("average_annual_hours_worked")?,
            population: r.num("total_population")?,
            continent: r.text("continent")?.to_string(),
        })
    }
}

/// Temperature-band mortality row (stacked bar chart).
#[derive(Debug, Clone)]
pub struct MortalityRow {
    pub entity: String,
    pub code: String,
    pub extreme_cold: f64,
    pub moderate_cold: f64,
    pub moderate_heat: f64,
    pub extreme_heat: f64,
}

impl MortalityRow {
    pub fn from_record(r: &Record) -> Option<Self> {
        Some(Self {
            entity: r.text("Entity")?.to_string(),
            code: r.text("Code")?.to_string(),
            extreme_cold: r.num("ExtremeCold")?,
            moderate_cold: r.num("ModerateCold")?,
            moderate_heat: r.num("ModerateHeat")?,
            extreme_heat: r.num("ExtremeHeat")?,
        })
    }

    /// Share of deaths across all four temperature bands.
    pub fn total(&self) -> f64 {
        self.extreme_cold + self.moderate_cold + self.moderate_heat + self.extreme_heat
    }

    pub fn bands(&self) -> [f64; 4] {
        [
            self.extreme_cold,
            self.moderate_cold,
            self.moderate_heat,
            self.extreme_heat,
        ]
    }
}

/// Projected heat-death-rate row (line chart and choropleth).
#[derive(Debug, Clone)]
pub struct TrendRow {
    pub entity: String,
    /// Aggregates like "World" carry no ISO code.
    pub code: Option<String>,
    pub year: i32,
    pub heat_death_rate: f64,
}

impl TrendRow {
    pub fn from_record(r: &Record) -> Option<Self> {
        Some(Self {
            entity: r.text("Entity")?.to_string(),
            code: r.text("Code").map(str::to_string),
            year: r.int("Year")?,
            heat_death_rate: r.num("HeatDeathRate")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cells_read_as_absent() {
        let r = Record::from_pairs(&[("Entity", "China"), ("Code", ""), ("Year", " 2015 ")]);
        assert_eq!(r.text("Entity"), Some("China"));
        assert_eq!(r.text("Code"), None);
        assert_eq!(r.text("Missing"), None);
        assert_eq!(r.int("Year"), Some(2015));
    }

    #[test]
    fn non_numeric_cells_do_not_coerce() {
        let r = Record::from_pairs(&[("Year", "n/a"), ("GDP", "inf")]);
        assert_eq!(r.num("Year"), None);
        assert_eq!(r.num("GDP"), None);
    }

    #[test]
    fn work_hours_row_requires_every_encoded_field() {
        let full = Record::from_pairs(&[
            ("Entity", "China"),
            ("Code", "CHN"),
            ("Year", "2015"),
            ("gdp_per_capita", "14000"),
            ("average_annual_hours_worked", "2100"),
            ("total_population", "1e9"),
            ("continent", "Asia"),
        ]);
        let row = WorkHoursRow::from_record(&full).unwrap();
        assert_eq!(row.code, "CHN");
        assert!((row.population - 1e9).abs() < 1.0);

        let missing = Record::from_pairs(&[
            ("Entity", "China"),
            ("Code", "CHN"),
            ("Year", "2015"),
            ("gdp_per_capita", "14000"),
            ("average_annual_hours_worked", ""),
            ("total_population", "1e9"),
            ("continent", "Asia"),
        ]);
        assert!(WorkHoursRow::from_record(&missing).is_none());
    }

    #[test]
    fn mortality_total_sums_all_bands() {
        let r = Record::from_pairs(&[
            ("Entity", "Japan"),
            ("Code", "JPN"),
            ("ExtremeCold", "0.5"),
            ("ModerateCold", "8.0"),
            ("ModerateHeat", "0.3"),
            ("ExtremeHeat", "0.2"),
        ]);
        let row = MortalityRow::from_record(&r).unwrap();
        assert!((row.total() - 9.0).abs() < 1e-12);
    }

    #[test]
    fn trend_row_keeps_codeless_aggregates() {
        let r = Record::from_pairs(&[
            ("Entity", "World"),
            ("Year", "2050"),
            ("HeatDeathRate", "-12.5"),
        ]);
        let row = TrendRow::from_record(&r).unwrap();
        assert_eq!(row.code, None);
        assert_eq!(row.year, 2050);
    }
}
