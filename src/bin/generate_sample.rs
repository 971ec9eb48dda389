//! Writes deterministic sample datasets matching the remote CSV/GeoJSON
//! schemas, so the app and tests can run without network access:
//! point the slide URLs at `sample_data/` to use them.

use std::error::Error;
use std::fs;
use std::path::Path;

use serde_json::json;

const OUT_DIR: &str = "sample_data";

/// (entity, code, continent)
const COUNTRIES: [(&str, &str, &str); 20] = [
    ("China", "CHN", "Asia"),
    ("India", "IND", "Asia"),
    ("Japan", "JPN", "Asia"),
    ("Pakistan", "PAK", "Asia"),
    ("Kuwait", "KWT", "Asia"),
    ("Indonesia", "IDN", "Asia"),
    ("Germany", "DEU", "Europe"),
    ("France", "FRA", "Europe"),
    ("Russia", "RUS", "Europe"),
    ("Spain", "ESP", "Europe"),
    ("United States", "USA", "North America"),
    ("Mexico", "MEX", "North America"),
    ("Canada", "CAN", "North America"),
    ("Brazil", "BRA", "South America"),
    ("Colombia", "COL", "South America"),
    ("Nigeria", "NGA", "Africa"),
    ("Egypt", "EGY", "Africa"),
    ("South Africa", "ZAF", "Africa"),
    ("Australia", "AUS", "Oceania"),
    ("New Zealand", "NZL", "Oceania"),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in [lo, hi).
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Log-uniform in [lo, hi).
    fn log_range(&mut self, lo: f64, hi: f64) -> f64 {
        (self.range(lo.ln(), hi.ln())).exp()
    }
}

fn write_work_hours(rng: &mut SimpleRng) -> Result<(), Box<dyn Error>> {
    let mut w = csv::Writer::from_path(Path::new(OUT_DIR).join("hours-worked-vs-gdp.csv"))?;
    w.write_record([
        "Entity",
        "Code",
        "Year",
        "gdp_per_capita",
        "average_annual_hours_worked",
        "total_population",
        "continent",
    ])?;
    for (entity, code, continent) in COUNTRIES {
        let gdp = rng.log_range(1_000.0, 90_000.0);
        // Richer countries work fewer hours.
        let hours = 2_500.0 - 220.0 * gdp.log10() + rng.range(-80.0, 80.0);
        let population = rng.log_range(3e6, 1.4e9);
        let gdp = format!("{gdp:.0}");
        let hours = format!("{hours:.0}");
        let population = format!("{population:.0}");
        for year in [2014, 2015] {
            let year = year.to_string();
            w.write_record([
                entity,
                code,
                year.as_str(),
                gdp.as_str(),
                hours.as_str(),
                population.as_str(),
                continent,
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

fn write_mortality(rng: &mut SimpleRng) -> Result<(), Box<dyn Error>> {
    let mut w =
        csv::Writer::from_path(Path::new(OUT_DIR).join("deaths-temperature-gasparrini.csv"))?;
    w.write_record([
        "Entity",
        "Code",
        "Year",
        "ExtremeCold",
        "ModerateCold",
        "ModerateHeat",
        "ExtremeHeat",
    ])?;
    for (entity, code, _) in COUNTRIES {
        let extreme_cold = format!("{:.2}", rng.range(0.1, 1.2));
        let moderate_cold = format!("{:.2}", rng.range(2.0, 9.0));
        let moderate_heat = format!("{:.2}", rng.range(0.1, 0.8));
        let extreme_heat = format!("{:.2}", rng.range(0.05, 0.6));
        w.write_record([
            entity,
            code,
            "2019",
            extreme_cold.as_str(),
            moderate_cold.as_str(),
            moderate_heat.as_str(),
            extreme_heat.as_str(),
        ])?;
    }
    w.flush()?;
    Ok(())
}

fn write_heat_trend(rng: &mut SimpleRng) -> Result<(), Box<dyn Error>> {
    let mut w = csv::Writer::from_path(Path::new(OUT_DIR).join("change-heat-death-rate.csv"))?;
    w.write_record(["Entity", "Code", "Year", "HeatDeathRate"])?;
    for (entity, code, _) in COUNTRIES {
        let mut rate = rng.range(-20.0, 10.0);
        let drift = rng.range(-35.0, 20.0);
        for year in (2030..=2090).step_by(10) {
            let year = year.to_string();
            let rate_s = format!("{rate:.2}");
            w.write_record([entity, code, year.as_str(), rate_s.as_str()])?;
            rate += drift + rng.range(-8.0, 8.0);
        }
    }
    // One codeless aggregate, as the real dataset has.
    let mut rate = -5.0f64;
    for year in (2030..=2090).step_by(10) {
        let year = year.to_string();
        let rate_s = format!("{rate:.2}");
        w.write_record(["World", "", year.as_str(), rate_s.as_str()])?;
        rate -= 4.0;
    }
    w.flush()?;
    Ok(())
}

fn write_indicator(
    rng: &mut SimpleRng,
    file: &str,
    value_column: &str,
    lo: f64,
    hi: f64,
) -> Result<(), Box<dyn Error>> {
    let mut w = csv::Writer::from_path(Path::new(OUT_DIR).join(file))?;
    w.write_record(["Entity", "Code", "Year", value_column, "HeatDeath", "Continent"])?;
    for (entity, code, continent) in COUNTRIES {
        let value = format!("{:.4}", rng.log_range(lo, hi));
        let heat_death = format!("{:.2}", rng.range(-70.0, 35.0));
        w.write_record([entity, code, "2021", value.as_str(), "", ""])?;
        w.write_record([entity, code, "2030", "", heat_death.as_str(), ""])?;
        w.write_record([entity, code, "2015", "", "", continent])?;
    }
    w.flush()?;
    Ok(())
}

fn write_geojson(rng: &mut SimpleRng) -> Result<(), Box<dyn Error>> {
    // One rectangle per country on a 5 × 4 grid; crude but honors the
    // schema (features keyed by ISO code).
    let features: Vec<serde_json::Value> = COUNTRIES
        .iter()
        .enumerate()
        .map(|(i, (entity, code, _))| {
            let col = (i % 5) as f64;
            let row = (i / 5) as f64;
            let lon0 = -170.0 + col * 68.0 + rng.range(0.0, 4.0);
            let lat0 = -80.0 + row * 42.0 + rng.range(0.0, 4.0);
            let (lon1, lat1) = (lon0 + 52.0, lat0 + 30.0);
            json!({
                "type": "Feature",
                "id": code,
                "properties": { "name": entity },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [lon0, lat0], [lon1, lat0], [lon1, lat1], [lon0, lat1], [lon0, lat0]
                    ]]
                }
            })
        })
        .collect();
    let collection = json!({ "type": "FeatureCollection", "features": features });
    fs::write(
        Path::new(OUT_DIR).join("world-countries.geo.json"),
        serde_json::to_string_pretty(&collection)?,
    )?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(OUT_DIR)?;
    let mut rng = SimpleRng::new(42);

    write_work_hours(&mut rng)?;
    write_mortality(&mut rng)?;
    write_heat_trend(&mut rng)?;
    write_indicator(
        &mut rng,
        "change-heat-deaths-gdp.csv",
        "GDP",
        1_000.0,
        90_000.0,
    )?;
    write_indicator(
        &mut rng,
        "heat-death-rate-vs-co2.csv",
        "AnnualCO2Emissions",
        0.05,
        38.0,
    )?;
    write_geojson(&mut rng)?;

    println!(
        "Wrote sample datasets for {} countries to {OUT_DIR}/",
        COUNTRIES.len()
    );
    Ok(())
}
