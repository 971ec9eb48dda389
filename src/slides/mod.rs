/// One module per slide; each is a bespoke data-transform-then-draw routine.
pub mod heat_co2;
pub mod heat_gdp;
pub mod heat_trend;
pub mod mortality_bars;
pub mod work_hours;
pub mod world_map;

/// Continents in legend order.
pub const CONTINENT_KEYS: [&str; 6] = [
    "Africa",
    "Asia",
    "Europe",
    "North America",
    "Oceania",
    "South America",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideId {
    WorkHours,
    MortalityBars,
    HeatTrend,
    HeatGdp,
    HeatCo2,
    WorldMap,
}

impl SlideId {
    pub const ALL: [SlideId; 6] = [
        SlideId::WorkHours,
        SlideId::MortalityBars,
        SlideId::HeatTrend,
        SlideId::HeatGdp,
        SlideId::HeatCo2,
        SlideId::WorldMap,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SlideId::WorkHours => "Working hours and prosperity",
            SlideId::MortalityBars => "Deaths by temperature band",
            SlideId::HeatTrend => "Projected heat death rates",
            SlideId::HeatGdp => "Heat deaths vs. GDP",
            SlideId::HeatCo2 => "Heat deaths vs. CO2",
            SlideId::WorldMap => "Projected heat deaths, mapped",
        }
    }

    pub fn narration(self) -> &'static str {
        match self {
            SlideId::WorkHours => {
                "Richer countries tend to work fewer hours. Each bubble is a country in \
                 2015, sized by population and colored by continent."
            }
            SlideId::MortalityBars => {
                "Cold kills far more people than heat today. Each bar splits a country's \
                 temperature-attributable deaths into four bands, sorted by the total share."
            }
            SlideId::HeatTrend => {
                "Climate change shifts that balance. Pick a country to see how its \
                 heat-related death rate is projected to change through 2090."
            }
            SlideId::HeatGdp => {
                "Projected heat deaths fall hardest on poorer countries. GDP per capita is \
                 on a logarithmic axis; the line marks no change."
            }
            SlideId::HeatCo2 => {
                "The countries projected to suffer most emit the least. Annual CO2 \
                 emissions are on a square-root axis to spread the small emitters."
            }
            SlideId::WorldMap => {
                "The same projection on a map: darker countries face the largest increase \
                 in heat-related deaths by 2090."
            }
        }
    }
}
