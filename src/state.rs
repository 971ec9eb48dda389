use crate::chart::tooltip::Tooltip;
use crate::chart::transition::LineTransition;
use crate::data::filter::CountryIndicator;
use crate::data::geo::CountryShape;
use crate::data::loader::Fetch;
use crate::data::model::{MortalityRow, TrendRow, WorkHoursRow};
use crate::slides::{self, SlideId};

// ---------------------------------------------------------------------------
// Dataset load state
// ---------------------------------------------------------------------------

/// Lifecycle of one remote dataset. A failed load leaves its slide blank;
/// there is no retry and no user-facing error surface.
pub enum LoadState<T> {
    Loading(Fetch<T>),
    Ready(T),
    Failed,
}

impl<T> LoadState<T> {
    /// Check the background fetch once; called every frame.
    pub fn poll(&mut self, label: &str) {
        if let LoadState::Loading(fetch) = self {
            if let Some(result) = fetch.try_take() {
                *self = match result {
                    Ok(value) => {
                        log::info!("dataset ready: {label}");
                        LoadState::Ready(value)
                    }
                    Err(e) => {
                        log::error!("{e:#}");
                        LoadState::Failed
                    }
                };
            }
        }
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            LoadState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading(_))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }
}

/// Every dataset the deck needs, each loading independently; arrival order
/// is whatever the network produces.
pub struct Datasets {
    pub work_hours: LoadState<Vec<WorkHoursRow>>,
    pub mortality: LoadState<Vec<MortalityRow>>,
    pub trend: LoadState<Vec<TrendRow>>,
    pub heat_gdp: LoadState<Vec<CountryIndicator>>,
    pub heat_co2: LoadState<Vec<CountryIndicator>>,
    pub map_rates: LoadState<Vec<TrendRow>>,
    pub countries: LoadState<Vec<CountryShape>>,
}

impl Datasets {
    /// Start all fetches, one background thread each.
    pub fn spawn_all() -> Self {
        Self {
            work_hours: LoadState::Loading(slides::work_hours::fetch()),
            mortality: LoadState::Loading(slides::mortality_bars::fetch()),
            trend: LoadState::Loading(slides::heat_trend::fetch()),
            heat_gdp: LoadState::Loading(slides::heat_gdp::fetch()),
            heat_co2: LoadState::Loading(slides::heat_co2::fetch()),
            map_rates: LoadState::Loading(slides::world_map::fetch_rates()),
            countries: LoadState::Loading(slides::world_map::fetch_countries()),
        }
    }

    pub fn poll(&mut self) {
        self.work_hours.poll("hours worked vs. GDP");
        self.mortality.poll("temperature-band mortality");
        self.trend.poll("projected heat death rate");
        self.heat_gdp.poll("heat deaths vs. GDP");
        self.heat_co2.poll("heat deaths vs. CO2");
        self.map_rates.poll("map heat death rate");
        self.countries.poll("country polygons");
    }

    pub fn any_loading(&self) -> bool {
        self.work_hours.is_loading()
            || self.mortality.is_loading()
            || self.trend.is_loading()
            || self.heat_gdp.is_loading()
            || self.heat_co2.is_loading()
            || self.map_rates.is_loading()
            || self.countries.is_loading()
    }

    /// (ready, total) dataset counts for the status bar.
    pub fn ready_count(&self) -> (usize, usize) {
        let ready = [
            self.work_hours.is_ready(),
            self.mortality.is_ready(),
            self.trend.is_ready(),
            self.heat_gdp.is_ready(),
            self.heat_co2.is_ready(),
            self.map_rates.is_ready(),
            self.countries.is_ready(),
        ];
        (ready.iter().filter(|r| **r).count(), ready.len())
    }
}

// ---------------------------------------------------------------------------
// Per-slide view state
// ---------------------------------------------------------------------------

/// Selector state for the trend slide: the chosen entity plus the line
/// animation in flight, if any.
#[derive(Default)]
pub struct TrendView {
    pub selected: Option<String>,
    pub transition: Option<LineTransition>,
}

/// Mutable view state the slides carry across frames. Each chart owns its
/// tooltip; only one is ever visible per chart.
#[derive(Default)]
pub struct ViewState {
    pub work_hours_tip: Tooltip,
    pub mortality_tip: Tooltip,
    pub heat_gdp_tip: Tooltip,
    pub heat_co2_tip: Tooltip,
    pub map_tip: Tooltip,
    pub trend: TrendView,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

pub struct AppState {
    pub current: SlideId,
    pub data: Datasets,
    pub view: ViewState,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            current: SlideId::ALL[0],
            data: Datasets::spawn_all(),
            view: ViewState::default(),
        }
    }
}
