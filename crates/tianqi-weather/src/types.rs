use serde::{Deserialize, Serialize};

/// Number of forecast slots kept per session
pub const FORECAST_DAYS: usize = 7;

/// Number of leading slots shown in the day columns and trend charts
pub const DISPLAY_DAYS: usize = 6;

/// One calendar day of the forecast, as delivered by the API.
///
/// Every value is kept as display text; numeric fields such as the
/// temperatures are parsed only where a number is needed (see `trend`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayForecast {
    /// Only populated on slot 0
    pub city: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// Weekday name, e.g. `星期日`
    pub week: String,
    /// May contain a transition, e.g. `多云转晴`
    pub weather_type: String,
    pub temp: String,
    pub temp_low: String,
    pub temp_high: String,
    pub wind_direction: String,
    pub wind_level: String,
    pub air_quality_level: String,
    pub humidity: String,
    /// Only populated on slot 0
    pub pm25: String,
    pub tip: String,
}

/// Fixed seven-slot forecast with an explicit count of fresh slots.
///
/// A parse overwrites slots `0..n` where `n` is the number of days in the
/// response (capped at seven). Slots from `fresh_days()` onward keep whatever
/// an earlier response stored and must be treated as stale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Forecast {
    days: [DayForecast; FORECAST_DAYS],
    fresh_days: usize,
}

impl Forecast {
    pub fn new() -> Self {
        Self::default()
    }

    /// All seven slots, fresh or not
    pub fn days(&self) -> &[DayForecast; FORECAST_DAYS] {
        &self.days
    }

    pub fn day(&self, index: usize) -> Option<&DayForecast> {
        self.days.get(index)
    }

    /// Slot 0, which also carries the city and PM2.5 reading
    pub fn today(&self) -> &DayForecast {
        &self.days[0]
    }

    /// Number of leading slots written by the most recent parse
    pub fn fresh_days(&self) -> usize {
        self.fresh_days
    }

    pub fn is_fresh(&self, index: usize) -> bool {
        index < self.fresh_days
    }

    /// Only the slots written by the most recent parse
    pub fn fresh(&self) -> &[DayForecast] {
        &self.days[..self.fresh_days]
    }

    pub(crate) fn days_mut(&mut self) -> &mut [DayForecast; FORECAST_DAYS] {
        &mut self.days
    }

    pub(crate) fn set_fresh_days(&mut self, count: usize) {
        self.fresh_days = count.min(FORECAST_DAYS);
    }
}

/// Reason a city dataset could not be turned into an index
#[derive(Debug, thiserror::Error)]
pub enum CityIndexError {
    #[error("City dataset unavailable: {0}")]
    DatasetUnavailable(String),
}

/// Reason a forecast response was rejected without touching the forecast
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Response root is not a JSON object")]
    NotAnObject,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Weather API returned HTTP {0}")]
    HttpStatus(u16),
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("Invalid city name: {0:?}")]
    InvalidCityName(String),
    #[error("No city code for {0:?}")]
    CityNotFound(String),
    #[error(transparent)]
    Dataset(#[from] CityIndexError),
    #[error("Parse error: {0}")]
    Parse(#[from] ForecastError),
}
