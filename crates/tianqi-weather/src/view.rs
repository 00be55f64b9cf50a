//! Display-ready values derived from a `Forecast`.
//!
//! Nothing here renders; the window (or the CLI) reads these strings and
//! classifications and lays them out.

use crate::condition::{AirQuality, WeatherIcon};
use crate::trend::TrendSeries;
use crate::types::{DayForecast, Forecast, DISPLAY_DAYS};
use serde::Serialize;

/// Relative day names replacing the weekday on the first three columns
pub const RELATIVE_DAY_LABELS: [&str; 3] = ["今天", "明天", "后天"];

/// Today's panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Headline {
    /// `2025-06-01  星期日`
    pub date_line: String,
    pub city: String,
    /// `25℃`
    pub temperature: String,
    /// `20℃~28℃`
    pub range: String,
    pub weather_type: String,
    pub icon: WeatherIcon,
    pub tip: String,
    pub wind_direction: String,
    pub wind_level: String,
    pub pm25: String,
    pub humidity: String,
    pub air_quality: String,
    pub air_quality_bucket: Option<AirQuality>,
}

/// One column of the multi-day strip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub week_label: String,
    /// `MM-DD`
    pub date_label: String,
    pub icon: WeatherIcon,
    pub weather_type: String,
    pub air_quality: String,
    pub air_quality_bucket: Option<AirQuality>,
    pub wind_direction: String,
    pub wind_level: String,
    /// False when the slot was not part of the latest response
    pub fresh: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForecastView {
    pub headline: Headline,
    pub columns: Vec<DayColumn>,
    pub high_trend: TrendSeries,
    pub low_trend: TrendSeries,
}

impl ForecastView {
    pub fn from_forecast(forecast: &Forecast) -> Self {
        let columns = forecast
            .days()
            .iter()
            .take(DISPLAY_DAYS)
            .enumerate()
            .map(|(i, day)| DayColumn::new(i, day, forecast.is_fresh(i)))
            .collect();

        Self {
            headline: Headline::from_day(forecast.today()),
            columns,
            high_trend: TrendSeries::high(forecast),
            low_trend: TrendSeries::low(forecast),
        }
    }
}

impl Headline {
    fn from_day(day: &DayForecast) -> Self {
        Self {
            date_line: format!("{}  {}", day.date, day.week),
            city: city_label(&day.city),
            temperature: format!("{}℃", day.temp),
            range: format!("{}℃~{}℃", day.temp_low, day.temp_high),
            weather_type: day.weather_type.clone(),
            icon: WeatherIcon::resolve(&day.weather_type),
            tip: day.tip.clone(),
            wind_direction: day.wind_direction.clone(),
            wind_level: day.wind_level.clone(),
            pm25: day.pm25.clone(),
            humidity: day.humidity.clone(),
            air_quality: day.air_quality_level.clone(),
            air_quality_bucket: AirQuality::classify(&day.air_quality_level),
        }
    }
}

impl DayColumn {
    fn new(index: usize, day: &DayForecast, fresh: bool) -> Self {
        Self {
            week_label: week_label(index, &day.week).to_string(),
            date_label: date_label(&day.date),
            icon: WeatherIcon::resolve(&day.weather_type),
            weather_type: day.weather_type.clone(),
            air_quality: day.air_quality_level.clone(),
            air_quality_bucket: AirQuality::classify(&day.air_quality_level),
            wind_direction: day.wind_direction.clone(),
            wind_level: day.wind_level.clone(),
            fresh,
        }
    }
}

/// `今天`/`明天`/`后天` for the first three days, the weekday otherwise
pub fn week_label(index: usize, week: &str) -> &str {
    RELATIVE_DAY_LABELS.get(index).copied().unwrap_or(week)
}

/// `MM-DD` from `YYYY-MM-DD`; other shapes are returned unchanged
pub fn date_label(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [_, month, day] => format!("{}-{}", month, day),
        _ => date.to_string(),
    }
}

/// City name as shown in the headline: `市` is always appended, except
/// to an empty name before any forecast has arrived
pub fn city_label(city: &str) -> String {
    if city.is_empty() {
        String::new()
    } else {
        format!("{}市", city)
    }
}
