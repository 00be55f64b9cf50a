//! Point series for the high/low temperature charts.
//!
//! Each point sits `(t - avg) * TREND_SCALE` pixels above the chart's
//! midline, where `avg` is the integer mean of the displayed days.

use crate::types::{DayForecast, Forecast, DISPLAY_DAYS};
use serde::Serialize;

/// Pixels per degree away from the average
pub const TREND_SCALE: i32 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub value: i32,
    /// Distance above the midline; negative values sit below it
    pub offset: i32,
    /// Text drawn next to the point, e.g. `28°`
    pub label: String,
}

impl TrendPoint {
    /// Vertical pixel position for a chart whose midline is at `middle`
    pub fn y(&self, middle: i32) -> i32 {
        middle.saturating_sub(self.offset)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrendSeries {
    pub average: i32,
    pub points: Vec<TrendPoint>,
}

impl TrendSeries {
    /// Build a series from display strings; unparsable values count as 0
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = values.into_iter().collect();
        if labels.is_empty() {
            return Self::default();
        }

        let numbers: Vec<i32> = labels.iter().map(|s| parse_temperature(s)).collect();
        // Widen so that any i32 the API sends can be summed and scaled
        let sum: i64 = numbers.iter().map(|&n| i64::from(n)).sum();
        let average = clamp_to_i32(sum / numbers.len() as i64);

        let points = labels
            .iter()
            .zip(&numbers)
            .map(|(label, &value)| TrendPoint {
                value,
                offset: clamp_to_i32(
                    (i64::from(value) - i64::from(average)) * i64::from(TREND_SCALE),
                ),
                label: format!("{}°", label),
            })
            .collect();

        Self { average, points }
    }

    /// Daily highs of the displayed days
    pub fn high(forecast: &Forecast) -> Self {
        Self::from_days(forecast, |d| &d.temp_high)
    }

    /// Daily lows of the displayed days
    pub fn low(forecast: &Forecast) -> Self {
        Self::from_days(forecast, |d| &d.temp_low)
    }

    fn from_days(forecast: &Forecast, field: impl Fn(&DayForecast) -> &String) -> Self {
        Self::from_values(
            forecast
                .days()
                .iter()
                .take(DISPLAY_DAYS)
                .map(|d| field(d).as_str()),
        )
    }
}

fn clamp_to_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

/// Whole-degree value of a temperature string, 0 if it isn't an integer
pub fn parse_temperature(value: &str) -> i32 {
    value.trim().parse().unwrap_or(0)
}
