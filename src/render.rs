//! Plain-text rendering of a `ForecastView` for the terminal.

use std::fmt::Write;
use tianqi_weather::{ForecastView, TrendSeries};

pub fn render(view: &ForecastView) -> String {
    let mut out = String::new();
    let h = &view.headline;

    let _ = writeln!(out, "{}", h.date_line);
    let _ = writeln!(out, "{}  {}  {}", h.city, h.temperature, h.weather_type);
    let _ = writeln!(out, "  温度    {}", h.range);
    let _ = writeln!(out, "  风向    {} {}", h.wind_direction, h.wind_level);
    let _ = writeln!(out, "  PM2.5   {}", h.pm25);
    let _ = writeln!(out, "  湿度    {}", h.humidity);
    let _ = writeln!(out, "  空气    {}", h.air_quality);
    if !h.tip.is_empty() {
        let _ = writeln!(out, "  {}", h.tip);
    }
    out.push('\n');

    for column in &view.columns {
        let stale = if column.fresh { "" } else { " (旧)" };
        let _ = writeln!(
            out,
            "{:<4} {:<6} {:<10} {:<6} {} {}{}",
            column.week_label,
            column.date_label,
            column.weather_type,
            column.air_quality,
            column.wind_direction,
            column.wind_level,
            stale
        );
    }
    out.push('\n');

    let _ = writeln!(out, "最高 {}", trend_line(&view.high_trend));
    let _ = writeln!(out, "最低 {}", trend_line(&view.low_trend));
    out
}

fn trend_line(series: &TrendSeries) -> String {
    series
        .points
        .iter()
        .map(|p| p.label.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
