//! Decoding of tianqiapi.com v9 forecast responses into a `Forecast`.

use crate::types::{DayForecast, Forecast, ForecastError, FORECAST_DAYS};
use serde_json::{Map, Value};

/// Position of the advisory inside each day's `index` array
pub const TIP_INDEX_POSITION: usize = 3;

/// What a successful parse changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// `data` was present; this many leading slots were rewritten
    Updated { days: usize },
    /// No `data` array; only slot 0's city and PM2.5 were rewritten
    HeaderOnly,
}

impl ParseOutcome {
    pub fn days_written(&self) -> usize {
        match self {
            Self::Updated { days } => *days,
            Self::HeaderOnly => 0,
        }
    }

    /// Whether the display should refresh its day columns
    pub fn has_days(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }
}

/// Decode `raw` and write it into `into`.
///
/// Missing or non-string fields become empty strings, as does a tip whose
/// `index` array is shorter than four entries. Slots past the end of `data`
/// keep their previous contents.
///
/// # Errors
///
/// Fails without touching `into` if `raw` isn't JSON or its root isn't an
/// object.
pub fn parse(raw: &[u8], into: &mut Forecast) -> Result<ParseOutcome, ForecastError> {
    let root: Value = serde_json::from_slice(raw)?;
    let root = root.as_object().ok_or(ForecastError::NotAnObject)?;

    let today = &mut into.days_mut()[0];
    today.city = text(root.get("city"));
    today.pm25 = text(root.get("aqi").and_then(|aqi| aqi.get("pm25")));

    let Some(data) = root.get("data").and_then(Value::as_array) else {
        into.set_fresh_days(0);
        tracing::debug!("Forecast response has no data array");
        return Ok(ParseOutcome::HeaderOnly);
    };

    let empty = Map::new();
    let mut written = 0;
    for (slot, entry) in into.days_mut().iter_mut().zip(data.iter().take(FORECAST_DAYS)) {
        fill_day(slot, entry.as_object().unwrap_or(&empty));
        written += 1;
    }
    into.set_fresh_days(written);

    if data.len() > FORECAST_DAYS {
        tracing::debug!("Ignoring {} days past the seventh", data.len() - FORECAST_DAYS);
    }
    tracing::info!("Parsed forecast for {:?}: {} days", into.today().city, written);
    Ok(ParseOutcome::Updated { days: written })
}

fn fill_day(slot: &mut DayForecast, day: &Map<String, Value>) {
    slot.date = text(day.get("date"));
    slot.week = text(day.get("week"));
    slot.weather_type = text(day.get("wea"));
    slot.temp = text(day.get("tem"));
    slot.temp_low = text(day.get("tem2"));
    slot.temp_high = text(day.get("tem1"));
    slot.wind_direction = text(day.get("win").and_then(|w| w.get(0)));
    slot.wind_level = text(day.get("win_speed"));
    slot.air_quality_level = text(day.get("air_level"));
    slot.humidity = text(day.get("humidity"));
    slot.tip = text(
        day.get("index")
            .and_then(|i| i.get(TIP_INDEX_POSITION))
            .and_then(|entry| entry.get("desc")),
    );
}

fn text(value: Option<&Value>) -> String {
    value.and_then(Value::as_str).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_DAY: &str = r#"{"city":"Beijing","data":[{"date":"2025-06-01","wea":"晴","tem":"25","tem1":"28","tem2":"20","win":["北风"],"win_speed":"3级","air_level":"优","humidity":"40%","index":[{},{},{},{"desc":"适宜出行"}]}]}"#;

    fn day_json(date: &str, wea: &str) -> Value {
        serde_json::json!({
            "date": date,
            "week": "星期一",
            "wea": wea,
            "tem": "20",
            "tem1": "24",
            "tem2": "15",
            "win": ["南风", "西南风"],
            "win_speed": "2级",
            "air_level": "良",
            "humidity": "55%",
            "index": [
                {"title": "紫外线指数"},
                {"title": "减肥指数"},
                {"title": "血糖指数"},
                {"title": "穿衣指数", "desc": "建议穿薄外套"}
            ]
        })
    }

    fn response(days: usize) -> Vec<u8> {
        let data: Vec<Value> = (0..days)
            .map(|i| day_json(&format!("2025-06-{:02}", i + 1), "多云"))
            .collect();
        serde_json::to_vec(&serde_json::json!({
            "city": "北京",
            "aqi": {"pm25": "35", "air_level": "良"},
            "data": data
        }))
        .unwrap()
    }

    fn stale_forecast() -> Forecast {
        let mut forecast = Forecast::new();
        for (i, day) in forecast.days_mut().iter_mut().enumerate() {
            day.date = format!("stale-{}", i);
            day.weather_type = "阴".to_string();
        }
        forecast.set_fresh_days(FORECAST_DAYS);
        forecast
    }

    #[test]
    fn test_single_day_response() {
        let mut forecast = stale_forecast();
        let before = forecast.clone();

        let outcome = parse(SINGLE_DAY.as_bytes(), &mut forecast).unwrap();
        assert_eq!(outcome, ParseOutcome::Updated { days: 1 });

        let today = forecast.today();
        assert_eq!(today.city, "Beijing");
        assert_eq!(today.date, "2025-06-01");
        assert_eq!(today.weather_type, "晴");
        assert_eq!(today.temp, "25");
        assert_eq!(today.temp_high, "28");
        assert_eq!(today.temp_low, "20");
        assert_eq!(today.wind_direction, "北风");
        assert_eq!(today.wind_level, "3级");
        assert_eq!(today.air_quality_level, "优");
        assert_eq!(today.humidity, "40%");
        assert_eq!(today.tip, "适宜出行");
        assert_eq!(today.pm25, "");
        assert_eq!(
            crate::condition::AirQuality::classify(&today.air_quality_level),
            Some(crate::condition::AirQuality::Excellent)
        );

        assert_eq!(&forecast.days()[1..], &before.days()[1..]);
        assert_eq!(forecast.fresh_days(), 1);
    }

    #[test]
    fn test_full_week() {
        let mut forecast = Forecast::new();
        let outcome = parse(&response(7), &mut forecast).unwrap();
        assert_eq!(outcome.days_written(), 7);
        assert_eq!(forecast.fresh_days(), 7);
        assert_eq!(forecast.today().city, "北京");
        assert_eq!(forecast.today().pm25, "35");
        assert_eq!(forecast.days()[6].date, "2025-06-07");
        assert_eq!(forecast.days()[6].tip, "建议穿薄外套");
        assert_eq!(forecast.days()[3].wind_direction, "南风");
    }

    #[test]
    fn test_city_and_pm25_only_on_first_slot() {
        let mut forecast = Forecast::new();
        parse(&response(3), &mut forecast).unwrap();
        assert_eq!(forecast.days()[1].city, "");
        assert_eq!(forecast.days()[1].pm25, "");
    }

    #[test]
    fn test_extra_days_are_ignored() {
        let mut forecast = Forecast::new();
        let outcome = parse(&response(9), &mut forecast).unwrap();
        assert_eq!(outcome.days_written(), FORECAST_DAYS);
        assert_eq!(forecast.days()[6].date, "2025-06-07");
    }

    #[test]
    fn test_short_response_keeps_stale_tail() {
        let mut forecast = stale_forecast();
        parse(&response(3), &mut forecast).unwrap();

        assert_eq!(forecast.fresh_days(), 3);
        assert_eq!(forecast.days()[2].date, "2025-06-03");
        for i in 3..FORECAST_DAYS {
            assert_eq!(forecast.days()[i].date, format!("stale-{}", i));
            assert_eq!(forecast.days()[i].weather_type, "阴");
            assert!(!forecast.is_fresh(i));
        }
    }

    #[test]
    fn test_not_json_leaves_forecast_untouched() {
        let mut forecast = stale_forecast();
        let before = forecast.clone();
        let err = parse(b"not json", &mut forecast).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidJson(_)));
        assert_eq!(forecast, before);
    }

    #[test]
    fn test_non_object_root_leaves_forecast_untouched() {
        let mut forecast = stale_forecast();
        let before = forecast.clone();
        let inputs: [&[u8]; 4] = [b"[1,2,3]", b"\"text\"", b"42", b"null"];
        for raw in inputs {
            let err = parse(raw, &mut forecast).unwrap_err();
            assert!(matches!(err, ForecastError::NotAnObject));
        }
        assert_eq!(forecast, before);
    }

    #[test]
    fn test_missing_data_updates_header_only() {
        let mut forecast = stale_forecast();
        let raw = r#"{"city":"上海","aqi":{"pm25":"12"}}"#;
        let outcome = parse(raw.as_bytes(), &mut forecast).unwrap();

        assert_eq!(outcome, ParseOutcome::HeaderOnly);
        assert!(!outcome.has_days());
        assert_eq!(forecast.today().city, "上海");
        assert_eq!(forecast.today().pm25, "12");
        assert_eq!(forecast.today().date, "stale-0");
        assert_eq!(forecast.fresh_days(), 0);
    }

    #[test]
    fn test_non_array_data_is_skipped() {
        let mut forecast = stale_forecast();
        let raw = r#"{"city":"上海","data":{"date":"x"}}"#;
        let outcome = parse(raw.as_bytes(), &mut forecast).unwrap();
        assert_eq!(outcome, ParseOutcome::HeaderOnly);
        assert_eq!(forecast.today().date, "stale-0");
    }

    #[test]
    fn test_missing_city_clears_city() {
        let mut forecast = Forecast::new();
        parse(SINGLE_DAY.as_bytes(), &mut forecast).unwrap();
        parse(br#"{"data":[]}"#, &mut forecast).unwrap();
        assert_eq!(forecast.today().city, "");
        assert_eq!(forecast.fresh_days(), 0);
    }

    #[test]
    fn test_short_index_gives_empty_tip() {
        let mut forecast = stale_forecast();
        forecast.days_mut()[0].tip = "old tip".to_string();
        let raw = r#"{"data":[{"date":"2025-06-01","wea":"晴","index":[{},{},{"desc":"third"}]}]}"#;
        parse(raw.as_bytes(), &mut forecast).unwrap();
        assert_eq!(forecast.today().tip, "");
        assert_eq!(forecast.today().weather_type, "晴");
    }

    #[test]
    fn test_missing_index_gives_empty_tip() {
        let mut forecast = Forecast::new();
        parse(br#"{"data":[{"date":"2025-06-01"}]}"#, &mut forecast).unwrap();
        assert_eq!(forecast.today().tip, "");
        assert_eq!(forecast.today().wind_direction, "");
    }

    #[test]
    fn test_non_string_values_read_as_empty() {
        let mut forecast = Forecast::new();
        let raw = br#"{"city":7,"data":[{"tem":25,"win":"north","humidity":null}]}"#;
        parse(raw, &mut forecast).unwrap();
        assert_eq!(forecast.today().city, "");
        assert_eq!(forecast.today().temp, "");
        assert_eq!(forecast.today().wind_direction, "");
        assert_eq!(forecast.today().humidity, "");
    }

    #[test]
    fn test_non_object_day_clears_slot() {
        let mut forecast = stale_forecast();
        parse(br#"{"data":[42]}"#, &mut forecast).unwrap();
        assert_eq!(forecast.today().date, "");
        assert_eq!(forecast.today().weather_type, "");
        assert_eq!(forecast.fresh_days(), 1);
    }

    #[test]
    fn test_parse_is_idempotent() {
        let raw = response(4);
        let mut once = stale_forecast();
        parse(&raw, &mut once).unwrap();

        let mut twice = stale_forecast();
        parse(&raw, &mut twice).unwrap();
        parse(&raw, &mut twice).unwrap();

        assert_eq!(once, twice);
    }
}
