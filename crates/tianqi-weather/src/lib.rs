//! Weather forecast core for Tianqi
//!
//! Resolves city names to tianqiapi.com city codes, fetches the 7-day
//! forecast, and turns the response into a fixed seven-slot model plus
//! display-ready values.

pub mod city;
pub mod condition;
pub mod parser;
pub mod provider;
pub mod session;
pub mod trend;
pub mod types;
pub mod view;

pub use city::{validate_city_name, CityCodeIndex, DatasetSource, LazyCityIndex};
pub use condition::{AirQuality, Rgb, WeatherIcon};
pub use parser::{parse as parse_forecast, ParseOutcome};
pub use provider::{ApiEndpoint, WeatherProvider};
pub use session::WeatherSession;
pub use trend::{TrendPoint, TrendSeries};
pub use types::*;
pub use view::{DayColumn, ForecastView, Headline};
