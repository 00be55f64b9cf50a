//! One user's forecast session: city lookup, fetch, parse, view.

use crate::city::{validate_city_name, LazyCityIndex};
use crate::parser::{parse, ParseOutcome};
use crate::provider::WeatherProvider;
use crate::types::{Forecast, WeatherError};
use crate::view::ForecastView;
use parking_lot::RwLock;

#[derive(Debug)]
pub struct WeatherSession {
    cities: LazyCityIndex,
    provider: WeatherProvider,
    forecast: RwLock<Forecast>,
}

impl WeatherSession {
    pub fn new(cities: LazyCityIndex, provider: WeatherProvider) -> Self {
        Self {
            cities,
            provider,
            forecast: RwLock::new(Forecast::new()),
        }
    }

    /// City code for user input, without touching the network.
    ///
    /// # Errors
    ///
    /// `InvalidCityName` for malformed input, `CityNotFound` when no
    /// suffix variant is in the index.
    pub fn resolve_city(&self, input: &str) -> Result<String, WeatherError> {
        let name = validate_city_name(input)?;
        match self.cities.resolve(name) {
            Some(code) => Ok(code.to_string()),
            None => {
                if let Some(reason) = self.cities.load_error() {
                    tracing::warn!("City lookup ran against an empty index: {}", reason);
                }
                Err(WeatherError::CityNotFound(name.to_string()))
            }
        }
    }

    /// Look up `input`, fetch its forecast and store it.
    ///
    /// # Errors
    ///
    /// City errors are returned before any request is sent. Transport and
    /// parse failures leave the stored forecast unchanged.
    pub async fn search(&self, input: &str) -> Result<ParseOutcome, WeatherError> {
        let code = self.resolve_city(input)?;
        self.refresh(Some(&code)).await
    }

    /// Fetch the forecast for `city_code` (or the caller's location) and store it.
    ///
    /// # Errors
    ///
    /// Transport and parse failures leave the stored forecast unchanged.
    pub async fn refresh(&self, city_code: Option<&str>) -> Result<ParseOutcome, WeatherError> {
        let body = self.provider.fetch_raw(city_code).await?;

        let mut forecast = self.forecast.write();
        match parse(&body, &mut forecast) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                tracing::warn!("Discarding forecast response: {}", e);
                Err(e.into())
            }
        }
    }

    /// Copy of the stored forecast
    pub fn forecast(&self) -> Forecast {
        self.forecast.read().clone()
    }

    pub fn view(&self) -> ForecastView {
        ForecastView::from_forecast(&self.forecast.read())
    }

    pub fn cities(&self) -> &LazyCityIndex {
        &self.cities
    }
}
