//! Maps forecast errors onto tianqi_core::AppError for user-facing messages.

use tianqi_core::{AppError, ConfigError, NetworkError, ReqwestErrorExt, WeatherError};
use tianqi_weather::WeatherError as ForecastFailure;

pub fn to_app_error(e: ForecastFailure) -> AppError {
    match e {
        ForecastFailure::Network(e) => AppError::Network(e.into_network_error()),
        ForecastFailure::HttpStatus(status) => AppError::Network(NetworkError::ServerError {
            status,
            message: format!("HTTP {}", status),
        }),
        ForecastFailure::Url(e) => AppError::Config(ConfigError::Invalid(e.to_string())),
        ForecastFailure::InvalidCityName(s) => AppError::Weather(WeatherError::InvalidCityName(s)),
        ForecastFailure::CityNotFound(s) => AppError::Weather(WeatherError::CityNotFound(s)),
        ForecastFailure::Dataset(e) => {
            AppError::Weather(WeatherError::DatasetUnavailable(e.to_string()))
        }
        ForecastFailure::Parse(e) => AppError::Weather(WeatherError::ParseFailed(e.to_string())),
    }
}

/// Startup failures from config loading and `App`; config errors keep their
/// own user message, anything else is reported as unknown.
pub fn setup_error(e: anyhow::Error) -> AppError {
    match e.downcast::<ConfigError>() {
        Ok(config) => AppError::Config(config),
        Err(other) => AppError::Other(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tianqi_weather::{CityIndexError, ForecastError};

    #[test]
    fn test_city_errors_ask_for_valid_name() {
        for e in [
            ForecastFailure::CityNotFound("火星".into()),
            ForecastFailure::InvalidCityName("!!".into()),
        ] {
            assert_eq!(to_app_error(e).user_message(), "请输入正确的城市名称");
        }
    }

    #[test]
    fn test_http_status_maps_to_server_error() {
        let app = to_app_error(ForecastFailure::HttpStatus(503));
        assert!(matches!(
            app,
            AppError::Network(NetworkError::ServerError { status: 503, .. })
        ));
    }

    #[test]
    fn test_parse_failure_reports_request_failure() {
        let app = to_app_error(ForecastFailure::Parse(ForecastError::NotAnObject));
        assert_eq!(app.user_message(), "网络请求失败");
    }

    #[test]
    fn test_dataset_failure() {
        let app = to_app_error(ForecastFailure::Dataset(
            CityIndexError::DatasetUnavailable("missing".into()),
        ));
        assert!(matches!(
            app,
            AppError::Weather(WeatherError::DatasetUnavailable(_))
        ));
    }

    #[test]
    fn test_setup_error_keeps_config_message() {
        let e = anyhow::Error::from(ConfigError::ParseError("config.toml".into()));
        let app = setup_error(e);
        assert!(matches!(app, AppError::Config(ConfigError::ParseError(_))));
        assert_eq!(app.user_message(), "配置文件格式错误，请检查设置");
    }

    #[test]
    fn test_setup_error_falls_back_to_other() {
        let app = setup_error(anyhow::anyhow!("disk full"));
        assert!(matches!(app, AppError::Other(_)));
    }
}
