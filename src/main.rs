//! tianqi: seven-day forecast for a Chinese city in the terminal.
//!
//!   $ tianqi 北京
//!   $ tianqi --dataset ./citycode.json 海淀
//!   $ tianqi                      # weather.default_city, else IP location
//!
//! Credentials come from the config file (`~/.config/tianqi/config.toml`)
//! or the `TIANQI_APP_ID` / `TIANQI_APP_SECRET` environment variables.
mod args;
mod error_mapping;
mod render;

use crate::args::CliArgs;
use crate::error_mapping::{setup_error, to_app_error};
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;
use tianqi_core::{App, AppError, Config};
use tianqi_weather::{ApiEndpoint, LazyCityIndex, WeatherProvider, WeatherSession};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &CliArgs) -> Result<(), AppError> {
    tianqi_core::init()?;

    let config = match &args.config {
        Some(path) => {
            let mut config = Config::load_from(path).map_err(setup_error)?;
            config.apply_overrides(
                std::env::var(tianqi_core::config::APP_ID_ENV).ok(),
                std::env::var(tianqi_core::config::APP_SECRET_ENV).ok(),
            );
            config
        }
        None => Config::load().map_err(setup_error)?,
    };

    let mut app = App::with_config(config).map_err(setup_error)?;
    app.initialize().map_err(setup_error)?;
    tracing::info!("Tianqi started");

    let result = forecast(app.config(), args).await;
    app.shutdown()?;
    result
}

async fn forecast(config: &Config, args: &CliArgs) -> Result<(), AppError> {
    let session = build_session(config, args).map_err(to_app_error)?;
    let city = args.city.as_deref().or(config.weather.default_city.as_deref());

    let outcome = match city {
        Some(name) => session.search(name).await,
        None => session.refresh(None).await,
    }
    .map_err(to_app_error)?;

    if !outcome.has_days() {
        tracing::warn!("Forecast response carried no daily entries");
    }
    print!("{}", render::render(&session.view()));
    Ok(())
}

fn build_session(
    config: &Config,
    args: &CliArgs,
) -> Result<WeatherSession, tianqi_weather::WeatherError> {
    if !config.api.is_configured() {
        tracing::warn!(
            "API credentials are placeholders; set {} and {}",
            tianqi_core::config::APP_ID_ENV,
            tianqi_core::config::APP_SECRET_ENV
        );
    }

    let endpoint = ApiEndpoint::new(
        &config.api.base_url,
        config.api.app_id.clone(),
        config.api.app_secret.clone(),
    )?
    .with_version(config.api.version.clone())
    .with_unescape(config.api.unescape);

    let timeout = Duration::from_secs(config.weather.request_timeout_secs);
    let provider = WeatherProvider::new(endpoint, timeout)?;

    let dataset = args
        .dataset
        .as_deref()
        .or(config.weather.city_dataset.as_deref());
    let cities = LazyCityIndex::from_optional_path(dataset);

    Ok(WeatherSession::new(cities, provider))
}
