use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for tianqi
#[derive(Debug, Parser)]
#[command(
    name = "tianqi",
    version,
    about = "Show the seven-day forecast for a Chinese city"
)]
pub struct CliArgs {
    /// City to look up (e.g. 北京 or 海淀)
    ///
    /// Falls back to `weather.default_city`, then to the API's IP-based location.
    pub city: Option<String>,

    /// Path to the TOML configuration file
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Path to a city code dataset replacing the bundled one
    #[arg(short = 'd', long = "dataset")]
    pub dataset: Option<PathBuf>,
}
