use anyhow::{Context, Result};

use crate::config::{Config, ValidationResult};
use crate::error::ConfigError;

/// Main application state and lifecycle manager
pub struct App {
    config: Config,
    validation: ValidationResult,
}

impl App {
    /// Create an application instance around an already loaded configuration
    ///
    /// Fails with `ConfigError::Invalid` if validation reports errors; warnings
    /// are logged and kept.
    pub fn with_config(config: Config) -> Result<Self> {
        let validation = config.validate();
        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok(Self { config, validation })
    }

    /// Prepare the application directories
    pub fn initialize(&mut self) -> Result<()> {
        tracing::info!(
            "Initializing application ({} config warnings)",
            self.validation.warnings.len()
        );

        std::fs::create_dir_all(&self.config.config_dir)
            .context("Failed to create config directory")?;

        tracing::info!("Application initialized successfully");
        Ok(())
    }

    /// Shutdown the application
    pub fn shutdown(&mut self) -> Result<()> {
        tracing::info!("Shutting down application");
        Ok(())
    }

    /// Get reference to application config
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Warnings produced when the configuration was validated
    pub fn warnings(&self) -> &ValidationResult {
        &self.validation
    }
}
