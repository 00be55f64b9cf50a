//! Centralized error types for the Tianqi application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-facing messages suitable for the forecast window
//! - Preserves full error context for logging

use thiserror::Error;

/// Top-level application error type.
///
/// Errors raised by the weather crate are mapped onto this type at the
/// application edge. Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Weather service error: {0}")]
    Weather(#[from] WeatherError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-facing message suitable for display in the UI.
    ///
    /// The forecast window shows these verbatim in its error dialog.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Io(_) => "文件读写失败，请重试",
            AppError::Other(_) => "发生未知错误，请重试",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => "网络请求失败，请检查网络连接",
            NetworkError::Timeout => "网络请求超时，请重试",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "天气服务暂时不可用，请稍后重试"
            }
            NetworkError::ServerError { .. } => "网络请求失败",
            NetworkError::InvalidResponse(_) => "网络请求失败",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "配置无效，请检查设置",
            ConfigError::ParseError(_) => "配置文件格式错误，请检查设置",
        }
    }
}

/// Weather service errors.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),

    #[error("Invalid city name: {0}")]
    InvalidCityName(String),

    #[error("City dataset unavailable: {0}")]
    DatasetUnavailable(String),

    #[error("Malformed forecast response: {0}")]
    ParseFailed(String),
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::CityNotFound(_) | WeatherError::InvalidCityName(_) => {
                "请输入正确的城市名称"
            }
            WeatherError::DatasetUnavailable(_) => "城市数据不可用，无法查询城市",
            WeatherError::ParseFailed(_) => "网络请求失败",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else if self.is_decode() || self.is_body() {
            NetworkError::InvalidResponse(self.to_string())
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
