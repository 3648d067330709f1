use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

use crate::session::SessionConfig;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub server: ServerConfig,
    pub capture: CaptureConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Base WebSocket URL of the assistant service
    pub url: String,
    /// Reconnect delay in milliseconds after an unexpected drop
    pub reconnect_delay_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct CaptureConfig {
    pub period_ms: u64,
    pub jpeg_quality: u8,
    pub width: u32,
    pub height: u32,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Load from `path`, falling back to defaults when no file exists.
    pub fn load_or_default(path: &str) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::info!("No config at {} ({}), using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Session settings derived from this config (fresh client id each call).
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            server_url: self.server.url.clone(),
            capture_period: Duration::from_millis(self.capture.period_ms),
            jpeg_quality: self.capture.jpeg_quality,
            reconnect_delay: Duration::from_millis(self.server.reconnect_delay_ms),
            ..SessionConfig::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig {
                name: "aura-client".to_string(),
            },
            server: ServerConfig {
                url: "ws://localhost:8000".to_string(),
                reconnect_delay_ms: 3000,
            },
            capture: CaptureConfig {
                period_ms: 1000,
                jpeg_quality: 70,
                width: 640,
                height: 480,
            },
        }
    }
}
