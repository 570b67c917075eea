//! Tracing / logging initialisation helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors from loading a [`LogConfig`].
#[derive(Debug, Error)]
pub enum LogConfigError {
    #[error("Invalid log config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid log directive '{directive}': {reason}")]
    Directive { directive: String, reason: String },
}

/// Log level per component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Global default level: "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default = "default_level")]
    pub level: String,
    /// Override per component: crate name → level, e.g. `chainform-core = "trace"`
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Emit JSON structured logs (true) or human-readable text (false)
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            components: BTreeMap::new(),
            json: false,
        }
    }
}

impl LogConfig {
    /// Parse a JSON config and check that its directives are well formed.
    pub fn from_json(json: &str) -> Result<Self, LogConfigError> {
        let config: LogConfig = serde_json::from_str(json)?;
        config.env_filter()?;
        Ok(config)
    }

    /// The filter directive string: `"info,chainform_core=debug"` etc.
    pub fn directives(&self) -> String {
        let mut directives = self.level.clone();
        for (component, level) in &self.components {
            directives.push_str(&format!(",{}={}", component.replace('-', "_"), level));
        }
        directives
    }

    fn env_filter(&self) -> Result<EnvFilter, LogConfigError> {
        let directives = self.directives();
        EnvFilter::try_new(&directives).map_err(|e| LogConfigError::Directive {
            directive: directives,
            reason: e.to_string(),
        })
    }
}

/// Initialise tracing with the given log config.
/// Should be called once at application startup.
pub fn init_tracing(config: &LogConfig) {
    let filter = config.env_filter().unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}
