//! Configuration handling for the contact form

use crate::state::{default_field_specs, FieldSpec, Notification};
use crate::transport::SimulatedTransport;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default delay before typed input is validated
const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// User configuration for the form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormConfig {
    /// Simulated network round trip in milliseconds
    pub submit_delay_ms: Option<u64>,
    /// How long notifications stay on screen (0 = until dismissed)
    pub notification_duration_ms: Option<u64>,
    /// Pause in typing before a field is validated
    pub debounce_ms: Option<u64>,
    /// Make the simulated transport fail every send
    pub simulate_failure: Option<bool>,
    /// Use ASCII notification icons
    pub ascii_icons: Option<bool>,
    /// Form layout; the built-in contact form when absent
    pub fields: Option<Vec<FieldSpec>>,
}

impl FormConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "chw", "contact-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: FormConfig = serde_json::from_str(&content)?;
                tracing::info!("loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn submit_delay(&self) -> Duration {
        self.submit_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(SimulatedTransport::DEFAULT_DELAY)
    }

    pub fn notification_duration(&self) -> Duration {
        self.notification_duration_ms
            .map(Duration::from_millis)
            .unwrap_or(Notification::DEFAULT_DURATION)
    }

    pub fn debounce(&self) -> Duration {
        self.debounce_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DEBOUNCE)
    }

    pub fn simulate_failure(&self) -> bool {
        self.simulate_failure.unwrap_or(false)
    }

    pub fn ascii_icons(&self) -> bool {
        self.ascii_icons.unwrap_or(false)
    }

    /// Field layout, falling back to the built-in contact form.
    /// An empty list is treated as absent.
    pub fn field_specs(&self) -> Vec<FieldSpec> {
        match &self.fields {
            Some(fields) if !fields.is_empty() => fields.clone(),
            _ => default_field_specs(),
        }
    }
}
