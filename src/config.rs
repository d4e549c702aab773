//! JSON application config and the startup check of the actuator wiring.

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::actuation::DEFAULT_OPEN_ANGLE_DEG;
use crate::batch::DEFAULT_EXTENSIONS;
use crate::bindings::ActuatorBindings;
use crate::error::ConfigError;
use crate::source::DetectionFilter;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub actuation: ActuationConfig,
    pub detection: DetectionConfig,
    pub batch: BatchConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActuationConfig {
    pub open_angle_deg: i32,
    /// Finger name (`RIGHT_PINKY`) to transport pin (`d:2:s`).
    pub pins: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    pub min_confidence: f32,
    pub max_hands: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub extensions: Vec<String>,
    pub dwell_ms: u64,
}

impl Default for ActuationConfig {
    fn default() -> Self {
        // Wiring of the two-hand rig: right hand on d2-d6, left hand on d8-d12.
        let pins = [
            ("RIGHT_PINKY", "d:2:s"),
            ("RIGHT_MIDDLE", "d:3:s"),
            ("RIGHT_RING", "d:4:s"),
            ("RIGHT_INDEX", "d:5:s"),
            ("RIGHT_THUMB", "d:6:s"),
            ("LEFT_RING", "d:8:s"),
            ("LEFT_MIDDLE", "d:9:s"),
            ("LEFT_THUMB", "d:10:s"),
            ("LEFT_PINKY", "d:11:s"),
            ("LEFT_INDEX", "d:12:s"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            open_angle_deg: DEFAULT_OPEN_ANGLE_DEG,
            pins,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        let filter = DetectionFilter::default();
        Self {
            min_confidence: filter.min_confidence,
            max_hands: filter.max_hands,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            dwell_ms: 3000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            actuation: ActuationConfig::default(),
            detection: DetectionConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl AppConfig {
    pub const DEFAULT_PATH: &'static str = "config.json";

    /// Missing file: write out the defaults. Unparseable file: fail, never
    /// fall back to defaults behind the user's back.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Configuration file not found. Creating default at {}", path.display());
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let config: AppConfig =
            serde_json::from_str(&content).with_context(|| format!("Error parsing config {}", path.display()))?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    pub fn bindings(&self) -> Result<ActuatorBindings, ConfigError> {
        ActuatorBindings::from_named(&self.actuation.pins, self.actuation.open_angle_deg)
    }

    pub fn detection_filter(&self) -> DetectionFilter {
        DetectionFilter {
            min_confidence: self.detection.min_confidence,
            max_hands: self.detection.max_hands,
        }
    }
}
