//! Where hand observations come from.
//!
//! The landmark estimator runs outside this crate. Its per-image output is
//! exchanged as JSON in the MediaPipe shape:
//!
//! ```json
//! {"hands": [{"handedness": "Right", "score": 0.97,
//!             "landmarks": [{"x": 0.51, "y": 0.80, "z": 0.0}, null, ...]}]}
//! ```
//!
//! A `null` (or a list shorter than 21 entries) means that keypoint was not
//! reported.

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::landmarks::{HandLandmark, NUM_HAND_LANDMARKS};
use crate::types::{HandObservation, Landmark, Laterality};

pub trait LandmarkSource {
    fn name(&self) -> String;
    fn observe(&mut self, image: &Path) -> Result<Vec<HandObservation>>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct HandJson {
    pub handedness: Laterality,
    #[serde(default)]
    pub score: Option<f32>,
    #[serde(default)]
    pub landmarks: Vec<Option<Landmark>>,
}

/// One frame (or one still image) worth of estimator output.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Detection {
    #[serde(default)]
    pub hands: Vec<HandJson>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Detection {
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse detection JSON")
    }
}

impl From<HandJson> for HandObservation {
    fn from(hand: HandJson) -> Self {
        if hand.landmarks.len() > NUM_HAND_LANDMARKS {
            debug!(
                "{} hand has {} landmarks, ignoring the extra ones",
                hand.handedness,
                hand.landmarks.len()
            );
        }
        let landmarks = hand
            .landmarks
            .into_iter()
            .enumerate()
            .filter_map(|(i, lm)| Some((HandLandmark::from_index(i)?, lm?)))
            .collect();

        HandObservation {
            laterality: hand.handedness,
            landmarks,
            score: hand.score,
        }
    }
}

/// Mirrors the estimator settings: hands below `min_confidence` are dropped
/// and at most `max_hands` are kept, in reported order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionFilter {
    pub min_confidence: f32,
    pub max_hands: usize,
}

impl Default for DetectionFilter {
    fn default() -> Self {
        Self {
            min_confidence: 0.8,
            max_hands: 2,
        }
    }
}

impl DetectionFilter {
    pub fn apply(&self, detection: Detection) -> Vec<HandObservation> {
        if let Some(error) = &detection.error {
            warn!("Estimator reported an error: {}", error);
        }

        let total = detection.hands.len();
        let kept: Vec<HandObservation> = detection
            .hands
            .into_iter()
            .filter(|h| h.score.map_or(true, |s| s >= self.min_confidence))
            .take(self.max_hands)
            .map(HandObservation::from)
            .collect();

        if kept.len() < total {
            debug!("Kept {} of {} detected hands", kept.len(), total);
        }
        kept
    }
}

/// Reads `<image>.json` written next to each image by the estimator,
/// e.g. `pose_01.png` -> `pose_01.png.json`.
pub struct SidecarJsonSource {
    filter: DetectionFilter,
}

impl SidecarJsonSource {
    pub fn new(filter: DetectionFilter) -> Self {
        Self { filter }
    }

    pub fn sidecar_path(image: &Path) -> PathBuf {
        let mut name = image.as_os_str().to_owned();
        name.push(".json");
        PathBuf::from(name)
    }
}

impl LandmarkSource for SidecarJsonSource {
    fn name(&self) -> String {
        "Sidecar JSON".to_string()
    }

    fn observe(&mut self, image: &Path) -> Result<Vec<HandObservation>> {
        let path = Self::sidecar_path(image);
        if !path.exists() {
            debug!("No landmark file for {}", image.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let detection = Detection::parse(&content)
            .with_context(|| format!("Bad landmark file {}", path.display()))?;
        Ok(self.filter.apply(detection))
    }
}
