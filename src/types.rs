use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::landmarks::HandLandmark;

/// Which hand an observation belongs to, as labelled by the estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Laterality {
    #[serde(alias = "Right", alias = "right")]
    Right,
    #[serde(alias = "Left", alias = "left")]
    Left,
}

impl Laterality {
    pub const ALL: [Laterality; 2] = [Laterality::Right, Laterality::Left];

    pub fn as_str(&self) -> &'static str {
        match self {
            Laterality::Right => "RIGHT",
            Laterality::Left => "LEFT",
        }
    }

    fn slot(&self) -> usize {
        match self {
            Laterality::Right => 0,
            Laterality::Left => 1,
        }
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Finger::Thumb => "THUMB",
            Finger::Index => "INDEX",
            Finger::Middle => "MIDDLE",
            Finger::Ring => "RING",
            Finger::Pinky => "PINKY",
        }
    }

    fn slot(&self) -> usize {
        match self {
            Finger::Thumb => 0,
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        }
    }
}

impl fmt::Display for Finger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the ten (hand, finger) slots, written `RIGHT_INDEX` in config files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FingerKey {
    pub laterality: Laterality,
    pub finger: Finger,
}

impl FingerKey {
    pub fn new(laterality: Laterality, finger: Finger) -> Self {
        Self { laterality, finger }
    }

    /// All ten keys, right hand first, thumb to pinky.
    pub fn all() -> impl Iterator<Item = FingerKey> {
        Laterality::ALL
            .into_iter()
            .flat_map(|l| Finger::ALL.into_iter().map(move |f| FingerKey::new(l, f)))
    }
}

impl fmt::Display for FingerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.laterality, self.finger)
    }
}

impl FromStr for FingerKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        FingerKey::all()
            .find(|k| k.to_string() == wanted)
            .ok_or_else(|| ConfigError::UnknownBindingKey(s.to_string()))
    }
}

/// Normalized keypoint in image space. Smaller y is higher in the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// One detected hand. Keypoints the estimator did not report are simply absent.
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    pub laterality: Laterality,
    pub landmarks: BTreeMap<HandLandmark, Landmark>,
    pub score: Option<f32>,
}

impl HandObservation {
    pub fn new(laterality: Laterality) -> Self {
        Self {
            laterality,
            landmarks: BTreeMap::new(),
            score: None,
        }
    }

    pub fn with(mut self, index: HandLandmark, point: Landmark) -> Self {
        self.landmarks.insert(index, point);
        self
    }

    pub fn landmark(&self, index: HandLandmark) -> Option<Landmark> {
        self.landmarks.get(&index).copied()
    }
}

/// Extended/closed table for all ten fingers. Anything never set is closed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerStates {
    table: [[bool; 5]; 2],
}

impl FingerStates {
    pub fn get(&self, key: FingerKey) -> bool {
        self.table[key.laterality.slot()][key.finger.slot()]
    }

    pub fn set(&mut self, key: FingerKey, extended: bool) {
        self.table[key.laterality.slot()][key.finger.slot()] = extended;
    }

    /// Number of raised fingers on one hand.
    pub fn count(&self, laterality: Laterality) -> usize {
        self.table[laterality.slot()].iter().filter(|&&e| e).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FingerKey, bool)> + '_ {
        FingerKey::all().map(move |k| (k, self.get(k)))
    }
}

/// Opaque pin identifier understood by the transport, e.g. Firmata's `d:2:s`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(pub String);

impl PinId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActuationCommand {
    pub pin: PinId,
    pub angle: u8,
}

/// Every actuator's command for one frame, in binding order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandBatch {
    pub commands: Vec<ActuationCommand>,
}

impl CommandBatch {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn angle_for(&self, pin: &PinId) -> Option<u8> {
        self.commands.iter().find(|c| &c.pin == pin).map(|c| c.angle)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActuationCommand> {
        self.commands.iter()
    }
}
