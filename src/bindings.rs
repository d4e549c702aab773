//! Pin wiring for the ten finger actuators.

use std::collections::BTreeMap;

use crate::actuation::OpenAngle;
use crate::error::ConfigError;
use crate::types::{FingerKey, PinId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuatorBinding {
    pub key: FingerKey,
    pub pin: PinId,
}

/// Validated wiring of all ten fingers plus the shared open angle.
///
/// Built once at startup and passed by reference into every frame; there is
/// no way to change it afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActuatorBindings {
    entries: Vec<ActuatorBinding>,
    open_angle: OpenAngle,
}

impl ActuatorBindings {
    /// Requires a pin for every one of the ten keys and no pin shared by two keys.
    pub fn new(pins: &BTreeMap<FingerKey, PinId>, open_angle_deg: i32) -> Result<Self, ConfigError> {
        let open_angle = OpenAngle::new(open_angle_deg)?;

        let mut entries = Vec::with_capacity(10);
        let mut seen: BTreeMap<&PinId, FingerKey> = BTreeMap::new();
        for key in FingerKey::all() {
            let pin = pins.get(&key).ok_or(ConfigError::MissingBinding(key))?;
            if let Some(first) = seen.insert(pin, key) {
                return Err(ConfigError::DuplicatePin {
                    pin: pin.clone(),
                    first,
                    second: key,
                });
            }
            entries.push(ActuatorBinding {
                key,
                pin: pin.clone(),
            });
        }

        Ok(Self { entries, open_angle })
    }

    /// Same as [`ActuatorBindings::new`] but keyed by config names like `RIGHT_PINKY`.
    pub fn from_named<'a, I>(pins: I, open_angle_deg: i32) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut table = BTreeMap::new();
        for (name, pin) in pins {
            table.insert(name.parse::<FingerKey>()?, PinId::new(pin.as_str()));
        }
        Self::new(&table, open_angle_deg)
    }

    pub fn open_angle(&self) -> OpenAngle {
        self.open_angle
    }

    pub fn pin_for(&self, key: FingerKey) -> Option<&PinId> {
        self.entries.iter().find(|b| b.key == key).map(|b| &b.pin)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ActuatorBinding> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
