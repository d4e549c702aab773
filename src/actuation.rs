//! Finger state to servo angle.
//!
//! The left hand's horns are mounted mirrored, so its closed position is 180
//! and it opens towards zero, while the right hand closes at 0 and opens
//! upwards. `open_angle_deg` is how far from the closed end "open" sits.

use crate::error::{ConfigError, EngineError};
use crate::types::{Finger, Laterality};

pub const MAX_ANGLE_DEG: u8 = 180;
pub const DEFAULT_OPEN_ANGLE_DEG: i32 = 115;

/// An open angle already checked to lie within 0..=180.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenAngle(u8);

impl OpenAngle {
    pub fn new(degrees: i32) -> Result<Self, ConfigError> {
        u8::try_from(degrees)
            .ok()
            .filter(|d| *d <= MAX_ANGLE_DEG)
            .map(OpenAngle)
            .ok_or(ConfigError::OpenAngleOutOfRange(degrees))
    }

    pub fn degrees(self) -> u8 {
        self.0
    }
}

/// Target angle for one finger.
///
/// The finger itself does not change the result; every actuator shares the
/// same calibration.
pub fn map_to_angle(
    laterality: Laterality,
    _finger: Finger,
    extended: bool,
    open_angle_deg: i32,
) -> Result<u8, EngineError> {
    let open = OpenAngle::new(open_angle_deg)?;
    Ok(angle_for(laterality, extended, open))
}

pub fn angle_for(laterality: Laterality, extended: bool, open: OpenAngle) -> u8 {
    match (laterality, extended) {
        (_, false) => closed_angle(laterality),
        (Laterality::Right, true) => open.degrees(),
        (Laterality::Left, true) => MAX_ANGLE_DEG - open.degrees(),
    }
}

pub fn closed_angle(laterality: Laterality) -> u8 {
    match laterality {
        Laterality::Right => 0,
        Laterality::Left => MAX_ANGLE_DEG,
    }
}
