use thiserror::Error;

use crate::landmarks::HandLandmark;
use crate::types::{Finger, FingerKey, Laterality, PinId};

/// Conditions raised while turning landmarks into actuator commands.
///
/// `MissingLandmark` and `DuplicateLaterality` are recovered inside a frame and
/// reported alongside the result; `Configuration` is only produced while
/// building the binding table at startup.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{laterality} {finger}: landmark {landmark} missing, finger treated as closed")]
    MissingLandmark {
        laterality: Laterality,
        finger: Finger,
        landmark: HandLandmark,
    },

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("more than one hand labelled {0} in this frame, keeping the last one")]
    DuplicateLaterality(Laterality),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("open angle {0} is outside 0..=180 degrees")]
    OpenAngleOutOfRange(i32),

    #[error("no actuator pin bound to {0}")]
    MissingBinding(FingerKey),

    #[error("pin {pin} is bound to both {first} and {second}")]
    DuplicatePin {
        pin: PinId,
        first: FingerKey,
        second: FingerKey,
    },

    #[error("unknown binding key {0:?}, expected e.g. RIGHT_INDEX or LEFT_THUMB")]
    UnknownBindingKey(String),
}
