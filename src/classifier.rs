//! Finger open/closed classification from a single hand's keypoints.
//!
//! Long fingers are extended when the tip sits strictly above the PIP joint
//! (smaller normalized y). The thumb bends across the palm instead, so it also
//! has to point outward: towards smaller x on a right hand, larger x on a left
//! hand, with the tip above the IP joint on both.
//!
//! Ties count as closed. The test assumes an upright hand facing the camera;
//! tilted or inverted hands are not corrected for.

use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::landmarks::HandLandmark;
use crate::types::{Finger, HandObservation, Landmark, Laterality};

pub type FingerReadings = BTreeMap<Finger, Result<bool, EngineError>>;

/// Classify all five fingers of one hand.
///
/// A missing keypoint only fails the finger that needs it.
pub fn classify(observation: &HandObservation) -> FingerReadings {
    Finger::ALL
        .into_iter()
        .map(|finger| (finger, classify_finger(observation, finger)))
        .collect()
}

pub fn classify_finger(observation: &HandObservation, finger: Finger) -> Result<bool, EngineError> {
    let fetch = |landmark: HandLandmark| -> Result<Landmark, EngineError> {
        observation
            .landmark(landmark)
            .ok_or(EngineError::MissingLandmark {
                laterality: observation.laterality,
                finger,
                landmark,
            })
    };

    match finger {
        Finger::Thumb => {
            let tip = fetch(HandLandmark::ThumbTip)?;
            let ip = fetch(HandLandmark::ThumbIp)?;
            let mcp = fetch(HandLandmark::ThumbMcp)?;
            Ok(thumb_extended(observation.laterality, tip, ip, mcp))
        }
        _ => {
            let tip = fetch(HandLandmark::tip_of(finger))?;
            let pip = fetch(HandLandmark::pip_of(finger))?;
            Ok(tip.y < pip.y)
        }
    }
}

fn thumb_extended(laterality: Laterality, tip: Landmark, ip: Landmark, mcp: Landmark) -> bool {
    let outward = match laterality {
        Laterality::Right => tip.x < mcp.x,
        Laterality::Left => tip.x > mcp.x,
    };
    outward && tip.y < ip.y
}
