//! Per-frame driver: classify every observed hand, then emit one command per
//! bound actuator.
//!
//! Nothing is kept between calls. The same observations and bindings always
//! give the same batch, so frames can be processed in any order or in
//! parallel by the caller.

use log::{debug, warn};

use crate::actuation::angle_for;
use crate::bindings::ActuatorBindings;
use crate::classifier::classify;
use crate::error::EngineError;
use crate::types::{ActuationCommand, CommandBatch, FingerKey, FingerStates, HandObservation, Laterality};

/// Result of one frame: the batch to send plus what was recovered along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub commands: CommandBatch,
    pub states: FingerStates,
    pub diagnostics: Vec<EngineError>,
}

impl FrameReport {
    pub fn raised(&self, laterality: Laterality) -> usize {
        self.states.count(laterality)
    }
}

/// Turn one frame's hands into a full command batch.
///
/// Hands that are absent leave their fingers closed. If two hands carry the
/// same laterality the later one replaces the earlier one entirely.
pub fn process(observations: &[HandObservation], bindings: &ActuatorBindings) -> FrameReport {
    let mut states = FingerStates::default();
    let mut diagnostics = Vec::new();
    let mut seen: Vec<Laterality> = Vec::with_capacity(2);

    for observation in observations {
        let laterality = observation.laterality;
        if seen.contains(&laterality) {
            warn!("Two {} hands in one frame, using the later detection", laterality);
            diagnostics.push(EngineError::DuplicateLaterality(laterality));
        } else {
            seen.push(laterality);
        }

        for (finger, reading) in classify(observation) {
            let key = FingerKey::new(laterality, finger);
            let extended = match reading {
                Ok(extended) => extended,
                Err(e) => {
                    debug!("{}", e);
                    diagnostics.push(e);
                    false
                }
            };
            states.set(key, extended);
        }
    }

    let commands = bindings
        .iter()
        .map(|binding| ActuationCommand {
            pin: binding.pin.clone(),
            angle: angle_for(
                binding.key.laterality,
                states.get(binding.key),
                bindings.open_angle(),
            ),
        })
        .collect();

    FrameReport {
        commands: CommandBatch { commands },
        states,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::HandLandmark;
    use crate::types::{Finger, Landmark, PinId};
    use std::collections::BTreeMap;

    fn bindings() -> ActuatorBindings {
        let table: BTreeMap<FingerKey, PinId> = FingerKey::all()
            .map(|k| (k, PinId::new(k.to_string())))
            .collect();
        ActuatorBindings::new(&table, 115).unwrap()
    }

    fn pin(l: Laterality, f: Finger) -> PinId {
        PinId::new(FingerKey::new(l, f).to_string())
    }

    fn open_index(laterality: Laterality) -> HandObservation {
        HandObservation::new(laterality)
            .with(HandLandmark::IndexTip, Landmark::new(0.5, 0.2))
            .with(HandLandmark::IndexPip, Landmark::new(0.5, 0.4))
    }

    #[test]
    fn no_hands_closes_everything() {
        let report = process(&[], &bindings());
        assert_eq!(report.commands.len(), 10);
        for (key, _) in report.states.iter() {
            let expected = if key.laterality == Laterality::Right { 0 } else { 180 };
            assert_eq!(report.commands.angle_for(&PinId::new(key.to_string())), Some(expected));
        }
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn later_duplicate_hand_wins() {
        let closed_right = HandObservation::new(Laterality::Right)
            .with(HandLandmark::IndexTip, Landmark::new(0.5, 0.6))
            .with(HandLandmark::IndexPip, Landmark::new(0.5, 0.4));

        let report = process(&[open_index(Laterality::Right), closed_right.clone()], &bindings());
        assert_eq!(report.commands.angle_for(&pin(Laterality::Right, Finger::Index)), Some(0));
        assert!(report
            .diagnostics
            .contains(&EngineError::DuplicateLaterality(Laterality::Right)));

        let report = process(&[closed_right, open_index(Laterality::Right)], &bindings());
        assert_eq!(report.commands.angle_for(&pin(Laterality::Right, Finger::Index)), Some(115));
    }

    #[test]
    fn missing_landmarks_are_reported_and_closed() {
        let report = process(&[open_index(Laterality::Left)], &bindings());
        assert_eq!(report.commands.angle_for(&pin(Laterality::Left, Finger::Index)), Some(65));
        assert_eq!(report.commands.angle_for(&pin(Laterality::Left, Finger::Ring)), Some(180));
        // thumb, middle, ring and pinky lack keypoints
        assert_eq!(report.diagnostics.len(), 4);
        assert_eq!(report.raised(Laterality::Left), 1);
    }

    #[test]
    fn commands_follow_binding_order() {
        let b = bindings();
        let report = process(&[open_index(Laterality::Right)], &b);
        let pins: Vec<&PinId> = report.commands.iter().map(|c| &c.pin).collect();
        let expected: Vec<&PinId> = b.iter().map(|x| &x.pin).collect();
        assert_eq!(pins, expected);
    }
}
