//! MediaPipe hand keypoint indices.
//!
//! The estimator reports 21 points per hand. Each finger is a chain
//! MCP -> PIP -> DIP -> TIP (thumb: CMC -> MCP -> IP -> TIP), so for the four
//! long fingers the PIP joint sits two places before the tip.

use std::fmt;

use crate::types::Finger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandLandmark {
    Wrist = 0,
    ThumbCmc = 1,
    ThumbMcp = 2,
    ThumbIp = 3,
    ThumbTip = 4,
    IndexMcp = 5,
    IndexPip = 6,
    IndexDip = 7,
    IndexTip = 8,
    MiddleMcp = 9,
    MiddlePip = 10,
    MiddleDip = 11,
    MiddleTip = 12,
    RingMcp = 13,
    RingPip = 14,
    RingDip = 15,
    RingTip = 16,
    PinkyMcp = 17,
    PinkyPip = 18,
    PinkyDip = 19,
    PinkyTip = 20,
}

pub const NUM_HAND_LANDMARKS: usize = 21;

impl HandLandmark {
    pub const ALL: [HandLandmark; NUM_HAND_LANDMARKS] = [
        HandLandmark::Wrist,
        HandLandmark::ThumbCmc,
        HandLandmark::ThumbMcp,
        HandLandmark::ThumbIp,
        HandLandmark::ThumbTip,
        HandLandmark::IndexMcp,
        HandLandmark::IndexPip,
        HandLandmark::IndexDip,
        HandLandmark::IndexTip,
        HandLandmark::MiddleMcp,
        HandLandmark::MiddlePip,
        HandLandmark::MiddleDip,
        HandLandmark::MiddleTip,
        HandLandmark::RingMcp,
        HandLandmark::RingPip,
        HandLandmark::RingDip,
        HandLandmark::RingTip,
        HandLandmark::PinkyMcp,
        HandLandmark::PinkyPip,
        HandLandmark::PinkyDip,
        HandLandmark::PinkyTip,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            HandLandmark::Wrist => "WRIST",
            HandLandmark::ThumbCmc => "THUMB_CMC",
            HandLandmark::ThumbMcp => "THUMB_MCP",
            HandLandmark::ThumbIp => "THUMB_IP",
            HandLandmark::ThumbTip => "THUMB_TIP",
            HandLandmark::IndexMcp => "INDEX_FINGER_MCP",
            HandLandmark::IndexPip => "INDEX_FINGER_PIP",
            HandLandmark::IndexDip => "INDEX_FINGER_DIP",
            HandLandmark::IndexTip => "INDEX_FINGER_TIP",
            HandLandmark::MiddleMcp => "MIDDLE_FINGER_MCP",
            HandLandmark::MiddlePip => "MIDDLE_FINGER_PIP",
            HandLandmark::MiddleDip => "MIDDLE_FINGER_DIP",
            HandLandmark::MiddleTip => "MIDDLE_FINGER_TIP",
            HandLandmark::RingMcp => "RING_FINGER_MCP",
            HandLandmark::RingPip => "RING_FINGER_PIP",
            HandLandmark::RingDip => "RING_FINGER_DIP",
            HandLandmark::RingTip => "RING_FINGER_TIP",
            HandLandmark::PinkyMcp => "PINKY_MCP",
            HandLandmark::PinkyPip => "PINKY_PIP",
            HandLandmark::PinkyDip => "PINKY_DIP",
            HandLandmark::PinkyTip => "PINKY_TIP",
        }
    }

    pub fn tip_of(finger: Finger) -> Self {
        match finger {
            Finger::Thumb => HandLandmark::ThumbTip,
            Finger::Index => HandLandmark::IndexTip,
            Finger::Middle => HandLandmark::MiddleTip,
            Finger::Ring => HandLandmark::RingTip,
            Finger::Pinky => HandLandmark::PinkyTip,
        }
    }

    /// Joint the tip is compared against: PIP for long fingers, MCP for the thumb.
    pub fn pip_of(finger: Finger) -> Self {
        match finger {
            Finger::Thumb => HandLandmark::ThumbMcp,
            Finger::Index => HandLandmark::IndexPip,
            Finger::Middle => HandLandmark::MiddlePip,
            Finger::Ring => HandLandmark::RingPip,
            Finger::Pinky => HandLandmark::PinkyPip,
        }
    }
}

impl fmt::Display for HandLandmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pip_is_two_before_tip() {
        for finger in Finger::ALL {
            let tip = HandLandmark::tip_of(finger);
            assert_eq!(HandLandmark::pip_of(finger).index() + 2, tip.index(), "{}", finger);
        }
        assert_eq!(HandLandmark::pip_of(Finger::Index), HandLandmark::IndexPip);
        assert_eq!(HandLandmark::pip_of(Finger::Thumb), HandLandmark::ThumbMcp);
    }

    #[test]
    fn indices_match_estimator_layout() {
        for (i, lm) in HandLandmark::ALL.iter().enumerate() {
            assert_eq!(lm.index(), i);
            assert_eq!(HandLandmark::from_index(i), Some(*lm));
        }
        assert_eq!(HandLandmark::from_index(NUM_HAND_LANDMARKS), None);
    }
}
