use std::fmt;

use itertools::Itertools;

use crate::error::InvalidInput;
use crate::landmark::Landmark;

use super::landmark::{HandObservation, LandmarkIdx};

/// The five digits of a hand, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Digit {
    Thumb,
    Index,
    Middle,
    Ring,
    Little,
}

impl Digit {
    pub const ALL: [Digit; 5] = [
        Digit::Thumb,
        Digit::Index,
        Digit::Middle,
        Digit::Ring,
        Digit::Little,
    ];
}

/// Image axis along which a fingertip is compared against its reference joint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn coord(self, lm: Landmark) -> i32 {
        match self {
            Axis::X => lm.x(),
            Axis::Y => lm.y(),
        }
    }
}

/// The landmarks used to decide whether a [`Digit`] is extended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitLandmarks {
    pub digit: Digit,
    pub tip: LandmarkIdx,
    pub joint: LandmarkIdx,
    /// A digit is extended when `tip` has a smaller coordinate than `joint` on this axis.
    pub axis: Axis,
}

/// Tip and reference joint of every digit, in canonical [`Digit`] order.
///
/// The thumb tip is compared horizontally against the IP joint directly below it, the other
/// fingers vertically against their PIP joint.
pub const DIGIT_LANDMARKS: [DigitLandmarks; 5] = {
    use LandmarkIdx::*;
    [
        DigitLandmarks {
            digit: Digit::Thumb,
            tip: ThumbTip,
            joint: ThumbIp,
            axis: Axis::X,
        },
        DigitLandmarks {
            digit: Digit::Index,
            tip: IndexFingerTip,
            joint: IndexFingerPip,
            axis: Axis::Y,
        },
        DigitLandmarks {
            digit: Digit::Middle,
            tip: MiddleFingerTip,
            joint: MiddleFingerPip,
            axis: Axis::Y,
        },
        DigitLandmarks {
            digit: Digit::Ring,
            tip: RingFingerTip,
            joint: RingFingerPip,
            axis: Axis::Y,
        },
        DigitLandmarks {
            digit: Digit::Little,
            tip: PinkyTip,
            joint: PinkyPip,
            axis: Axis::Y,
        },
    ]
};

/// Which digits of a hand are extended, in canonical [`Digit`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FingerState([bool; 5]);

impl FingerState {
    pub fn new(extended: [bool; 5]) -> Self {
        Self(extended)
    }

    /// Classifies a raw list of pixel-space landmarks.
    ///
    /// An empty list means that no hand was detected, which results in [`InvalidInput::NoHand`].
    /// Any other list must be a valid [`HandObservation`].
    pub fn classify(landmarks: &[Landmark]) -> Result<Self, InvalidInput> {
        if landmarks.is_empty() {
            return Err(InvalidInput::NoHand);
        }
        let hand = HandObservation::from_landmarks(landmarks)?;
        Ok(fingers_up(&hand))
    }

    /// Classifies a hand that may be absent from the current frame.
    ///
    /// Returns [`InvalidInput::NoHand`] when `hand` is [`None`]. Callers are expected to check for
    /// presence before classifying.
    pub fn for_hand(hand: Option<&HandObservation>) -> Result<Self, InvalidInput> {
        hand.map(fingers_up).ok_or(InvalidInput::NoHand)
    }

    #[inline]
    pub fn is_up(&self, digit: Digit) -> bool {
        self.0[digit as usize]
    }

    /// Returns the number of extended digits.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|up| **up).count()
    }

    #[inline]
    pub fn as_array(&self) -> [bool; 5] {
        self.0
    }
}

/// Formats as a list of `1` (extended) and `0` (folded), eg. `[0, 1, 1, 0, 0]`.
impl fmt::Display for FingerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.0.iter().map(|up| u8::from(*up)).format(", "))
    }
}

/// Classifies which digits of `hand` are extended.
///
/// A digit counts as extended when its tip lies before its reference joint along the axis given
/// in [`DIGIT_LANDMARKS`]: the thumb when its tip is left of the IP joint, the other fingers when
/// their tip is above the PIP joint.
///
/// # Limitations
///
/// This assumes an upright hand with the palm facing the camera, and an image that has not been
/// mirrored. Rotated or upside-down hands will be misclassified, and the thumb result flips for
/// the other hand or a mirrored camera image.
pub fn fingers_up(hand: &HandObservation) -> FingerState {
    let mut state = [false; 5];
    for (out, lm) in state.iter_mut().zip(&DIGIT_LANDMARKS) {
        *out = lm.axis.coord(hand.get(lm.tip)) < lm.axis.coord(hand.get(lm.joint));
    }
    FingerState(state)
}
