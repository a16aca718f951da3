use crate::detection::{DetectedHand, Detection};
use crate::error::InvalidInput;
use crate::image::{draw, Color, Image, Resolution};
use crate::landmark::Landmark;

/// Number of landmarks a hand landmark model reports per hand.
pub const NUM_LANDMARKS: usize = 21;

/// Names for the hand landmarks.
///
/// The discriminant of each variant is the landmark's identifier.
///
/// # Terminology
///
/// - **CMC**: [Carpometacarpal joint], the lowest joint of the thumb, located near the wrist.
/// - **MCP**: [Metacarpophalangeal joint], the lower joint forming the knuckles near the palm of
///   the hand.
/// - **IP**: Interphalangeal joint of the thumb, between its MCP and tip.
/// - **PIP**: Proximal Interphalangeal joint, the joint between the MCP and DIP.
/// - **DIP**: Distal Interphalangeal joint, the highest joint of a finger.
/// - **Tip**: This landmark is just placed on the tip of the finger, above the DIP.
///
/// [Carpometacarpal joint]: https://en.wikipedia.org/wiki/Carpometacarpal_joint
/// [Metacarpophalangeal joint]: https://en.wikipedia.org/wiki/Metacarpophalangeal_joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LandmarkIdx {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexFingerMcp,
    IndexFingerPip,
    IndexFingerDip,
    IndexFingerTip,
    MiddleFingerMcp,
    MiddleFingerPip,
    MiddleFingerDip,
    MiddleFingerTip,
    RingFingerMcp,
    RingFingerPip,
    RingFingerDip,
    RingFingerTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl LandmarkIdx {
    /// Returns the landmark identifier used by the model.
    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

const CONNECTIVITY: &[(LandmarkIdx, LandmarkIdx)] = {
    use LandmarkIdx::*;
    &[
        // Surround the palm:
        (Wrist, ThumbCmc),
        (ThumbCmc, IndexFingerMcp),
        (IndexFingerMcp, MiddleFingerMcp),
        (MiddleFingerMcp, RingFingerMcp),
        (RingFingerMcp, PinkyMcp),
        (PinkyMcp, Wrist),
        // Thumb:
        (ThumbCmc, ThumbMcp),
        (ThumbMcp, ThumbIp),
        (ThumbIp, ThumbTip),
        // Index:
        (IndexFingerMcp, IndexFingerPip),
        (IndexFingerPip, IndexFingerDip),
        (IndexFingerDip, IndexFingerTip),
        // Middle:
        (MiddleFingerMcp, MiddleFingerPip),
        (MiddleFingerPip, MiddleFingerDip),
        (MiddleFingerDip, MiddleFingerTip),
        // Ring:
        (RingFingerMcp, RingFingerPip),
        (RingFingerPip, RingFingerDip),
        (RingFingerDip, RingFingerTip),
        // Pinky:
        (PinkyMcp, PinkyPip),
        (PinkyPip, PinkyDip),
        (PinkyDip, PinkyTip),
    ]
};

/// The pixel-space landmarks of one hand in one frame.
///
/// Always holds exactly [`NUM_LANDMARKS`] landmarks, ordered by identifier, so every
/// [`LandmarkIdx`] can be looked up without bounds checks failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandObservation {
    landmarks: [Landmark; NUM_LANDMARKS],
}

impl HandObservation {
    /// Creates an observation from a list of pixel-space landmarks.
    ///
    /// The list must contain exactly [`NUM_LANDMARKS`] landmarks, and the landmark at position `i`
    /// must have identifier `i`.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Result<Self, InvalidInput> {
        let landmarks: [Landmark; NUM_LANDMARKS] =
            landmarks
                .try_into()
                .map_err(|_| InvalidInput::LandmarkCount {
                    expected: NUM_LANDMARKS,
                    actual: landmarks.len(),
                })?;

        if let Some((position, lm)) = landmarks
            .iter()
            .enumerate()
            .find(|(i, lm)| usize::from(lm.id()) != *i)
        {
            return Err(InvalidInput::LandmarkOrder {
                position,
                id: lm.id(),
            });
        }

        Ok(Self { landmarks })
    }

    /// Maps a detected hand into the pixel space of a frame of size `resolution`.
    ///
    /// Coordinates outside of `[0.0, 1.0]` are scaled like all others and end up outside the frame.
    pub fn from_detected(hand: &DetectedHand, resolution: Resolution) -> Self {
        let landmarks = std::array::from_fn(|i| {
            let (x, y) = hand.landmarks()[i].to_pixel(resolution);
            // `i < NUM_LANDMARKS`, so this can't truncate
            Landmark::new(i as u8, x, y)
        });
        Self { landmarks }
    }

    /// Returns all landmarks, ordered by identifier.
    #[inline]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    #[inline]
    pub fn get(&self, idx: LandmarkIdx) -> Landmark {
        self.landmarks[usize::from(idx.id())]
    }

    /// Draws the hand skeleton and a marker on every landmark.
    ///
    /// Lines and markers touching a landmark far outside of `target` are left out.
    pub fn draw(&self, target: &mut Image) {
        for (a, b) in CONNECTIVITY {
            draw::line(target, self.get(*a).position(), self.get(*b).position())
                .color(Color::GREEN);
        }
        for lm in &self.landmarks {
            draw::marker(target, lm.x(), lm.y());
        }
    }
}

impl AsRef<[Landmark]> for HandObservation {
    fn as_ref(&self) -> &[Landmark] {
        &self.landmarks
    }
}

/// Maps one hand of a [`Detection`] into the pixel space of the frame it was detected in.
///
/// `hand_index` selects the hand, in the order the model reported them. `resolution` must be the
/// size of the frame the detection ran on.
///
/// Returns [`None`] if the detection contains fewer than `hand_index + 1` hands. This happens
/// whenever the hand isn't in view, and is not an error.
pub fn extract_landmarks(
    detection: &Detection,
    resolution: Resolution,
    hand_index: usize,
) -> Option<HandObservation> {
    let hand = detection.hands().get(hand_index)?;
    Some(HandObservation::from_detected(hand, resolution))
}

#[cfg(test)]
mod tests {
    use crate::landmark::NormalizedLandmark;

    use super::*;

    fn detection(hands: usize) -> Detection {
        (0..hands)
            .map(|h| {
                let landmarks: Vec<_> = (0..NUM_LANDMARKS)
                    .map(|i| NormalizedLandmark::new(i as f32 / 20.0, h as f32 * 0.5))
                    .collect();
                DetectedHand::new(&landmarks).unwrap()
            })
            .collect()
    }

    #[test]
    fn landmark_ids() {
        assert_eq!(LandmarkIdx::Wrist.id(), 0);
        assert_eq!(LandmarkIdx::ThumbIp.id(), 3);
        assert_eq!(LandmarkIdx::ThumbTip.id(), 4);
        assert_eq!(LandmarkIdx::IndexFingerPip.id(), 6);
        assert_eq!(LandmarkIdx::IndexFingerTip.id(), 8);
        assert_eq!(LandmarkIdx::MiddleFingerTip.id(), 12);
        assert_eq!(LandmarkIdx::RingFingerTip.id(), 16);
        assert_eq!(LandmarkIdx::PinkyPip.id(), 18);
        assert_eq!(LandmarkIdx::PinkyTip.id(), 20);
    }

    #[test]
    fn extract_is_ordered_and_scaled() {
        let res = Resolution::new(200, 100);
        let hand = extract_landmarks(&detection(1), res, 0).unwrap();
        assert_eq!(hand.landmarks().len(), NUM_LANDMARKS);
        for (i, lm) in hand.landmarks().iter().enumerate() {
            assert_eq!(usize::from(lm.id()), i);
            assert_eq!(lm.x(), (i as f32 / 20.0 * 200.0).round() as i32);
            assert_eq!(lm.y(), 0);
        }
        assert_eq!(hand.get(LandmarkIdx::Wrist).x(), 0);
        assert_eq!(hand.get(LandmarkIdx::PinkyTip).x(), 200);
    }

    #[test]
    fn extract_selects_hand() {
        let res = Resolution::new(200, 100);
        let hand = extract_landmarks(&detection(2), res, 1).unwrap();
        assert_eq!(hand.get(LandmarkIdx::Wrist).y(), 50);
    }

    #[test]
    fn extract_absent_hand() {
        let res = Resolution::new(640, 480);
        for index in 0..4 {
            assert_eq!(extract_landmarks(&Detection::default(), res, index), None);
        }
        assert_eq!(extract_landmarks(&detection(2), res, 2), None);
    }

    #[test]
    fn from_landmarks_validates() {
        let valid: Vec<_> = (0..NUM_LANDMARKS as u8)
            .map(|id| Landmark::new(id, 0, 0))
            .collect();
        let hand = HandObservation::from_landmarks(&valid).unwrap();
        assert_eq!(hand.as_ref(), &valid[..]);

        assert_eq!(
            HandObservation::from_landmarks(&valid[..20]),
            Err(InvalidInput::LandmarkCount {
                expected: 21,
                actual: 20
            })
        );

        let mut swapped = valid.clone();
        swapped.swap(3, 4);
        assert_eq!(
            HandObservation::from_landmarks(&swapped),
            Err(InvalidInput::LandmarkOrder { position: 3, id: 4 })
        );
    }

    #[test]
    fn draw_marks_landmarks() {
        let res = Resolution::new(40, 40);
        let mut image = Image::new(res.width(), res.height());
        let hand = extract_landmarks(&detection(1), res, 0).unwrap();
        hand.draw(&mut image);
        let wrist = hand.get(LandmarkIdx::Wrist);
        assert_eq!(image.get(wrist.x() as u32, wrist.y() as u32), Color::MAGENTA);
    }

    #[test]
    fn extract_matches_from_detected() {
        let res = Resolution::new(200, 100);
        let detection = detection(2);
        for (index, hand) in detection.hands().iter().enumerate() {
            assert_eq!(
                extract_landmarks(&detection, res, index),
                Some(HandObservation::from_detected(hand, res))
            );
        }
    }

    #[test]
    fn draw_survives_garbage_coordinates() {
        let mut landmarks = [NormalizedLandmark::new(0.5, 0.5); NUM_LANDMARKS];
        landmarks[LandmarkIdx::IndexFingerTip.id() as usize] =
            NormalizedLandmark::new(1e12, -1e12);
        let detection = Detection::new(vec![DetectedHand::new(&landmarks).unwrap()]);

        let res = Resolution::new(64, 48);
        let hand = extract_landmarks(&detection, res, 0).unwrap();
        let tip = hand.get(LandmarkIdx::IndexFingerTip);
        assert_eq!(tip.position(), (i32::MAX, i32::MIN));

        let mut image = Image::new(res.width(), res.height());
        hand.draw(&mut image);
        assert_eq!(image.get(32, 24), Color::MAGENTA);
    }
}
