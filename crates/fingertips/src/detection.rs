//! The boundary to the external hand landmark model.
//!
//! The model itself is not part of this crate. It is plugged in by implementing [`HandLandmarker`],
//! which turns an RGB [`Image`] into a [`Detection`]: an ordered list of [`DetectedHand`]s, each
//! consisting of exactly [`NUM_LANDMARKS`] normalized landmarks.

use crate::detector::DetectorOptions;
use crate::error::InvalidInput;
use crate::hand::NUM_LANDMARKS;
use crate::image::Image;
use crate::landmark::NormalizedLandmark;

/// Trait implemented by hand landmark models.
pub trait HandLandmarker {
    /// Runs the model on an RGB image.
    ///
    /// An image without any hands in it must result in an empty [`Detection`], not an error.
    /// Errors are reserved for failures of the model or its runtime.
    fn detect(&mut self, image: &Image) -> anyhow::Result<Detection>;

    /// Applies detector configuration to the model.
    ///
    /// This is called once by [`HandDetector::new`][crate::detector::HandDetector::new]. Models
    /// that have native support for confidence thresholds or hand limits should apply them here.
    /// The default implementation does nothing.
    fn configure(&mut self, options: &DetectorOptions) {
        let _ = options;
    }
}

impl<L: HandLandmarker + ?Sized> HandLandmarker for Box<L> {
    fn detect(&mut self, image: &Image) -> anyhow::Result<Detection> {
        (**self).detect(image)
    }

    fn configure(&mut self, options: &DetectorOptions) {
        (**self).configure(options)
    }
}

/// The hands found in a single frame, in the order the model reported them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Detection {
    hands: Vec<DetectedHand>,
}

impl Detection {
    pub fn new(hands: Vec<DetectedHand>) -> Self {
        Self { hands }
    }

    #[inline]
    pub fn hands(&self) -> &[DetectedHand] {
        &self.hands
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }

    /// Removes all hands whose score is below `min_score`.
    ///
    /// Hands without a score are always kept.
    pub fn retain_confident(&mut self, min_score: f32) {
        self.hands
            .retain(|hand| hand.score().map_or(true, |score| score >= min_score));
    }

    /// Drops all hands after the first `max_hands`.
    pub fn truncate(&mut self, max_hands: usize) {
        self.hands.truncate(max_hands);
    }
}

impl FromIterator<DetectedHand> for Detection {
    fn from_iter<T: IntoIterator<Item = DetectedHand>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// A single hand reported by a [`HandLandmarker`].
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedHand {
    landmarks: [NormalizedLandmark; NUM_LANDMARKS],
    handedness: Option<Handedness>,
    score: Option<f32>,
}

impl DetectedHand {
    /// Creates a hand from the landmarks output by a model.
    ///
    /// Returns an error if `landmarks` does not contain exactly [`NUM_LANDMARKS`] entries.
    pub fn new(landmarks: &[NormalizedLandmark]) -> Result<Self, InvalidInput> {
        let landmarks: [NormalizedLandmark; NUM_LANDMARKS] = landmarks
            .try_into()
            .map_err(|_| InvalidInput::LandmarkCount {
                expected: NUM_LANDMARKS,
                actual: landmarks.len(),
            })?;
        Ok(Self {
            landmarks,
            handedness: None,
            score: None,
        })
    }

    pub fn with_handedness(self, handedness: Handedness) -> Self {
        Self {
            handedness: Some(handedness),
            ..self
        }
    }

    pub fn with_score(self, score: f32) -> Self {
        Self {
            score: Some(score),
            ..self
        }
    }

    /// Returns the normalized landmarks, ordered by landmark identifier.
    #[inline]
    pub fn landmarks(&self) -> &[NormalizedLandmark; NUM_LANDMARKS] {
        &self.landmarks
    }

    /// Returns the handedness estimated by the model, if it reports one.
    ///
    /// This assumes that the camera image is passed in as-is. Mirrored images will swap left and
    /// right.
    #[inline]
    pub fn handedness(&self) -> Option<Handedness> {
        self.handedness
    }

    /// Returns the model's confidence that this is a hand, if it reports one.
    #[inline]
    pub fn score(&self) -> Option<f32> {
        self.score
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(score: Option<f32>) -> DetectedHand {
        let hand = DetectedHand::new(&[NormalizedLandmark::default(); NUM_LANDMARKS]).unwrap();
        match score {
            Some(score) => hand.with_score(score),
            None => hand,
        }
    }

    #[test]
    fn landmark_count_is_checked() {
        let err = DetectedHand::new(&[NormalizedLandmark::default(); 20]).unwrap_err();
        assert_eq!(
            err,
            InvalidInput::LandmarkCount {
                expected: 21,
                actual: 20
            }
        );
        assert!(DetectedHand::new(&[]).is_err());
    }

    #[test]
    fn retain_confident() {
        let mut detection: Detection = [hand(Some(0.9)), hand(Some(0.2)), hand(None)]
            .into_iter()
            .collect();
        detection.retain_confident(0.5);
        assert_eq!(detection.len(), 2);
        assert_eq!(detection.hands()[0].score(), Some(0.9));
        assert_eq!(detection.hands()[1].score(), None);
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut detection = Detection::new(vec![hand(Some(0.5))]);
        detection.retain_confident(0.5);
        assert_eq!(detection.len(), 1);
    }

    #[test]
    fn truncate() {
        let mut detection: Detection = (0..3).map(|_| hand(None)).collect();
        detection.truncate(2);
        assert_eq!(detection.len(), 2);
        detection.truncate(5);
        assert_eq!(detection.len(), 2);
    }
}
